//! Locating namespace assignments inside inline scripts

use regex::Regex;
use scraper::{Html, Selector};

/// Text of the first inline script that assigns `<namespace>.chart_data`.
pub fn find_data_script(html: &str, namespace: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").ok()?;
    let chart_assignment = assignment_pattern(namespace, "chart_data");

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .find(|text| chart_assignment.is_match(text))
}

/// Raw `{ ... }` literal assigned to `<namespace>.<name>`, if any.
///
/// The capture ends at the first `};` after the opening brace; braces are not
/// counted, so a literal containing `};` inside a string is cut short.
pub fn capture_assignment(script: &str, namespace: &str, name: &str) -> Option<String> {
    assignment_pattern(namespace, name)
        .captures(script)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn assignment_pattern(namespace: &str, name: &str) -> Regex {
    let pattern = format!(
        r"(?s){}\.{}\s*=\s*(\{{.*?\}});",
        regex::escape(namespace),
        regex::escape(name)
    );
    // Both parts are escaped, so the pattern is always valid
    Regex::new(&pattern).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html>
    <head>
        <script src="/js/app.js"></script>
        <script>var unrelated = {a: 1};</script>
        <script type="text/javascript">
            VGPC.chart_data = {
                used: [[1700000000000, 1050]],
            };
            VGPC.volume_data = {volume: [[1700000000000, 42]]};
            VGPC.product = {id: 1, title: 'Box'};
        </script>
    </head>
    </html>
    "#;

    #[test]
    fn test_find_data_script() {
        let script = find_data_script(PAGE, "VGPC").unwrap();
        assert!(script.contains("VGPC.product"));
        assert!(!script.contains("unrelated"));
    }

    #[test]
    fn test_missing_script() {
        assert!(find_data_script("<html><script>var a = 1;</script></html>", "VGPC").is_none());
        // Namespace is matched literally
        assert!(find_data_script(PAGE, "VGP").is_none());
        assert!(find_data_script(PAGE, "V.PC").is_none());
    }

    #[test]
    fn test_capture_assignment() {
        let script = find_data_script(PAGE, "VGPC").unwrap();

        let chart = capture_assignment(&script, "VGPC", "chart_data").unwrap();
        assert!(chart.starts_with('{') && chart.ends_with('}'));
        assert!(chart.contains("1050"));

        assert_eq!(
            capture_assignment(&script, "VGPC", "volume_data").as_deref(),
            Some("{volume: [[1700000000000, 42]]}")
        );
        assert_eq!(
            capture_assignment(&script, "VGPC", "product").as_deref(),
            Some("{id: 1, title: 'Box'}")
        );
        assert!(capture_assignment(&script, "VGPC", "missing").is_none());
    }

    #[test]
    fn test_capture_stops_at_first_terminator() {
        let script = "VGPC.product = {note: 'a};b', id: 2};";
        assert_eq!(
            capture_assignment(script, "VGPC", "product").as_deref(),
            Some("{note: 'a}")
        );
    }
}
