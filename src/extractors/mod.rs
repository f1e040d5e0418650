//! Extraction of chart, volume and product data from a product page
//!
//! The page carries the data as JavaScript assignments inside one inline
//! script, e.g. `VGPC.chart_data = { used: [[ts, cents], ...] };`. Each of
//! the three literals is captured, repaired into JSON and decoded on its own,
//! so one bad literal never affects the others.

mod js_literal;
mod normalize;
mod script_extractor;

pub use js_literal::*;
pub use normalize::*;
pub use script_extractor::*;

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::error::ScrapeError;
use crate::models::{ChartData, ProductData, VolumeData};

/// The three literals the page assigns onto its namespace object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    ChartData,
    VolumeData,
    Product,
}

impl Literal {
    /// Property name in the page script
    pub fn property(self) -> &'static str {
        match self {
            Literal::ChartData => "chart_data",
            Literal::VolumeData => "volume_data",
            Literal::Product => "product",
        }
    }

    /// Stem used for debug artifact file names
    pub fn artifact_stem(self) -> &'static str {
        match self {
            Literal::ChartData => "chart-data",
            Literal::VolumeData => "volume-data",
            Literal::Product => "product-data",
        }
    }
}

/// A literal that did not decode through the text normalizer.
#[derive(Debug, Clone)]
pub struct LiteralFailure {
    pub literal: Literal,
    /// Captured text as it appeared in the page
    pub raw: String,
    /// Text after normalization
    pub normalized: String,
    pub error: String,
    /// Whether structural parsing still produced a value
    pub recovered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// False when no script carries the chart data assignment
    pub script_found: bool,
    pub chart_data: ChartData,
    pub volume_data: VolumeData,
    pub product_data: ProductData,
    pub failures: Vec<LiteralFailure>,
}

impl ExtractionResult {
    /// Chart data is what makes a page worth writing out.
    pub fn has_data(&self) -> bool {
        !self.chart_data.is_empty()
    }

    pub fn failure(&self, literal: Literal) -> Option<&LiteralFailure> {
        self.failures.iter().find(|f| f.literal == literal)
    }
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub namespace: String,
    pub ast_recovery: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            namespace: crate::config::DEFAULT_NAMESPACE.to_string(),
            ast_recovery: true,
        }
    }
}

/// Extract all three literals from `html`.
///
/// Missing or broken literals leave their field empty; failures are recorded
/// in [`ExtractionResult::failures`] for the caller to persist.
pub fn extract(html: &str, options: &ExtractOptions) -> ExtractionResult {
    let Some(script) = find_data_script(html, &options.namespace) else {
        warn!(
            "{}",
            ScrapeError::NoDataFound {
                namespace: options.namespace.clone()
            }
        );
        return ExtractionResult::default();
    };

    let mut result = ExtractionResult {
        script_found: true,
        ..Default::default()
    };

    let failures = &mut result.failures;
    if let Some(chart) = decode_literal(&script, Literal::ChartData, options, failures) {
        result.chart_data = chart;
    }
    if let Some(volume) = decode_literal(&script, Literal::VolumeData, options, failures) {
        result.volume_data = volume;
    }
    if let Some(product) = decode_literal(&script, Literal::Product, options, failures) {
        result.product_data = product;
    }

    result
}

fn decode_literal<T: DeserializeOwned>(
    script: &str,
    literal: Literal,
    options: &ExtractOptions,
    failures: &mut Vec<LiteralFailure>,
) -> Option<T> {
    let raw = capture_assignment(script, &options.namespace, literal.property())?;
    let normalized = normalize_literal(&raw);

    let err = match serde_json::from_str::<T>(&normalized) {
        Ok(value) => {
            info!("Successfully extracted {}", literal.property());
            return Some(value);
        }
        Err(source) => ScrapeError::Parse {
            name: literal.property().to_string(),
            source,
        },
    };
    error!("{}", err);

    let recovered = options
        .ast_recovery
        .then(|| js_literal_to_json(&raw))
        .flatten()
        .and_then(|value| serde_json::from_value::<T>(value).ok());

    if recovered.is_some() {
        warn!("Recovered {} by parsing it as JavaScript", literal.property());
    }

    failures.push(LiteralFailure {
        literal,
        raw,
        normalized,
        error: err.to_string(),
        recovered: recovered.is_some(),
    });

    recovered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesPoint;
    use serde_json::json;

    fn page(script: &str) -> String {
        format!("<html><head><script>{}</script></head><body></body></html>", script)
    }

    #[test]
    fn test_extract_all_three() {
        let html = page(
            r#"
            VGPC.chart_data = {used: [[1700000000000, 1050]], new: [[1700000000000, 2000],]};
            VGPC.volume_data = {volume: [[1700000000000, 42]]};
            VGPC.product = {id: 77, title: 'Booster Box', sealed:true};
            "#,
        );

        let result = extract(&html, &ExtractOptions::default());
        assert!(result.script_found);
        assert!(result.has_data());
        assert!(result.failures.is_empty());

        assert_eq!(result.chart_data["used"], vec![SeriesPoint::new(1700000000000, 1050)]);
        assert_eq!(result.chart_data["new"][0].value, 2000);
        assert_eq!(result.volume_data.volume.as_ref().unwrap()[0].value, 42);
        assert_eq!(
            serde_json::Value::Object(result.product_data),
            json!({"id": 77, "title": "Booster Box", "sealed": true})
        );
    }

    #[test]
    fn test_no_script_found() {
        let result = extract(&page("var x = {a: 1};"), &ExtractOptions::default());
        assert!(!result.script_found);
        assert!(!result.has_data());
        assert!(result.volume_data.is_empty());
        assert!(result.product_data.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_partial_failure_is_isolated() {
        let html = page(
            r#"
            VGPC.chart_data = {used: [[1700000000000, 1050]]};
            VGPC.product = {title: };
            "#,
        );

        let result = extract(&html, &ExtractOptions::default());
        assert!(result.has_data());
        assert!(result.product_data.is_empty());
        assert!(result.volume_data.is_empty());

        let failure = result.failure(Literal::Product).unwrap();
        assert_eq!(failure.raw, "{title: }");
        assert_eq!(failure.normalized, r#"{"title": }"#);
        assert!(!failure.recovered);
        assert!(result.failure(Literal::VolumeData).is_none());
    }

    #[test]
    fn test_ast_recovery() {
        let html = page(
            r#"
            VGPC.chart_data = {used: [[1700000000000, 1050]]};
            VGPC.product = {title: 'Box', url: 'https://example.com/x'};
            "#,
        );

        let result = extract(&html, &ExtractOptions::default());
        assert_eq!(result.product_data["url"], "https://example.com/x");
        let failure = result.failure(Literal::Product).unwrap();
        assert!(failure.recovered);

        let strict = ExtractOptions {
            ast_recovery: false,
            ..Default::default()
        };
        let result = extract(&html, &strict);
        assert!(result.product_data.is_empty());
        assert!(!result.failure(Literal::Product).unwrap().recovered);
    }

    #[test]
    fn test_typed_decode_failure() {
        // Valid JSON but not a series of pairs
        let html = page("VGPC.chart_data = {used: [[1, 2, 3]]};");
        let result = extract(&html, &ExtractOptions::default());
        assert!(result.script_found);
        assert!(!result.has_data());
        assert!(result.failure(Literal::ChartData).is_some());
    }

    #[test]
    fn test_custom_namespace() {
        let html = page("PC.chart_data = {used: [[1, 2]]};");
        let options = ExtractOptions {
            namespace: "PC".to_string(),
            ..Default::default()
        };
        assert!(extract(&html, &options).has_data());
        assert!(!extract(&html, &ExtractOptions::default()).script_found);
    }
}
