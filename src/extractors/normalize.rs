//! Text-level repair of JavaScript object literals into JSON
//!
//! Rules, applied in order:
//! 1. `token:` becomes `"token":` for tokens made of `[A-Za-z0-9_$]`
//! 2. every `'` becomes `"`
//! 3. trailing commas before `}` or `]` are dropped
//! 4. `:true` / `:false` get a single space after the colon
//!
//! Quotes inside string values are not escaped, and string values containing
//! `word:` get mangled. Callers fall back to [`super::js_literal_to_json`] for those.

use std::sync::LazyLock;

use regex::Regex;

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Za-z0-9_$]+):").unwrap());
static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());
static BOOL_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s*(true|false)").unwrap());

pub fn normalize_literal(raw: &str) -> String {
    let quoted = BARE_KEY.replace_all(raw.trim(), "\"${1}\":");
    let double_quoted = quoted.replace('\'', "\"");
    let without_trailing = TRAILING_COMMA.replace_all(&double_quoted, "${1}");
    BOOL_VALUE.replace_all(&without_trailing, ": ${1}").into_owned()
}
