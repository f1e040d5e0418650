//! Data embedded in a product page

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// One `[timestamp_ms, value]` entry of a series.
///
/// Accepts integer or float numbers; floats are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "(Number, Number)")]
pub struct SeriesPoint {
    pub timestamp_ms: i64,
    pub value: i64,
}

impl SeriesPoint {
    pub fn new(timestamp_ms: i64, value: i64) -> Self {
        Self { timestamp_ms, value }
    }
}

fn number_to_i64(n: &Number) -> Result<i64, String> {
    if let Some(v) = n.as_i64() {
        return Ok(v);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f.round() as i64)
        }
        _ => Err(format!("number out of range: {}", n)),
    }
}

impl TryFrom<(Number, Number)> for SeriesPoint {
    type Error = String;

    fn try_from((ts, value): (Number, Number)) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp_ms: number_to_i64(&ts)?,
            value: number_to_i64(&value)?,
        })
    }
}

/// Price series in cents keyed by condition (`used`, `new`, ...).
pub type ChartData = BTreeMap<String, Vec<SeriesPoint>>;

/// Traded unit counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VolumeData {
    #[serde(default)]
    pub volume: Option<Vec<SeriesPoint>>,
}

impl VolumeData {
    pub fn is_empty(&self) -> bool {
        self.volume.is_none()
    }
}

/// Catalog metadata, kept as-is and in page order.
pub type ProductData = Map<String, Value>;
