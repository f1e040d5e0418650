//! Writing extracted data to disk
//!
//! Each output file is written on its own: a failure is logged and the
//! remaining files are still attempted. Nothing already written is removed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::error::{Result, ScrapeError};
use crate::extractors::{ExtractionResult, LiteralFailure};
use crate::models::{ChartData, ProductData, SeriesPoint, VolumeData};

pub const PAGE_FILE: &str = "page.html";
pub const VOLUME_FILE: &str = "volume-data.csv";
pub const METADATA_FILE: &str = "product-metadata.json";

pub fn price_history_file(condition: &str) -> String {
    let condition: String = condition
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("price-history-{}.csv", condition)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))
}

/// Save the fetched page as-is.
pub fn write_page(output_dir: &Path, html: &str) -> Result<PathBuf> {
    ensure_directory(output_dir)?;
    let path = output_dir.join(PAGE_FILE);
    fs::write(&path, html).map_err(|e| ScrapeError::io(&path, e))?;
    Ok(path)
}

/// Write the raw and normalized text of each failed literal.
pub fn write_debug_artifacts(output_dir: &Path, failures: &[LiteralFailure]) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for failure in failures {
        let stem = failure.literal.artifact_stem();
        let files = [
            (format!("debug-{}-original.txt", stem), &failure.raw),
            (format!("debug-{}-processed.txt", stem), &failure.normalized),
        ];
        for (name, contents) in files {
            let path = output_dir.join(name);
            match fs::write(&path, contents) {
                Ok(()) => {
                    info!("Saved debug text for {} to {}", failure.literal.property(), path.display());
                    written.push(path);
                }
                Err(e) => error!("{}", ScrapeError::io(&path, e)),
            }
        }
    }
    written
}

/// Write price CSVs, the volume CSV and product metadata into `output_dir`.
///
/// Only a failure to create `output_dir` is returned; per-file failures are
/// logged. Returns the files that were written.
pub fn write_outputs(result: &ExtractionResult, output_dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(output_dir)?;
    let mut written = Vec::new();

    for outcome in write_price_histories(&result.chart_data, output_dir) {
        collect(outcome, &mut written);
    }
    if let Some(outcome) = write_volume(&result.volume_data, output_dir) {
        collect(outcome, &mut written);
    }
    if let Some(outcome) = write_metadata(&result.product_data, output_dir) {
        collect(outcome, &mut written);
    }

    Ok(written)
}

fn collect(outcome: Result<PathBuf>, written: &mut Vec<PathBuf>) {
    match outcome {
        Ok(path) => written.push(path),
        Err(e) => error!("Error saving data: {}", e),
    }
}

fn write_price_histories(chart: &ChartData, output_dir: &Path) -> Vec<Result<PathBuf>> {
    chart
        .iter()
        .filter(|(_, points)| !points.is_empty())
        .map(|(condition, points)| -> Result<PathBuf> {
            let path = output_dir.join(price_history_file(condition));
            write_series(&path, "Price", points, format_cents)?;
            info!("Saved price history data for {} to {}", condition, path.display());
            Ok(path)
        })
        .collect()
}

fn write_volume(volume: &VolumeData, output_dir: &Path) -> Option<Result<PathBuf>> {
    let points = volume.volume.as_ref()?;
    let path = output_dir.join(VOLUME_FILE);
    Some(
        write_series(&path, "Volume", points, |v| v.to_string()).map(|()| {
            info!("Saved volume data to {}", path.display());
            path
        }),
    )
}

fn write_metadata(product: &ProductData, output_dir: &Path) -> Option<Result<PathBuf>> {
    if product.is_empty() {
        return None;
    }
    let path = output_dir.join(METADATA_FILE);
    let outcome = serde_json::to_string_pretty(product)
        .map_err(ScrapeError::from)
        .and_then(|json| fs::write(&path, json).map_err(|e| ScrapeError::io(&path, e)))
        .map(|()| {
            info!("Saved product metadata to {}", path.display());
            path
        });
    Some(outcome)
}

/// `Date,<value_header>` CSV, one row per point.
fn write_series(
    path: &Path,
    value_header: &str,
    points: &[SeriesPoint],
    format_value: impl Fn(i64) -> String,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| ScrapeError::csv(path, e))?;
    wtr.write_record(["Date", value_header])
        .map_err(|e| ScrapeError::csv(path, e))?;

    for point in points {
        let Some(date) = format_date(point.timestamp_ms) else {
            warn!("Skipping out of range timestamp {} in {}", point.timestamp_ms, path.display());
            continue;
        };
        wtr.write_record([date, format_value(point.value)])
            .map_err(|e| ScrapeError::csv(path, e))?;
    }

    wtr.flush().map_err(|e| ScrapeError::io(path, e))
}

/// Local calendar date of a millisecond timestamp, as `YYYY-MM-DD`.
pub fn format_date(timestamp_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d").to_string())
}

/// Cents as a decimal amount with two digits: `1050` -> `10.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
