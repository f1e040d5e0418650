//! Fetch, extract and write for one product page

use std::path::{Path, PathBuf};

use tracing::{error, info};
use url::Url;

use crate::config::{Credentials, SiteConfig, Target};
use crate::error::Result;
use crate::extractors::{extract, ExtractOptions, LiteralFailure};
use crate::fetch::Fetcher;
use crate::writer;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub url: Option<Url>,
    pub output_dir: PathBuf,
    /// Chart data was present and decoded
    pub data_found: bool,
    pub written: Vec<PathBuf>,
    /// Literals that failed normalization, recovered or not
    pub failed: Vec<LiteralFailure>,
}

impl From<&SiteConfig> for ExtractOptions {
    fn from(site: &SiteConfig) -> Self {
        Self {
            namespace: site.namespace.clone(),
            ast_recovery: site.ast_recovery,
        }
    }
}

/// Fetch `target.url` (logging in first when credentials are given) and
/// write everything found into `target.output_dir`.
///
/// Only network errors, bad URLs and an unusable output directory fail the
/// run; extraction and per-file problems are logged.
pub fn run(site: &SiteConfig, target: &Target, credentials: Option<&Credentials>) -> Result<RunReport> {
    info!("Fetching data from {}...", target.url);
    let fetcher = Fetcher::new(site.clone())?;
    let html = fetcher.fetch(&target.url, credentials)?;

    let mut report = process_page(&html, &ExtractOptions::from(site), &target.output_dir)?;
    report.url = Some(target.url.clone());
    Ok(report)
}

/// Everything after the fetch: save the page, extract, write outputs.
pub fn process_page(html: &str, options: &ExtractOptions, output_dir: &Path) -> Result<RunReport> {
    writer::ensure_directory(output_dir)?;

    let mut report = RunReport {
        url: None,
        output_dir: output_dir.to_path_buf(),
        data_found: false,
        written: Vec::new(),
        failed: Vec::new(),
    };

    match writer::write_page(output_dir, html) {
        Ok(path) => report.written.push(path),
        Err(e) => error!("{}", e),
    }

    info!("Extracting price history data...");
    let result = extract(html, options);

    report
        .written
        .extend(writer::write_debug_artifacts(output_dir, &result.failures));
    report.failed = result.failures.clone();

    if !result.has_data() {
        info!("No price history data found");
        return Ok(report);
    }

    info!("Price history data extracted, saving to CSV...");
    report.data_found = true;
    report
        .written
        .extend(writer::write_outputs(&result, output_dir)?);

    Ok(report)
}
