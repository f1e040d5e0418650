//! Price history scraper for PriceCharting product pages
//!
//! Fetches a product page (optionally after logging in), pulls the embedded
//! JavaScript data out of its inline script and writes it to disk:
//! - `price-history-<condition>.csv` per condition series
//! - `volume-data.csv` for traded volume
//! - `product-metadata.json` for the product object
//! - `page.html` and, for literals that fail to parse, debug text files

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod writer;

pub use config::{Credentials, SiteConfig, Target};
pub use error::{Result, ScrapeError};
pub use extractors::{extract, ExtractOptions, ExtractionResult};
pub use pipeline::{process_page, run, RunReport};
