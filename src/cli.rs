use std::path::PathBuf;

use clap::Parser;
use price_history::config::{DEFAULT_BASE_URL, DEFAULT_NAMESPACE};
use price_history::SiteConfig;

/// Download a PriceCharting product page and save its price history
#[derive(Parser, Debug)]
#[command(name = "price-history", version)]
#[command(about = "Extract price, volume and product data from a PriceCharting page", long_about = None)]
pub struct Cli {
    /// Page URL; overrides the collection/type composition
    #[arg(short, long)]
    pub url: Option<String>,

    /// Collection name (e.g. pokemon-silver-tempest)
    #[arg(short, long, default_value = "pokemon-silver-tempest")]
    pub collection: String,

    /// Product type (e.g. booster-box)
    #[arg(short = 't', long = "type", default_value = "booster-box")]
    pub product_type: String,

    /// Base output directory
    #[arg(short, long, default_value = "data")]
    pub output: PathBuf,

    /// Email for login
    #[arg(short, long, env = "PRICECHARTING_EMAIL")]
    pub email: Option<String>,

    /// Password for login
    #[arg(short, long, env = "PRICECHARTING_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Site base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub site: String,

    /// Script object holding chart_data, volume_data and product
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Leave literals empty when the text normalizer fails
    #[arg(long)]
    pub no_ast_recovery: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            base_url: self.site.clone(),
            namespace: self.namespace.clone(),
            ast_recovery: !self.no_ast_recovery,
            ..SiteConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["price-history"]).unwrap();
        assert_eq!(cli.collection, "pokemon-silver-tempest");
        assert_eq!(cli.product_type, "booster-box");
        assert_eq!(cli.output, PathBuf::from("data"));
        assert!(cli.url.is_none());
        assert!(cli.site_config().ast_recovery);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "price-history",
            "-c",
            "pokemon-evolving-skies",
            "-t",
            "elite-trainer-box",
            "-o",
            "out",
            "-u",
            "https://example.com/p",
            "--no-ast-recovery",
        ])
        .unwrap();
        assert_eq!(cli.collection, "pokemon-evolving-skies");
        assert_eq!(cli.product_type, "elite-trainer-box");
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.url.as_deref(), Some("https://example.com/p"));
        assert!(!cli.site_config().ast_recovery);
    }
}
