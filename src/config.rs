//! Site configuration and run target resolution

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://www.pricecharting.com";
pub const DEFAULT_NAMESPACE: &str = "VGPC";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:138.0) Gecko/20100101 Firefox/138.0";
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml";

/// Where and how to talk to the site, and what to look for in its pages.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    /// Object the page assigns `chart_data`, `volume_data` and `product` onto
    pub namespace: String,
    pub user_agent: String,
    pub accept: String,
    /// Parse literals as JavaScript when the regex normalizer fails
    pub ast_recovery: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            ast_recovery: true,
        }
    }
}

impl SiteConfig {
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn login_url(&self) -> Result<Url> {
        Ok(self.base()?.join("/login")?)
    }

    /// Value of the login form's `return` field
    pub fn return_url(&self) -> Result<Url> {
        Ok(self.base()?.join("/")?)
    }

    /// `<base>/game/<collection>/<product_type>`
    pub fn product_url(&self, collection: &str, product_type: &str) -> Result<Url> {
        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["game", collection, product_type]);
        Ok(url)
    }
}

/// Login identity. Only built when both halves are present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_parts(email: Option<String>, password: Option<String>) -> Option<Self> {
        match (email, password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(Self { email, password })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Page to fetch and directory to write into for one run.
#[derive(Debug, Clone)]
pub struct Target {
    pub url: Url,
    pub output_dir: PathBuf,
}

impl Target {
    /// An explicit `url` overrides the collection/type composition. The output
    /// directory is always derived from collection and type.
    pub fn resolve(
        site: &SiteConfig,
        url: Option<&str>,
        collection: &str,
        product_type: &str,
        base_output: &Path,
    ) -> Result<Self> {
        let url = match url {
            Some(u) => Url::parse(u)?,
            None => site.product_url(collection, product_type)?,
        };
        Ok(Self {
            url,
            output_dir: output_dir(base_output, collection, product_type),
        })
    }
}

pub fn output_dir(base: &Path, collection: &str, product_type: &str) -> PathBuf {
    base.join(collection).join(product_type)
}
