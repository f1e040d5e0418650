//! Page fetching with an optional login session

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{Credentials, SiteConfig};
use crate::error::{Result, ScrapeError};

/// Blocking HTTP client with one cookie jar shared by login and page requests.
pub struct Fetcher {
    client: Client,
    site: SiteConfig,
}

impl Fetcher {
    pub fn new(site: SiteConfig) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client, site })
    }

    /// Log in when credentials are given, then GET `url` and return its body.
    ///
    /// Transport errors are logged and returned; nothing is retried.
    pub fn fetch(&self, url: &Url, credentials: Option<&Credentials>) -> Result<String> {
        if let Some(creds) = credentials {
            self.login(creds).inspect_err(|e| error!("Login request failed: {}", e))?;
        }

        self.get_page(url)
            .inspect_err(|e| error!("Error fetching {}: {}", url, e))
    }

    /// POST the login form. Only the session cookies it sets matter.
    fn login(&self, creds: &Credentials) -> Result<()> {
        let login_url = self.site.login_url()?;
        let return_url = self.site.return_url()?;
        info!("Logging in as {}", creds.email);

        let resp = self
            .client
            .post(login_url)
            .header(USER_AGENT, &self.site.user_agent)
            .header(ACCEPT, &self.site.accept)
            .form(&[
                ("return", return_url.as_str()),
                ("email", creds.email.as_str()),
                ("password", creds.password.as_str()),
            ])
            .send()?;

        debug!("Login responded with {}", resp.status());
        Ok(())
    }

    fn get_page(&self, url: &Url) -> Result<String> {
        let resp = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.site.user_agent)
            .header(ACCEPT, &self.site.accept)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            warn!("{} responded with {}", url, status);
        }

        resp.text().map_err(ScrapeError::from)
    }
}
