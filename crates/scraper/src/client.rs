//! Blocking HTTP client for the documentation site

use scraper::{Html, Selector};
use slackweb_luagen_common::{GeneratorError, Result};
use std::time::Duration;
use url::Url;

/// Client for fetching and listing Slack API documentation pages
pub struct DocsClient {
    base: Url,
    http: reqwest::blocking::Client,
}

impl DocsClient {
    /// Documentation site root
    pub const DEFAULT_BASE_URL: &'static str = "https://api.slack.com";

    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Client rooted at an alternate base URL (used by tests against fixtures)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| GeneratorError::Fetch(format!("Invalid base URL {}: {}", base_url, e)))?;

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("slackweb-luagen/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeneratorError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base, http })
    }

    /// Fetch a page and parse it into an HTML document
    pub fn fetch(&self, url: &str) -> Result<Html> {
        let body = self
            .http
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| GeneratorError::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

        Ok(Html::parse_document(&body))
    }

    /// List the absolute URLs of every per-method documentation page
    ///
    /// Fetches the index page and returns the linked pages in listing order.
    /// No dedup and no validation of the count.
    pub fn list_method_pages(&self) -> Result<Vec<String>> {
        let index = self
            .base
            .join("/methods")
            .map_err(|e| GeneratorError::Fetch(format!("Invalid index URL: {}", e)))?;
        let doc = self.fetch(index.as_str())?;

        let link_selector = Selector::parse("tr > td > a.block")
            .map_err(|e| GeneratorError::Parse(format!("Invalid method link selector: {}", e)))?;

        let mut pages = Vec::new();
        for anchor in doc.select(&link_selector) {
            let href = anchor.value().attr("href").ok_or_else(|| {
                GeneratorError::Parse("Method index link is missing an href".to_string())
            })?;
            let absolute = self.base.join(href).map_err(|e| {
                GeneratorError::Parse(format!("Invalid method page link {}: {}", href, e))
            })?;
            pages.push(absolute.to_string());
        }

        Ok(pages)
    }
}
