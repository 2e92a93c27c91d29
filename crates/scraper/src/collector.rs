//! Sequential collection of every method page into a tree

use crate::client::DocsClient;
use crate::extract::{extract_args, extract_facts, method_path};
use indicatif::ProgressBar;
use slackweb_luagen_common::{MethodRecord, MethodTree, Result};

/// Orchestrates the scrape: index listing, per-page extraction, insertion
///
/// Pages are processed one at a time in listing order. The first fetch or
/// parse failure aborts the run with no partial tree.
pub struct Collector {
    client: DocsClient,
}

impl Collector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: DocsClient::new()?,
        })
    }

    pub fn with_client(client: DocsClient) -> Self {
        Self { client }
    }

    /// Scrape every documented method into a [`MethodTree`]
    pub fn collect(&self) -> Result<MethodTree> {
        let pages = self.client.list_method_pages()?;
        let progress = ProgressBar::new(pages.len() as u64);

        let mut tree = MethodTree::new();
        for url in &pages {
            let doc = self.client.fetch(url)?;
            let record = MethodRecord {
                metadata: extract_facts(&doc)?,
                args: extract_args(&doc)?,
            };
            tree.insert(&method_path(url)?, record)?;
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(tree)
    }
}
