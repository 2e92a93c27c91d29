//! Documentation scraping for the Slack Web API
//!
//! This crate turns the method documentation pages at
//! <https://api.slack.com/methods> into a [`MethodTree`]:
//! one fetch of the index page to list every method, then one fetch per
//! method page to extract its fact table and argument list.
//!
//! Scraping is fully sequential and blocking. Any fetch or parse failure
//! aborts the whole run; there is no retry and no partial tree.
//!
//! [`MethodTree`]: slackweb_luagen_common::MethodTree

mod client;
mod collector;
mod extract;

pub use client::DocsClient;
pub use collector::Collector;
pub use extract::{extract_args, extract_facts, method_path};
