//! Common types and utilities for the SlackWeb Lua generator
//!
//! This crate contains the method metadata tree, the serialized artifact
//! format, and the error types shared by the scraper, generator, and CLI
//! components.

pub mod artifact;
pub mod tree;

pub use tree::{ArgumentSpec, Facts, MethodRecord, MethodTree, TreeNode};

use thiserror::Error;

/// Errors that can occur while scraping documentation or generating Lua
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
