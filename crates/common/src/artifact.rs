//! Serialized method-tree artifact
//!
//! The tree is written to disk as pretty-printed JSON (`slackweb.json`) so
//! the generator can run from a previous scrape instead of hitting the
//! documentation site again. The artifact is the only interchange point
//! between the two pipeline stages.

use crate::{GeneratorError, MethodTree, Result};
use std::fs;
use std::path::Path;

/// Load a method tree from a JSON artifact file
pub fn load(path: &Path) -> Result<MethodTree> {
    let content = fs::read_to_string(path).map_err(|e| {
        GeneratorError::Parse(format!("Failed to read artifact file {:?}: {}", path, e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        GeneratorError::Parse(format!("Failed to parse artifact JSON from {:?}: {}", path, e))
    })
}

/// Write a method tree to a JSON artifact file
pub fn save(path: &Path, tree: &MethodTree) -> Result<()> {
    let json = serde_json::to_string_pretty(tree)?;
    fs::write(path, json).map_err(|e| {
        GeneratorError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write artifact file {:?}: {}", path, e),
        ))
    })?;
    Ok(())
}
