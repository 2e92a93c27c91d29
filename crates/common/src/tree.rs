//! The method metadata tree
//!
//! The Slack Web API groups its methods by dotted namespace paths
//! (`chat.postMessage`, `users.profile.get`). The scraper builds a tree keyed
//! by those path segments; the generator walks it to emit one Lua table per
//! namespace and one call-wrapper per method.
//!
//! Nodes are an explicit tagged union rather than a raw nested mapping, so a
//! namespace segment that happens to be named `metadata` or `args` can never
//! be mistaken for a method record. The serialized form stays compatible with
//! the artifact layout: a leaf is an object with exactly the keys `metadata`
//! and `args`.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scraped fact table for one API method
///
/// Field names carry serde renames matching the fact labels on the
/// documentation page, which are also the artifact's on-disk keys. Any fact
/// row beyond the three the generator consumes is preserved in `extra`; the
/// `Works with` row is dropped at scrape time and never reaches this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facts {
    /// HTTP verb the method prefers; validated at generation time
    #[serde(rename = "Preferred HTTP method")]
    pub http_method: String,

    /// Full URL of the wire endpoint (e.g. "https://slack.com/api/chat.postMessage")
    #[serde(rename = "Method URL")]
    pub method_url: String,

    /// MIME types the endpoint accepts, in documented order
    #[serde(rename = "Accepted content types")]
    pub content_types: Vec<String>,

    /// Remaining fact rows, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Facts {
    /// Wire endpoint name: the last slash-segment of the method URL
    pub fn endpoint(&self) -> &str {
        self.method_url
            .rsplit('/')
            .next()
            .unwrap_or(&self.method_url)
    }
}

/// One declared argument of an API method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    pub required: bool,
}

/// Terminal tree node: the scraped metadata for one API method
///
/// `deny_unknown_fields` keeps the serialized key set to exactly
/// `{"metadata", "args"}`, which is what distinguishes a leaf from a
/// namespace object in the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodRecord {
    pub metadata: Facts,
    pub args: Vec<ArgumentSpec>,
}

/// A node in the method tree: either a namespace grouping or a method record
///
/// Serialization is untagged with `Method` first, so an object deserializes
/// as a leaf iff it matches the exact `MethodRecord` shape and falls back to
/// a namespace mapping otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Method(MethodRecord),
    Namespace(BTreeMap<String, TreeNode>),
}

impl TreeNode {
    /// Fresh empty namespace node
    pub fn namespace() -> Self {
        TreeNode::Namespace(BTreeMap::new())
    }

    pub fn is_method(&self) -> bool {
        matches!(self, TreeNode::Method(_))
    }
}

/// Rooted method tree, built once by path-guided insertion
///
/// Children are held in a `BTreeMap`, so iteration (and therefore generated
/// output) is lexicographic and stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodTree {
    pub root: BTreeMap<String, TreeNode>,
}

impl MethodTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a method record at the location named by `path`
    ///
    /// Intermediate namespace nodes are created as needed. Re-inserting at an
    /// existing path replaces the prior record (last-write-wins); inserting
    /// through an existing leaf replaces that leaf with a fresh namespace.
    /// An empty path is an error.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], record: MethodRecord) -> Result<()> {
        if path.is_empty() {
            return Err(GeneratorError::Parse(
                "cannot insert a method record at an empty path".to_string(),
            ));
        }
        insert_at(&mut self.root, path, record);
        Ok(())
    }

    /// Look up the node at `path`, if any
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode> {
        let mut children = &self.root;
        let (last, parents) = path.split_last()?;
        for seg in parents {
            match children.get(seg.as_ref())? {
                TreeNode::Namespace(map) => children = map,
                TreeNode::Method(_) => return None,
            }
        }
        children.get(last.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of method records in the tree
    pub fn method_count(&self) -> usize {
        fn count(children: &BTreeMap<String, TreeNode>) -> usize {
            children
                .values()
                .map(|node| match node {
                    TreeNode::Method(_) => 1,
                    TreeNode::Namespace(map) => count(map),
                })
                .sum()
        }
        count(&self.root)
    }
}

fn insert_at<S: AsRef<str>>(
    children: &mut BTreeMap<String, TreeNode>,
    path: &[S],
    record: MethodRecord,
) {
    match path {
        [] => {}
        [last] => {
            children.insert(last.as_ref().to_string(), TreeNode::Method(record));
        }
        [head, rest @ ..] => {
            let child = children
                .entry(head.as_ref().to_string())
                .or_insert_with(TreeNode::namespace);
            if child.is_method() {
                *child = TreeNode::namespace();
            }
            if let TreeNode::Namespace(map) = child {
                insert_at(map, rest, record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(verb: &str) -> MethodRecord {
        MethodRecord {
            metadata: Facts {
                http_method: verb.to_string(),
                method_url: "https://slack.com/api/x.y".to_string(),
                content_types: vec!["application/json".to_string()],
                extra: BTreeMap::new(),
            },
            args: vec![],
        }
    }

    #[test]
    fn test_inserted_leaves_classify_as_methods() {
        let mut tree = MethodTree::new();
        tree.insert(&["chat", "postMessage"], record("POST")).unwrap();
        tree.insert(&["api", "test"], record("GET")).unwrap();

        assert!(tree.get(&["chat", "postMessage"]).unwrap().is_method());
        assert!(tree.get(&["api", "test"]).unwrap().is_method());
        assert!(!tree.get(&["chat"]).unwrap().is_method());
        assert_eq!(tree.method_count(), 2);
    }

    #[test]
    fn test_sibling_insertion_is_order_independent() {
        let mut tree = MethodTree::new();
        tree.insert(&["a", "b"], record("GET")).unwrap();
        tree.insert(&["a", "c"], record("POST")).unwrap();

        let TreeNode::Namespace(children) = tree.get(&["a"]).unwrap() else {
            panic!("expected namespace at a");
        };
        let names: Vec<&str> = children.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(children.values().all(TreeNode::is_method));
    }

    #[test]
    fn test_reinsertion_keeps_last_payload() {
        let mut tree = MethodTree::new();
        tree.insert(&["a", "b"], record("GET")).unwrap();
        tree.insert(&["a", "b"], record("POST")).unwrap();

        let TreeNode::Method(rec) = tree.get(&["a", "b"]).unwrap() else {
            panic!("expected method at a.b");
        };
        assert_eq!(rec.metadata.http_method, "POST");
        assert_eq!(tree.method_count(), 1);
    }

    #[test]
    fn test_insert_through_a_leaf_replaces_it() {
        let mut tree = MethodTree::new();
        tree.insert(&["a"], record("GET")).unwrap();
        tree.insert(&["a", "b"], record("POST")).unwrap();

        assert!(!tree.get(&["a"]).unwrap().is_method());
        assert!(tree.get(&["a", "b"]).unwrap().is_method());
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let mut tree = MethodTree::new();
        let empty: &[&str] = &[];
        assert!(tree.insert(empty, record("GET")).is_err());
    }

    #[test]
    fn test_segments_named_metadata_or_args_stay_namespaces() {
        let mut tree = MethodTree::new();
        tree.insert(&["metadata", "args", "get"], record("GET"))
            .unwrap();

        assert!(!tree.get(&["metadata"]).unwrap().is_method());
        assert!(!tree.get(&["metadata", "args"]).unwrap().is_method());
        assert!(tree.get(&["metadata", "args", "get"]).unwrap().is_method());
    }

    #[test]
    fn test_endpoint_is_last_url_segment() {
        let rec = record("POST");
        assert_eq!(rec.metadata.endpoint(), "x.y");
    }
}
