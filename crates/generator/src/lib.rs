//! Lua client generation from a method tree
//!
//! Walks the [`MethodTree`] pre-order depth-first and emits a complete Lua
//! source file: a fixed preamble (HTTP dispatch helpers, required-argument
//! validator, response-envelope check), one nested table per namespace, and
//! one fully specialized call-wrapper per method. Verb, content type, and the
//! required-argument guard are baked into each wrapper at generation time.
//!
//! Output order is total (namespace children are lexicographic), so the same
//! tree always produces byte-identical text.

mod templates;

use slackweb_luagen_common::{
    GeneratorError, MethodRecord, MethodTree, Result, TreeNode,
};
use std::collections::BTreeMap;
use tera::Tera;

/// Name of the root Lua table the generated library exports
pub const ROOT_TABLE: &str = "SlackWeb";

/// Base URL baked into the generated library's dispatch helper
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api/";

/// HTTP verbs the generated dispatch helpers support
///
/// The generator only has Lua sugar for these two; any other documented verb
/// fails generation loudly instead of emitting a wrapper that cannot work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            other => Err(GeneratorError::UnsupportedMethod(other.to_string())),
        }
    }

    /// Name of the matching Lua dispatch helper
    pub fn lua_helper(self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
        }
    }
}

/// Request body encodings the generated wrappers choose between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Json,
    UrlEncoded,
}

impl ContentEncoding {
    /// JSON whenever the endpoint accepts it, urlencoded otherwise
    pub fn select(content_types: &[String]) -> Self {
        if content_types.iter().any(|t| t == "application/json") {
            ContentEncoding::Json
        } else {
            ContentEncoding::UrlEncoded
        }
    }

    /// Token in the generated library's `mime` table
    pub fn lua_token(self) -> &'static str {
        match self {
            ContentEncoding::Json => "mime.json",
            ContentEncoding::UrlEncoded => "mime.urlenc",
        }
    }
}

/// Lua client generator
///
/// Stateless across calls: `generate` threads its output buffer through the
/// recursive walk and is idempotent for a given tree.
pub struct LuaGenerator {
    tera: Tera,
    base_url: String,
}

impl LuaGenerator {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Generator whose emitted library targets an alternate API root
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            tera,
            base_url: base_url.to_string(),
        })
    }

    /// Generate the complete Lua source for `tree`
    pub fn generate(&self, tree: &MethodTree) -> Result<String> {
        let mut out = String::new();
        self.emit_preamble(&mut out)?;
        self.emit_namespace(&tree.root, ROOT_TABLE, &mut out)?;
        emit_epilogue(&mut out);
        Ok(out)
    }

    /// Render the fixed boilerplate: requires, mime table, dispatch helpers
    fn emit_preamble(&self, out: &mut String) -> Result<()> {
        let mut context = tera::Context::new();
        context.insert("base_url", &self.base_url);

        let rendered = self
            .tera
            .render("preamble.lua", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        out.push_str(&rendered);
        out.push('\n');
        Ok(())
    }

    /// Emit one namespace table, then recurse into namespace children
    ///
    /// Method children become members of this table; namespace children each
    /// get their own `Prefix.child = { ... }` declaration afterwards.
    fn emit_namespace(
        &self,
        children: &BTreeMap<String, TreeNode>,
        prefix: &str,
        out: &mut String,
    ) -> Result<()> {
        out.push_str(prefix);
        out.push_str(" = {\n");
        for (name, node) in children {
            if let TreeNode::Method(record) = node {
                self.emit_method(record, name, out)?;
            }
        }
        out.push_str("}\n\n");

        for (name, node) in children {
            if let TreeNode::Namespace(map) = node {
                let qualified = format!("{}.{}", prefix, name);
                self.emit_namespace(map, &qualified, out)?;
            }
        }
        Ok(())
    }

    /// Emit the call-wrapper binding for one method
    fn emit_method(&self, record: &MethodRecord, name: &str, out: &mut String) -> Result<()> {
        let verb = HttpVerb::parse(&record.metadata.http_method)?;
        let encoding = ContentEncoding::select(&record.metadata.content_types);
        let guard = required_guard(record);

        out.push_str(&format!(
            "    {} = {}(\"{}\", {}, {}),\n",
            name,
            verb.lua_helper(),
            record.metadata.endpoint(),
            encoding.lua_token(),
            guard,
        ));
        Ok(())
    }
}

/// Build the `required{...}` guard listing the required argument names
/// in declaration order
fn required_guard(record: &MethodRecord) -> String {
    let names: Vec<String> = record
        .args
        .iter()
        .filter(|a| a.required)
        .map(|a| format!("\"{}\"", a.name))
        .collect();
    format!("required{{{}}}", names.join(", "))
}

/// Final export statement exposing the root table
fn emit_epilogue(out: &mut String) {
    out.push_str("return ");
    out.push_str(ROOT_TABLE);
    out.push('\n');
}

/// Generate the Lua client (convenience function)
pub fn generate_lua(tree: &MethodTree) -> Result<String> {
    LuaGenerator::new()?.generate(tree)
}
