//! Fact-table and argument-list extraction from a method documentation page
//!
//! The page markup is treated as a stable contract: the fact table is the
//! table following the `#facts` heading, arguments live in
//! `.method_argument` blocks. A missing table or missing required fact is a
//! parse error that aborts the run.

use scraper::{ElementRef, Html, Selector};
use slackweb_luagen_common::{ArgumentSpec, Facts, GeneratorError, Result};
use std::collections::BTreeMap;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| GeneratorError::Parse(format!("Invalid selector {:?}: {}", css, e)))
}

fn cell_text(cell: ElementRef) -> String {
    let raw: String = cell.text().collect();
    raw.trim().trim_end_matches(':').to_string()
}

/// Parse the fact table of a method documentation page
///
/// Each row maps its header cell to its value cell, both with trailing
/// colons stripped. The `Works with` row (permission info) is dropped;
/// `Accepted content types` is split into a list. The three facts the
/// generator consumes must all be present.
pub fn extract_facts(doc: &Html) -> Result<Facts> {
    let row_selector = selector("#facts + table tr")?;
    let header_selector = selector("th")?;
    let value_selector = selector("td")?;

    let mut facts = BTreeMap::new();
    for row in doc.select(&row_selector) {
        let header = row.select(&header_selector).next().ok_or_else(|| {
            GeneratorError::Parse("Fact row is missing its header cell".to_string())
        })?;
        let value = row.select(&value_selector).next().ok_or_else(|| {
            GeneratorError::Parse("Fact row is missing its value cell".to_string())
        })?;
        facts.insert(cell_text(header), cell_text(value));
    }

    if facts.is_empty() {
        return Err(GeneratorError::Parse(
            "Facts table not found on the page".to_string(),
        ));
    }

    // Permission info is unused and weirdly formatted
    facts.remove("Works with");

    let content_types = facts.remove("Accepted content types").ok_or_else(|| {
        GeneratorError::Parse("Missing \"Accepted content types\" fact".to_string())
    })?;
    let http_method = facts.remove("Preferred HTTP method").ok_or_else(|| {
        GeneratorError::Parse("Missing \"Preferred HTTP method\" fact".to_string())
    })?;
    let method_url = facts
        .remove("Method URL")
        .ok_or_else(|| GeneratorError::Parse("Missing \"Method URL\" fact".to_string()))?;

    Ok(Facts {
        http_method,
        method_url,
        content_types: content_types.split(", ").map(String::from).collect(),
        extra: facts,
    })
}

/// Parse the declared arguments of a method documentation page
///
/// Returns an empty list when the page declares no arguments; that is not an
/// error. An argument block without a name anchor is.
pub fn extract_args(doc: &Html) -> Result<Vec<ArgumentSpec>> {
    let title_selector = selector(".method_argument > .arg_title")?;
    let name_selector = selector(r#"[name^="arg"]"#)?;
    let required_selector = selector(".arg_required")?;

    let mut args = Vec::new();
    for title in doc.select(&title_selector) {
        let name_el = title.select(&name_selector).next().ok_or_else(|| {
            GeneratorError::Parse("Argument block is missing its name anchor".to_string())
        })?;
        let name: String = name_el.text().collect::<String>().trim().to_string();
        let required = title.select(&required_selector).next().is_some();
        args.push(ArgumentSpec { name, required });
    }

    Ok(args)
}

/// Derive the namespace path from a method page URL
///
/// The last slash-segment of the URL is the dotted method identifier;
/// splitting it on `.` gives the tree path
/// (`.../methods/users.profile.get` becomes `["users", "profile", "get"]`).
pub fn method_path(url: &str) -> Result<Vec<String>> {
    let slug = url.rsplit('/').next().unwrap_or(url);
    let path: Vec<String> = slug.split('.').map(String::from).collect();

    if slug.is_empty() || path.iter().any(String::is_empty) {
        return Err(GeneratorError::Parse(format!(
            "Cannot derive a method path from URL {}",
            url
        )));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHOD_PAGE: &str = r##"
        <html><body>
        <h2 id="facts">Facts</h2>
        <table>
            <tr><th>Preferred HTTP method:</th><td>POST</td></tr>
            <tr><th>Accepted content types:</th><td>application/json, application/x-www-form-urlencoded</td></tr>
            <tr><th>Method URL:</th><td>https://slack.com/api/chat.postMessage</td></tr>
            <tr><th>Works with:</th><td>bot, user</td></tr>
            <tr><th>Has paging:</th><td>No</td></tr>
        </table>
        <div class="method_argument">
            <div class="arg_title">
                <a name="arg_token">token</a>
                <span class="arg_required">Required</span>
            </div>
        </div>
        <div class="method_argument">
            <div class="arg_title">
                <a name="arg_channel">channel</a>
            </div>
        </div>
        </body></html>
    "##;

    #[test]
    fn test_extract_facts() {
        let doc = Html::parse_document(METHOD_PAGE);
        let facts = extract_facts(&doc).unwrap();

        assert_eq!(facts.http_method, "POST");
        assert_eq!(facts.method_url, "https://slack.com/api/chat.postMessage");
        assert_eq!(
            facts.content_types,
            vec!["application/json", "application/x-www-form-urlencoded"]
        );
        assert_eq!(facts.extra.get("Has paging").map(String::as_str), Some("No"));
        // Permission info is dropped at scrape time
        assert!(!facts.extra.contains_key("Works with"));
    }

    #[test]
    fn test_extract_args_preserves_order_and_required_flags() {
        let doc = Html::parse_document(METHOD_PAGE);
        let args = extract_args(&doc).unwrap();

        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "token");
        assert!(args[0].required);
        assert_eq!(args[1].name, "channel");
        assert!(!args[1].required);
    }

    #[test]
    fn test_page_without_arguments_yields_empty_list() {
        let doc = Html::parse_document("<html><body><p>no args here</p></body></html>");
        assert!(extract_args(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_missing_facts_table_is_an_error() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(extract_facts(&doc).is_err());
    }

    #[test]
    fn test_missing_content_types_is_an_error() {
        let page = r##"
            <html><body>
            <h2 id="facts">Facts</h2>
            <table>
                <tr><th>Preferred HTTP method:</th><td>GET</td></tr>
                <tr><th>Method URL:</th><td>https://slack.com/api/api.test</td></tr>
            </table>
            </body></html>
        "##;
        let doc = Html::parse_document(page);
        assert!(extract_facts(&doc).is_err());
    }

    #[test]
    fn test_method_path_from_url() {
        assert_eq!(
            method_path("https://api.slack.com/methods/users.profile.get").unwrap(),
            vec!["users", "profile", "get"]
        );
        assert_eq!(
            method_path("https://api.slack.com/methods/api.test").unwrap(),
            vec!["api", "test"]
        );
    }

    #[test]
    fn test_method_path_rejects_trailing_slash() {
        assert!(method_path("https://api.slack.com/methods/").is_err());
    }
}
