//! Core metadata (`PKG-INFO` / `METADATA`) parsing.

use super::requirement::parse_requirement;
use crate::model::Root;

/// Placeholder setuptools writes for fields that were never set.
const UNKNOWN: &str = "UNKNOWN";

/// Parse core metadata headers into a root.
///
/// Headers are `Key: value` lines, with indented lines continuing the previous value, even when
/// they hold nothing but whitespace. Parsing stops at the first empty line, where the long
/// description starts. Returns `None` when the mandatory `Name` header is missing.
#[must_use]
pub fn parse_core_metadata(content: &str) -> Option<Root> {
    let headers = parse_headers(content);
    let first = |key: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty() && *v != UNKNOWN)
    };
    let all = |key: &'static str| {
        headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    };

    let mut root = Root::new(first("Name")?, first("Version").unwrap_or(super::UNKNOWN_VERSION));

    root.metadata.description = first("Summary").map(ToString::to_string);
    root.metadata.license = first("License-Expression").or_else(|| first("License")).map(ToString::to_string);
    root.metadata.authors = authors(first("Author"), first("Author-email"));
    root.metadata.classifiers = all("Classifier").map(ToString::to_string).collect();

    if let Some(home) = first("Home-page") {
        let _ = root.metadata.links.insert("homepage".to_string(), home.to_string());
    }
    if let Some(download) = first("Download-URL") {
        let _ = root.metadata.links.insert("download".to_string(), download.to_string());
    }
    for project_url in all("Project-URL") {
        if let Some((label, url)) = project_url.split_once(',') {
            let _ = root
                .metadata
                .links
                .insert(label.trim().to_lowercase(), url.trim().to_string());
        }
    }

    root.dependencies = all("Requires-Dist").filter_map(parse_requirement).collect();

    Some(root)
}

fn parse_headers(content: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();

    for line in content.lines() {
        if line.starts_with([' ', '\t']) {
            if let Some((_, value)) = headers.last_mut() {
                value.push('\n');
                value.push_str(line.trim());
            }
            continue;
        }

        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    headers
}

fn authors(author: Option<&str>, email: Option<&str>) -> Vec<String> {
    match (author, email) {
        (Some(author), Some(email)) if !email.contains('<') && !email.contains(',') => {
            vec![format!("{author} <{email}>")]
        }
        _ => author
            .into_iter()
            .map(ToString::to_string)
            .chain(email.into_iter().flat_map(|e| e.split(',')).map(|e| e.trim().to_string()))
            .filter(|a| !a.is_empty())
            .collect(),
    }
}
