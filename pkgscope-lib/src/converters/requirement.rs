//! Parsing of PEP 508 requirement strings.

use crate::model::Dependency;
use regex::Regex;
use std::sync::LazyLock;

static REQUIREMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[(?P<extras>[^\]]*)\])?\s*(?P<spec>[^;]*?)\s*(?:;\s*(?P<marker>.*?))?\s*$",
    )
    .expect("invalid regex")
});

static EXTRA_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"extra\s*==\s*['"]([^'"]+)['"]"#).expect("invalid regex"));

/// Parse one requirement such as `requests[socks] (>=2.0) ; extra == "net"`.
///
/// A marker naming an extra puts the dependency in that extra's environment; anything else lands
/// in the main environment. Returns `None` for blank or unparseable input.
#[must_use]
pub fn parse_requirement(text: &str) -> Option<Dependency> {
    let captures = REQUIREMENT_REGEX.captures(text)?;
    let name = captures.name("name")?.as_str();

    let spec = captures.name("spec").map_or("", |m| m.as_str().trim());
    let spec = spec
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(spec)
        .trim();

    let mut dep = Dependency::new(name, spec.replace(' ', ""));

    if let Some(marker) = captures.name("marker").map(|m| m.as_str().trim()).filter(|m| !m.is_empty()) {
        if let Some(extra) = EXTRA_REGEX.captures(marker).and_then(|c| c.get(1)) {
            dep = dep.in_env(extra.as_str());
        }
        dep.marker = Some(marker.to_string());
    }

    Some(dep)
}

/// Parse the `requires.txt` file found in egg-info folders and source distributions.
///
/// Lines before any section header are main dependencies. A `[name]` or `[name:marker]` header
/// starts the requirements of extra `name`; a `[:marker]` header keeps the main environment but
/// attaches the marker.
#[must_use]
pub fn parse_requires_txt(content: &str) -> Vec<Dependency> {
    let mut deps = Vec::new();
    let mut extra: Option<String> = None;
    let mut section_marker: Option<String> = None;

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let (name, marker) = header.split_once(':').unwrap_or((header, ""));
            extra = Some(name.trim()).filter(|n| !n.is_empty()).map(ToString::to_string);
            section_marker = Some(marker.trim()).filter(|m| !m.is_empty()).map(ToString::to_string);
            continue;
        }

        let Some(mut dep) = parse_requirement(line) else {
            continue;
        };

        if let Some(extra) = &extra {
            dep = dep.in_env(extra.as_str());
        }

        if let Some(marker) = &section_marker {
            dep.marker = Some(match dep.marker.take() {
                Some(own) => format!("({own}) and ({marker})"),
                None => marker.clone(),
            });
        }

        deps.push(dep);
    }

    deps
}
