use super::ResolveError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use toml::{Table, Value};

/// Name of the tool table inside `pyproject.toml`.
const TOOL_TABLE: &str = "pkgscope";

/// A `from` or `to` section: where a project keeps its dependency file and in which format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

impl Section {
    /// True when the section sets neither field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.path.is_none() && self.format.is_none()
    }

    /// Fields set in `upper` take precedence over ours.
    fn overlay(self, upper: Self) -> Self {
        Self {
            path: upper.path.or(self.path),
            format: upper.format.or(self.format),
        }
    }
}

/// Project settings from the `[tool.pkgscope]` table of a `pyproject.toml`.
///
/// Settings are layered: `from`/`to` directly under `[tool.pkgscope]` apply to every environment,
/// and those under `[tool.pkgscope.<env>]` override them field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    from: Option<Section>,
    to: Option<Section>,
}

impl ProjectConfig {
    /// Load the layered settings for `env`, or `None` when the file has no `[tool.pkgscope]` table.
    pub fn attach_file(path: &Path, env: &str) -> Result<Option<Self>, ResolveError> {
        let text = fs::read_to_string(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config_err = |source| ResolveError::Config {
            path: path.to_path_buf(),
            source,
        };

        let document: Table = toml::from_str(&text).map_err(config_err)?;
        let Some(tool) = document
            .get("tool")
            .and_then(Value::as_table)
            .and_then(|tool| tool.get(TOOL_TABLE))
            .and_then(Value::as_table)
        else {
            return Ok(None);
        };

        let env_table = tool.get(env).and_then(Value::as_table);
        let layered = |key: &str| -> Result<Option<Section>, toml::de::Error> {
            let base = section_in(tool, key)?;
            let upper = match env_table {
                Some(table) => section_in(table, key)?,
                None => None,
            };

            Ok(match (base, upper) {
                (Some(base), Some(upper)) => Some(base.overlay(upper)),
                (base, upper) => upper.or(base),
            })
        };

        Ok(Some(Self {
            from: layered("from").map_err(config_err)?,
            to: layered("to").map_err(config_err)?,
        }))
    }

    /// Look up a section by name; only `from` and `to` exist.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Section> {
        match key {
            "from" => self.from.as_ref(),
            "to" => self.to.as_ref(),
            _ => None,
        }
    }
}

fn section_in(table: &Table, key: &str) -> Result<Option<Section>, toml::de::Error> {
    match table.get(key) {
        Some(value @ Value::Table(_)) => value.clone().try_into().map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(content: &str) -> Option<ProjectConfig> {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");
        fs::write(&path, content).unwrap();
        ProjectConfig::attach_file(&path, "main").unwrap()
    }

    #[test]
    fn test_no_tool_table() {
        assert!(attach("[project]\nname = \"x\"\n").is_none());
        assert!(attach("[tool.black]\nline-length = 88\n").is_none());
    }

    #[test]
    fn test_env_sections() {
        let config = attach(
            r#"
[tool.pkgscope.main]
from = { format = "pip", path = "requirements.in" }
to = { format = "piplock", path = "requirements.txt" }
"#,
        )
        .unwrap();

        let from = config.section("from").unwrap();
        assert_eq!(from.format.as_deref(), Some("pip"));
        assert_eq!(from.path.as_deref(), Some("requirements.in"));

        let to = config.section("to").unwrap();
        assert_eq!(to.path.as_deref(), Some("requirements.txt"));
        assert!(config.section("other").is_none());
    }

    #[test]
    fn test_env_overrides_base_field_by_field() {
        let config = attach(
            r#"
[tool.pkgscope]
from = { format = "pip", path = "requirements.txt" }

[tool.pkgscope.main]
from = { path = "reqs/main.txt" }

[tool.pkgscope.docs]
from = { path = "reqs/docs.txt" }
"#,
        )
        .unwrap();

        let from = config.section("from").unwrap();
        assert_eq!(from.format.as_deref(), Some("pip"));
        assert_eq!(from.path.as_deref(), Some("reqs/main.txt"));
        assert!(config.section("to").is_none());
    }

    #[test]
    fn test_missing_env_uses_base() {
        let config = attach(
            r#"
[tool.pkgscope]
to = { format = "pipfile", path = "Pipfile" }
"#,
        )
        .unwrap();

        assert_eq!(config.section("to").unwrap().format.as_deref(), Some("pipfile"));
    }

    #[test]
    fn test_empty_table_is_an_empty_section() {
        let config = attach("[tool.pkgscope.main.to]\n").unwrap();
        assert!(config.section("to").unwrap().is_empty());
        assert!(config.section("from").is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");
        fs::write(&path, "[tool.pkgscope\n").unwrap();

        let err = ProjectConfig::attach_file(&path, "main").unwrap_err();
        assert!(matches!(err, ResolveError::Config { .. }));
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");
        fs::write(&path, "[tool.pkgscope.main]\nfrom = { path = 42 }\n").unwrap();

        let err = ProjectConfig::attach_file(&path, "main").unwrap_err();
        assert!(matches!(err, ResolveError::Config { .. }));
    }
}
