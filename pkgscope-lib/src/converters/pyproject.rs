use super::{ConvertError, Converter, UNKNOWN_VERSION, file_name, parse_requirement, read_to_string};
use crate::model::{Dependency, Root};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Loads the standard `[project]` table of a `pyproject.toml`.
///
/// Only files that actually declare `[project]` are accepted, so a `pyproject.toml` that merely
/// configures tools is left to other strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PyProjectConverter;

#[derive(Debug, Deserialize)]
struct PyProject {
    project: Option<Project>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Project {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    license: Option<License>,
    #[serde(default)]
    authors: Vec<Person>,
    #[serde(default)]
    classifiers: Vec<String>,
    #[serde(default)]
    urls: BTreeMap<String, String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum License {
    Expression(String),
    Table {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        file: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct Person {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl Person {
    fn display(self) -> Option<String> {
        match (self.name, self.email) {
            (Some(name), Some(email)) => Some(format!("{name} <{email}>")),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }
}

fn read_pyproject(path: &Path) -> Result<PyProject, ConvertError> {
    let content = read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ConvertError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

impl Converter for PyProjectConverter {
    fn format(&self) -> &'static str {
        "pyproject"
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path) == "pyproject.toml" && read_pyproject(path).is_ok_and(|p| p.project.is_some())
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let Some(project) = read_pyproject(path)?.project else {
            return Err(ConvertError::MissingMetadata { path: path.to_path_buf() });
        };

        let mut root = Root::new(project.name, project.version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()));
        root.metadata.description = project.description;
        root.metadata.license = project.license.and_then(|license| match license {
            License::Expression(expr) => Some(expr),
            License::Table { text, file } => text.or(file),
        });
        root.metadata.authors = project.authors.into_iter().filter_map(Person::display).collect();
        root.metadata.classifiers = project.classifiers;
        root.metadata.links = project.urls.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect();

        let mut dependencies: Vec<Dependency> = project.dependencies.iter().filter_map(|r| parse_requirement(r)).collect();
        for (extra, requirements) in project.optional_dependencies {
            dependencies.extend(
                requirements
                    .iter()
                    .filter_map(|r| parse_requirement(r))
                    .map(|dep| dep.in_env(extra.as_str())),
            );
        }
        root.dependencies = dependencies;

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAIN_ENV;

    const PYPROJECT: &str = r#"
[build-system]
requires = ["setuptools"]

[project]
name = "demo"
version = "2.0"
description = "Demo project"
license = { text = "BSD-3-Clause" }
authors = [{ name = "Ada", email = "ada@example.com" }, { email = "team@example.com" }]
classifiers = ["Framework :: Django"]
dependencies = ["httpx>=0.25", "rich"]

[project.optional-dependencies]
test = ["pytest>=7"]

[project.urls]
Homepage = "https://example.com"
"#;

    #[test]
    fn test_can_parse_requires_project_table() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");

        std::fs::write(&path, "[tool.black]\nline-length = 100\n").unwrap();
        assert!(!PyProjectConverter.can_parse(&path));

        std::fs::write(&path, PYPROJECT).unwrap();
        assert!(PyProjectConverter.can_parse(&path));

        assert!(!PyProjectConverter.can_parse(&tmp.path().join("setup.cfg")));
    }

    #[test]
    fn test_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");
        std::fs::write(&path, PYPROJECT).unwrap();

        let root = PyProjectConverter.load(&path).unwrap();
        assert_eq!(root.raw_name, "demo");
        assert_eq!(root.version, "2.0");
        assert_eq!(root.metadata.description.as_deref(), Some("Demo project"));
        assert_eq!(root.metadata.license.as_deref(), Some("BSD-3-Clause"));
        assert_eq!(root.metadata.authors, ["Ada <ada@example.com>", "team@example.com"]);
        assert_eq!(root.metadata.links.get("homepage").map(String::as_str), Some("https://example.com"));

        assert_eq!(root.dependencies.len(), 3);
        assert!(root.dependencies[0].envs.contains(MAIN_ENV));
        assert_eq!(root.dependencies[2].name, "pytest");
        assert!(root.dependencies[2].envs.contains("test"));
    }

    #[test]
    fn test_license_expression() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");
        std::fs::write(&path, "[project]\nname = \"x\"\nlicense = \"MIT\"\n").unwrap();

        let root = PyProjectConverter.load(&path).unwrap();
        assert_eq!(root.metadata.license.as_deref(), Some("MIT"));
        assert_eq!(root.version, UNKNOWN_VERSION);
    }

    #[test]
    fn test_load_without_project_table() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pyproject.toml");
        std::fs::write(&path, "[tool.isort]\nprofile = \"black\"\n").unwrap();

        let err = PyProjectConverter.load(&path).unwrap_err();
        assert!(matches!(err, ConvertError::MissingMetadata { .. }));
    }
}
