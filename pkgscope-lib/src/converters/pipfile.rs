use super::{ConvertError, Converter, UNKNOWN_VERSION, file_name, manifest_root_name, read_to_string};
use crate::model::{DEV_ENV, Dependency, MAIN_ENV, Root};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Loads `Pipfile` manifests: `[packages]` are main dependencies, `[dev-packages]` dev ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipfileConverter;

#[derive(Debug, Deserialize)]
struct Pipfile {
    #[serde(default)]
    packages: BTreeMap<String, PipfileEntry>,
    #[serde(default, rename = "dev-packages")]
    dev_packages: BTreeMap<String, PipfileEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PipfileEntry {
    Version(String),
    Detailed {
        #[serde(default)]
        version: Option<String>,
        #[serde(default)]
        markers: Option<String>,
    },
}

impl PipfileEntry {
    fn into_dependency(self, name: &str, env: &str) -> Dependency {
        let (version, markers) = match self {
            Self::Version(version) => (Some(version), None),
            Self::Detailed { version, markers } => (version, markers),
        };

        let constraint = version.filter(|v| v.trim() != "*").unwrap_or_default();
        let mut dep = Dependency::new(name, constraint.replace(' ', "")).in_env(env);
        dep.marker = markers;
        dep
    }
}

impl Converter for PipfileConverter {
    fn format(&self) -> &'static str {
        "pipfile"
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path) == "Pipfile"
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let content = read_to_string(path)?;
        let pipfile: Pipfile = toml::from_str(&content).map_err(|source| ConvertError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        let mut root = Root::new(manifest_root_name(path), UNKNOWN_VERSION);
        root.dependencies = pipfile
            .packages
            .into_iter()
            .map(|(name, entry)| entry.into_dependency(&name, MAIN_ENV))
            .chain(
                pipfile
                    .dev_packages
                    .into_iter()
                    .map(|(name, entry)| entry.into_dependency(&name, DEV_ENV)),
            )
            .collect();

        Ok(root)
    }
}
