use super::{ConvertError, Converter, UNKNOWN_VERSION, file_name, manifest_root_name, read_to_string};
use crate::model::{DEV_ENV, Dependency, MAIN_ENV, Root};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Loads `Pipfile.lock`: the `default` group holds main dependencies, `develop` dev ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipfileLockConverter;

#[derive(Debug, Deserialize)]
struct PipfileLock {
    #[serde(default)]
    default: BTreeMap<String, LockedPackage>,
    #[serde(default)]
    develop: BTreeMap<String, LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    markers: Option<String>,
}

fn locked_dependencies(packages: BTreeMap<String, LockedPackage>, env: &'static str) -> impl Iterator<Item = Dependency> {
    packages.into_iter().map(move |(name, package)| {
        let mut dep = Dependency::new(name, package.version.unwrap_or_default()).in_env(env);
        dep.marker = package.markers;
        dep
    })
}

impl Converter for PipfileLockConverter {
    fn format(&self) -> &'static str {
        "pipfilelock"
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path) == "Pipfile.lock"
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let content = read_to_string(path)?;
        let lock: PipfileLock = serde_json::from_str(&content).map_err(|source| ConvertError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let mut root = Root::new(manifest_root_name(path), UNKNOWN_VERSION);
        root.dependencies = locked_dependencies(lock.default, MAIN_ENV)
            .chain(locked_dependencies(lock.develop, DEV_ENV))
            .collect();

        Ok(root)
    }
}
