use super::strategy::Lookup;
use super::{ResolveError, Strategy, merge_metadata_from_root};
use crate::converters::ConverterRegistry;
use crate::model::{Dependency, Release, Root};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "  resolver";

/// Suffixes removed from artifact file names, in this order, before the version is extracted.
pub const ARCHIVE_SUFFIXES: [&str; 6] = [".gz", ".bz", ".zip", ".tar", ".whl", ".tgz"];

/// A package living on the local filesystem: a project directory, a built archive, or an egg-info folder.
#[derive(Debug)]
pub struct LocalRepo {
    path: PathBuf,
    converters: ConverterRegistry,
}

impl LocalRepo {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, converters: ConverterRegistry) -> Self {
        Self {
            path: path.into(),
            converters,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the root package description for `name` at `version`.
    ///
    /// A `version` of `*` or an empty string matches any version of a built artifact.
    pub fn resolve_root(&self, name: &str, version: &str) -> Result<Root, ResolveError> {
        if !self.path.exists() {
            return Err(ResolveError::PathNotFound { path: self.path.clone() });
        }

        let lookup = Lookup {
            base: &self.path,
            name,
            version,
            converters: &self.converters,
        };

        for strategy in Strategy::iter() {
            if let Some(root) = strategy.attempt(&lookup)? {
                log::debug!(target: LOG_TARGET, "Resolved '{name}' under '{}' via {strategy}", self.path.display());
                return Ok(root);
            }
        }

        Err(ResolveError::NotFound { path: self.path.clone() })
    }

    /// List the releases of `dep` found on disk, newest entry first.
    ///
    /// Every file in `dist/` yields a release dated by its modification time; the resolved root adds
    /// one more, dated by the base path. As a side effect, `dep` receives any metadata it lacks from
    /// the root.
    pub fn list_releases(&self, dep: &mut Dependency) -> Result<Vec<Release>, ResolveError> {
        let mut releases = Vec::new();

        let dist = self.path.join("dist");
        if dist.is_dir() {
            let mut artifacts = Vec::new();
            for entry in fs::read_dir(&dist).map_err(|source| ResolveError::Io {
                path: dist.clone(),
                source,
            })? {
                let entry = entry.map_err(|source| ResolveError::Io {
                    path: dist.clone(),
                    source,
                })?;
                let path = entry.path();
                if path.is_file() {
                    artifacts.push(path);
                }
            }
            artifacts.sort();

            for path in artifacts {
                let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                    log::trace!(target: LOG_TARGET, "Skipping '{}'", path.display());
                    continue;
                };

                releases.push(Release {
                    raw_name: dep.raw_name.clone(),
                    version: release_version(file_name, &dep.name),
                    time: modified(&path)?,
                });
            }
        } else {
            log::debug!(target: LOG_TARGET, "No dist directory under '{}'", self.path.display());
        }

        let root = self.resolve_root(&dep.name, dep.pinned_version())?;
        merge_metadata_from_root(dep, &root);
        releases.push(Release {
            raw_name: root.raw_name,
            version: root.version,
            time: modified(&self.path)?,
        });

        releases.reverse();
        Ok(releases)
    }

    /// Dependencies of the resolved root, limited to those in environment `extra` when one is given.
    pub async fn list_dependencies(&self, name: &str, version: &str, extra: Option<&str>) -> Result<Vec<Dependency>, ResolveError> {
        let root = self.resolve_root(name, version)?;

        Ok(match extra.filter(|e| !e.is_empty()) {
            Some(extra) => root.dependencies.into_iter().filter(|dep| dep.envs.contains(extra)).collect(),
            None => root.dependencies,
        })
    }
}

/// The version encoded in an artifact file name.
///
/// Archive suffixes are removed, then a leading `<name>-` or `<name>_` (matched case-insensitively,
/// with `-` and `_` interchangeable in the name). For wheels only the version component is kept.
#[must_use]
pub fn release_version(file_name: &str, dep_name: &str) -> String {
    let is_wheel = file_name.ends_with(".whl");

    let mut version = file_name;
    for suffix in ARCHIVE_SUFFIXES {
        if let Some(stripped) = version.strip_suffix(suffix) {
            version = stripped;
        }
    }

    let underscored = dep_name.replace('-', "_");
    for candidate in [dep_name, underscored.as_str()] {
        let Some(head) = version.get(..candidate.len()) else {
            continue;
        };

        if head.eq_ignore_ascii_case(candidate) {
            let rest = &version[candidate.len()..];
            if let Some(rest) = rest.strip_prefix('-').or_else(|| rest.strip_prefix('_')) {
                version = rest;
                break;
            }
        }
    }

    if is_wheel {
        version = version.split('-').next().unwrap_or(version);
    }

    version.to_string()
}

fn modified(path: &Path) -> Result<DateTime<Utc>, ResolveError> {
    let io_err = |source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let time = fs::metadata(path).and_then(|m| m.modified()).map_err(io_err)?;
    Ok(DateTime::<Utc>::from(time))
}
