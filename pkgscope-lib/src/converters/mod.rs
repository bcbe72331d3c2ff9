//! Format-specific loaders that turn packaging files into a [`Root`]
//!
//! # Implementation Model
//!
//! Every supported format implements [`Converter`]: a cheap `can_parse` predicate based on the
//! file name (and, for `pyproject.toml`, its content) and a `load` that parses the file. The
//! [`ConverterRegistry`] keeps converters in registration order, which is also the order in which
//! callers probe them, and allows lookup by format name.
//!
//! Built artifacts (wheel, sdist) and egg-info folders carry core metadata in the RFC 822 style
//! handled by the `metadata` module; manifest formats (pip, Pipfile, Pipfile.lock, pyproject)
//! only declare dependencies and produce a root named after the directory they live in.

mod egg_info;
mod metadata;
mod pip;
mod pipfile;
mod pipfile_lock;
mod pyproject;
mod registry;
mod requirement;
mod sdist;
mod wheel;

use crate::model::Root;
use std::path::{Path, PathBuf};

pub use egg_info::EggInfoConverter;
pub use metadata::parse_core_metadata;
pub use pip::PipConverter;
pub use pipfile::PipfileConverter;
pub use pipfile_lock::PipfileLockConverter;
pub use pyproject::PyProjectConverter;
pub use registry::ConverterRegistry;
pub use requirement::{parse_requirement, parse_requires_txt};
pub use sdist::SdistConverter;
pub use wheel::WheelConverter;

/// Version given to roots built from manifests that do not declare one.
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// Errors produced while loading a packaging file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("reading '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading archive '{}'", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("parsing TOML in '{}'", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("parsing JSON in '{}'", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no package metadata found in '{}'", path.display())]
    MissingMetadata { path: PathBuf },

    #[error("invalid content in '{}': {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

impl ConvertError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A loader for one packaging format.
pub trait Converter: Send + Sync {
    /// Name under which the converter is registered, e.g. `wheel` or `pip`.
    fn format(&self) -> &'static str;

    /// Whether this converter recognizes the file or directory at `path`.
    fn can_parse(&self, path: &Path) -> bool;

    /// Parse `path` into a root package description.
    fn load(&self, path: &Path) -> Result<Root, ConvertError>;
}

/// File name of `path` as a string, or an empty string when there is none.
fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|name| name.to_str()).unwrap_or_default()
}

/// Name for roots loaded from a manifest: the directory the manifest lives in.
fn manifest_root_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map_or_else(|| "root".to_string(), ToString::to_string)
}

fn read_to_string(path: &Path) -> Result<String, ConvertError> {
    std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/a/b/requirements.txt")), "requirements.txt");
        assert_eq!(file_name(Path::new("/")), "");
    }

    #[test]
    fn test_manifest_root_name_uses_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("my-project");
        std::fs::create_dir(&project).unwrap();
        let manifest = project.join("requirements.txt");
        std::fs::write(&manifest, "").unwrap();

        assert_eq!(manifest_root_name(&manifest), "my-project");
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = ConvertError::MissingMetadata {
            path: PathBuf::from("dist/demo.whl"),
        };
        assert_eq!(err.to_string(), "no package metadata found in 'dist/demo.whl'");
    }
}
