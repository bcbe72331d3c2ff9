use crate::converters::ConvertError;
use std::path::PathBuf;

/// Errors produced while resolving a local repository.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("path '{}' does not exist", path.display())]
    PathNotFound { path: PathBuf },

    #[error("cannot find loader for file '{}'", path.display())]
    NoLoaderFound { path: PathBuf },

    #[error("cannot find dependencies in '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("unknown format '{format}' declared in '{}'", path.display())]
    UnknownFormat { format: String, path: PathBuf },

    #[error("loading project configuration '{}'", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("reading '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
