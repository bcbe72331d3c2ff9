//! Resolution of a local path into a root package description
//!
//! # Implementation Model
//!
//! [`LocalRepo`] wraps a filesystem path and an explicit [`ConverterRegistry`](crate::converters::ConverterRegistry).
//! Resolving a root walks the [`Strategy`] variants in declaration order; each strategy either
//! produces a root, passes to the next one, or fails the whole resolution. Nothing is cached, so
//! every call sees the current state of the filesystem.
//!
//! On top of root resolution the repository lists release artifacts found in `dist/`, merges root
//! metadata into a dependency, and lists the root's dependencies filtered by extra.

mod error;
mod merge;
mod project_config;
mod repo;
mod strategy;

pub use error::ResolveError;
pub use merge::merge_metadata_from_root;
pub use project_config::{ProjectConfig, Section};
pub use repo::{ARCHIVE_SUFFIXES, LocalRepo, release_version};
pub use strategy::{CONVENTIONAL_FILES, Strategy};
