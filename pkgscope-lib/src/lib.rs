#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for pkgscope
//!
//! This library holds all functionality of the pkgscope tool, which reports download
//! statistics for Python packages and resolves local project directories and build
//! artifacts into package descriptions.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`stats`]: Download statistics fetching, aggregation, and sparkline charts
//! - [`local`]: Resolution of a local path into a root package description
//! - [`converters`]: Format-specific loaders producing package descriptions
//! - [`model`]: Package, dependency, and release types shared by the above

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod converters;
pub mod local;
pub mod model;
pub mod stats;

pub use crate::commands::{Host, run};
