//! Command-line interface and orchestration for pkgscope
//!
//! This module implements the CLI commands on top of the [`stats`](crate::stats) and
//! [`local`](crate::local) modules. It handles argument parsing, configuration management,
//! and printing results.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **downloads**: Fetch download statistics for a package and print totals plus charts
//! - **root**: Resolve a local path into a root package description
//! - **releases**: List release artifacts found under a local path
//! - **deps**: List the dependencies of the root resolved under a local path
//! - **init**: Generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Each handler:
//!
//! 1. Sets up logging and loads the configuration through `Common`
//! 2. Performs its work against the library
//! 3. Serializes the result, applies the optional filter, and renders it
//!
//! Failures are returned as errors; `downloads` additionally reports fetch failures on
//! the host's error stream and asks the host to exit with status 1.

mod common;
mod config;
mod deps;
mod downloads;
mod host;
mod init;
mod output;
mod releases;
mod root;
mod run;

pub use common::{ColorMode, CommonArgs, LogLevel, RepoArgs};
pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
pub use deps::{DepsArgs, show_dependencies};
pub use downloads::{DownloadsArgs, show_downloads};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use output::{OutputFormat, project, render};
pub use releases::{ReleasesArgs, show_releases};
pub use root::{RootArgs, show_root};
pub use run::run;
