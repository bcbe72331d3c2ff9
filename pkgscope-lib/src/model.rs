//! Package, dependency, and release types.
//!
//! These are plain values: converters build a [`Root`] for every load, the local repository
//! produces [`Release`] entries per call, and nothing is shared or cached between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Name of the environment holding unconditional runtime dependencies.
pub const MAIN_ENV: &str = "main";

/// Name of the environment holding development-only dependencies.
pub const DEV_ENV: &str = "dev";

/// Descriptive metadata carried by both roots and dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// A resolved package description: metadata plus the dependencies it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Root {
    pub raw_name: String,
    pub version: String,
    #[serde(flatten)]
    pub metadata: PackageMetadata,
    pub dependencies: Vec<Dependency>,
}

impl Root {
    #[must_use]
    pub fn new(raw_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            version: version.into(),
            metadata: PackageMetadata::default(),
            dependencies: Vec::new(),
        }
    }

    /// Normalized package name
    #[must_use]
    pub fn name(&self) -> String {
        normalize_name(&self.raw_name)
    }
}

/// A single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub raw_name: String,
    pub name: String,

    /// Version specifier text such as `>=1.0,<2`; empty means any version
    pub constraint: String,

    /// Environment marker, e.g. `python_version < "3.8"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// Environments and extras this dependency belongs to
    pub envs: BTreeSet<String>,

    #[serde(flatten)]
    pub metadata: PackageMetadata,
}

impl Dependency {
    #[must_use]
    pub fn new(raw_name: impl Into<String>, constraint: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        Self {
            name: normalize_name(&raw_name),
            raw_name,
            constraint: constraint.into(),
            marker: None,
            envs: BTreeSet::from([MAIN_ENV.to_string()]),
            metadata: PackageMetadata::default(),
        }
    }

    /// Replace the environments with a single one.
    #[must_use]
    pub fn in_env(mut self, env: impl Into<String>) -> Self {
        self.envs = BTreeSet::from([env.into()]);
        self
    }

    /// The exactly pinned version (`==1.2`), or `*` when the constraint is anything else.
    #[must_use]
    pub fn pinned_version(&self) -> &str {
        let constraint = self.constraint.trim();
        match constraint.strip_prefix("==") {
            Some(version) if !version.contains([',', '*']) => version.trim(),
            _ => "*",
        }
    }
}

/// One released artifact of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub raw_name: String,
    pub version: String,
    pub time: DateTime<Utc>,
}

/// Normalize a package name: lowercase, with `_` and `.` turned into `-`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['_', '.'], "-")
}
