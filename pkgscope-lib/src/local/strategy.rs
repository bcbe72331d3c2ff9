use super::{ProjectConfig, ResolveError};
use crate::converters::{Converter, ConverterRegistry, EggInfoConverter, SdistConverter, WheelConverter};
use crate::model::{MAIN_ENV, Root};
use regex::Regex;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter};
use walkdir::WalkDir;

const LOG_TARGET: &str = "  resolver";

/// Dependency files looked for directly under the base path, in priority order.
pub const CONVENTIONAL_FILES: [&str; 5] = ["pyproject.toml", "Pipfile.lock", "Pipfile", "requirements.in", "requirements.txt"];

/// The ways a root can be found under a path, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// The base path is itself a file some converter accepts.
    SingleFile,

    /// A wheel for the requested name and version anywhere below the base path.
    WheelGlob,

    /// A source distribution for the requested name and version anywhere below the base path.
    SdistGlob,

    /// A `<name>.egg-info` directory directly under the base path.
    EggInfo,

    /// A file declared in the `[tool.pkgscope]` table of `pyproject.toml`.
    EmbeddedConfig,

    /// One of the [`CONVENTIONAL_FILES`].
    ConventionalFile,
}

/// What a strategy is looking for.
#[derive(Debug)]
pub(super) struct Lookup<'a> {
    pub base: &'a Path,
    pub name: &'a str,
    pub version: &'a str,
    pub converters: &'a ConverterRegistry,
}

impl Strategy {
    /// Try this strategy: `Ok(None)` passes to the next one, an error ends the resolution.
    pub(super) fn attempt(self, lookup: &Lookup<'_>) -> Result<Option<Root>, ResolveError> {
        match self {
            Self::SingleFile => single_file(lookup),
            Self::WheelGlob => {
                let converter = lookup.converters.get("wheel").unwrap_or(&WheelConverter);
                glob_shallowest(lookup, &["-*-*-*.whl"], converter)
            }
            Self::SdistGlob => {
                let converter = lookup.converters.get("sdist").unwrap_or(&SdistConverter);
                glob_shallowest(lookup, &[".tar.gz", ".tgz"], converter)
            }
            Self::EggInfo => egg_info(lookup),
            Self::EmbeddedConfig => embedded_config(lookup),
            Self::ConventionalFile => conventional_file(lookup),
        }
    }
}

fn single_file(lookup: &Lookup<'_>) -> Result<Option<Root>, ResolveError> {
    if !lookup.base.is_file() {
        return Ok(None);
    }

    let Some(converter) = lookup.converters.find_for(lookup.base) else {
        return Err(ResolveError::NoLoaderFound {
            path: lookup.base.to_path_buf(),
        });
    };

    Ok(Some(converter.load(lookup.base)?))
}

fn glob_shallowest(lookup: &Lookup<'_>, suffixes: &[&str], converter: &dyn Converter) -> Result<Option<Root>, ResolveError> {
    let name = lookup.name.replace('-', "_");
    let version = match lookup.version {
        "" => "*",
        v => v,
    };

    for suffix in suffixes {
        let pattern = glob_regex(&format!("{name}-{version}{suffix}"));
        if let Some(path) = find_shallowest(lookup.base, &pattern) {
            log::debug!(target: LOG_TARGET, "Loading '{}' with the {} converter", path.display(), converter.format());
            return Ok(Some(converter.load(&path)?));
        }
    }

    Ok(None)
}

/// Anchored regex for a shell-style file name pattern where only `*` is special.
fn glob_regex(glob: &str) -> Regex {
    let body = glob.split('*').map(regex::escape).collect::<Vec<_>>().join(".*");
    Regex::new(&format!("^{body}$")).expect("invalid regex")
}

/// Among all files below `base` whose name matches `pattern`, the one with the fewest path components.
///
/// Ties go to the first match in sorted walk order.
fn find_shallowest(base: &Path, pattern: &Regex) -> Option<PathBuf> {
    WalkDir::new(base)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!(target: LOG_TARGET, "Could not walk directory: {err:#}");
                None
            }
        })
        .filter(|e| !e.file_type().is_dir())
        .filter(|e| {
            let matched = e.file_name().to_str().is_some_and(|name| pattern.is_match(name));
            if !matched {
                log::trace!(target: LOG_TARGET, "Skipping '{}'", e.path().display());
            }
            matched
        })
        .map(walkdir::DirEntry::into_path)
        .min_by_key(|path| path.components().count())
}

fn egg_info(lookup: &Lookup<'_>) -> Result<Option<Root>, ResolveError> {
    let path = lookup.base.join(format!("{}.egg-info", lookup.name));
    if !path.exists() {
        return Ok(None);
    }

    let converter = lookup.converters.get("egginfo").unwrap_or(&EggInfoConverter);
    Ok(Some(converter.load(&path)?))
}

fn embedded_config(lookup: &Lookup<'_>) -> Result<Option<Root>, ResolveError> {
    let pyproject = lookup.base.join("pyproject.toml");
    if !pyproject.exists() {
        return Ok(None);
    }

    let Some(config) = ProjectConfig::attach_file(&pyproject, MAIN_ENV)? else {
        return Ok(None);
    };

    let Some(section) = config
        .section("to")
        .filter(|to| !to.is_empty())
        .or_else(|| config.section("from"))
    else {
        return Ok(None);
    };

    let (Some(path), Some(format)) = (&section.path, &section.format) else {
        return Ok(None);
    };

    let Some(converter) = lookup.converters.get(format) else {
        return Err(ResolveError::UnknownFormat {
            format: format.clone(),
            path: pyproject,
        });
    };

    let target = lookup.base.join(path);
    log::debug!(target: LOG_TARGET, "Project configuration points at '{}' ({format})", target.display());
    Ok(Some(converter.load(&target)?))
}

fn conventional_file(lookup: &Lookup<'_>) -> Result<Option<Root>, ResolveError> {
    for file in CONVENTIONAL_FILES {
        let path = lookup.base.join(file);
        if !path.exists() {
            continue;
        }

        match lookup.converters.find_for(&path) {
            Some(converter) => return Ok(Some(converter.load(&path)?)),
            None => log::trace!(target: LOG_TARGET, "No converter accepts '{}'", path.display()),
        }
    }

    Ok(None)
}
