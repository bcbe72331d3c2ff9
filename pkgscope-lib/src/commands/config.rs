use super::OutputFormat;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the current directory and in the user configuration directory
pub const CONFIG_FILE_NAME: &str = "pkgscope.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the download statistics API
    #[serde(default = "default_stats_base_url")]
    pub stats_base_url: String,

    /// Dotted path applied to every result unless `--filter` is given
    #[serde(default)]
    pub filter: Option<String>,

    /// Output format used unless `--output` is given
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_stats_base_url() -> String {
    crate::stats::DEFAULT_STATS_BASE_URL.to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `pkgscope.toml` is looked for in `base_dir` and then in the user
    /// configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading pkgscope configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let mut found = None;
            for path in default_locations(base_dir) {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading pkgscope configuration file '{path}'")),
                }
            }

            let Some(found) = found else {
                log::debug!(target: LOG_TARGET, "No configuration file found, using defaults");
                return Ok(Self::default());
            };
            found
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the statistics URL is not an http(s) URL or the filter is blank
    fn validate(&self) -> Result<()> {
        validate_base_url(&self.stats_base_url)?;

        if self.filter.as_ref().is_some_and(|f| f.trim().is_empty()) {
            return Err(app_err!("filter must not be empty when set"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

/// Check that `url` is an absolute http or https URL.
///
/// # Errors
///
/// Returns an error describing why the URL is unusable
pub fn validate_base_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).into_app_err_with(|| format!("invalid statistics URL '{url}'"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(app_err!("statistics URL '{url}' must use http or https, not '{scheme}'")),
    }
}

fn default_locations(base_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut paths = vec![base_dir.join(CONFIG_FILE_NAME)];

    if let Some(dirs) = ProjectDirs::from("", "", "pkgscope")
        && let Ok(dir) = Utf8PathBuf::try_from(dirs.config_dir().to_path_buf())
    {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }

    paths
}
