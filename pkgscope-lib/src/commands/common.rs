//! Argument handling, logging setup, and result printing shared by all commands.

use super::config::Config;
use super::output::{OutputFormat, project, render};
use super::Host;
use crate::Result;
use crate::converters::ConverterRegistry;
use crate::local::LocalRepo;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use serde::Serialize;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments accepted by every command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `pkgscope.toml`)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Output format, overriding the configuration file
    #[arg(long, value_name = "FORMAT", global = true)]
    pub output: Option<OutputFormat>,

    /// Dotted path selecting part of the result, e.g. `total.week`
    #[arg(long, value_name = "PATH", global = true)]
    pub filter: Option<String>,
}

/// Arguments identifying a package under a local path
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Project directory, built archive, or egg-info folder
    #[arg(value_name = "PATH")]
    pub path: Utf8PathBuf,

    /// Package name
    #[arg(long)]
    pub name: String,

    /// Package version; `*` matches any built artifact
    #[arg(long, default_value = "*")]
    pub version: String,
}

impl RepoArgs {
    pub fn repo(&self) -> LocalRepo {
        LocalRepo::new(self.path.as_std_path(), ConverterRegistry::standard())
    }
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    host: &'a mut H,
    format: OutputFormat,
    filter: Option<String>,
    use_colors: bool,
}

impl<'a, H: Host> Common<'a, H> {
    /// Set up logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_deref())?;

        let use_colors = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        };

        Ok(Self {
            format: args.output.unwrap_or(config.output),
            filter: args.filter.clone().or_else(|| config.filter.clone()),
            config,
            host,
            use_colors,
        })
    }

    /// Print `value` to the host output, projected and rendered as configured
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or the filter selects nothing
    pub fn emit<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut value = serde_json::to_value(value).into_app_err("serializing result")?;
        if let Some(filter) = &self.filter {
            value = project(value, filter)?;
        }

        let text = render(&value, self.format, self.use_colors)?;
        let _ = writeln!(self.host.output(), "{text}");
        Ok(())
    }

    /// Report a failure on the host's error stream and terminate with exit code 1
    pub fn fail(&mut self, message: &str) {
        let _ = writeln!(self.host.error(), "❌ {message}");
        self.host.exit(1);
    }
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when several commands run in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
