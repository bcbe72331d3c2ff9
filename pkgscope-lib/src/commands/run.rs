//! Command dispatch logic for pkgscope

use super::common::CommonArgs;
use super::{
    DepsArgs, DownloadsArgs, InitArgs, ReleasesArgs, RootArgs, init_config, show_dependencies, show_downloads, show_releases, show_root,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "pkgscope", author, version, long_about = None)]
#[command(about = "Download statistics and local resolution for Python packages")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show recent download statistics for a package
    Downloads(DownloadsArgs),
    /// Resolve the package under a local path and print its description
    Root(RootArgs),
    /// List the releases of a package found under a local path
    Releases(ReleasesArgs),
    /// List the dependencies of a package found under a local path
    Deps(DepsArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        Command::Downloads(args) => show_downloads(host, &cli.common, args).await,
        Command::Root(args) => show_root(host, &cli.common, args),
        Command::Releases(args) => show_releases(host, &cli.common, args),
        Command::Deps(args) => show_dependencies(host, &cli.common, args).await,
        Command::Init(args) => init_config(host, args),
    }
}
