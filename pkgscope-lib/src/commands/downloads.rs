use super::common::{Common, CommonArgs};
use super::config::validate_base_url;
use super::Host;
use crate::Result;
use crate::stats::StatsClient;
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;

const LOG_TARGET: &str = " downloads";

#[derive(Parser, Debug)]
pub struct DownloadsArgs {
    /// Name of the package on PyPI
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Base URL of the statistics API, overriding the configuration file
    #[arg(long, value_name = "URL")]
    pub stats_url: Option<String>,
}

/// Fetch download statistics for a package and print them
///
/// # Errors
///
/// Returns an error if the statistics cannot be fetched; the host is told to exit with code 1 first
pub async fn show_downloads<H: Host>(host: &mut H, common_args: &CommonArgs, args: &DownloadsArgs) -> Result<()> {
    let mut common = Common::new(host, common_args)?;

    let base_url = args.stats_url.as_deref().unwrap_or(&common.config.stats_base_url).to_string();
    validate_base_url(&base_url)?;

    let client = StatsClient::new(Some(&base_url)).into_app_err("creating HTTP client")?;
    let today = Utc::now().date_naive();

    match client.fetch(&args.name, today).await {
        Ok(report) => common.emit(&report),
        Err(e) => {
            log::error!(target: LOG_TARGET, "{e}");
            common.fail(&format!("Could not fetch download statistics for '{}': {e}", args.name));
            Err(e).into_app_err_with(|| format!("fetching download statistics for '{}'", args.name))
        }
    }
}
