use super::common::{Common, CommonArgs, RepoArgs};
use super::Host;
use crate::Result;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct DepsArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Only list dependencies belonging to this extra (e.g. `dev` or `test`)
    #[arg(long, value_name = "EXTRA")]
    pub extra: Option<String>,
}

/// List the dependencies of a package found under a local path
///
/// # Errors
///
/// Returns an error if the package cannot be resolved
pub async fn show_dependencies<H: Host>(host: &mut H, common_args: &CommonArgs, args: &DepsArgs) -> Result<()> {
    let mut common = Common::new(host, common_args)?;

    let deps = args
        .repo
        .repo()
        .list_dependencies(&args.repo.name, &args.repo.version, args.extra.as_deref())
        .await
        .into_app_err_with(|| format!("listing dependencies of '{}' under '{}'", args.repo.name, args.repo.path))?;

    common.emit(&deps)
}
