use super::common::{Common, CommonArgs, RepoArgs};
use super::Host;
use crate::Result;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct RootArgs {
    #[command(flatten)]
    pub repo: RepoArgs,
}

/// Resolve the package found under a local path and print its description
///
/// # Errors
///
/// Returns an error if nothing under the path can be resolved
pub fn show_root<H: Host>(host: &mut H, common_args: &CommonArgs, args: &RootArgs) -> Result<()> {
    let mut common = Common::new(host, common_args)?;

    let root = args
        .repo
        .repo()
        .resolve_root(&args.repo.name, &args.repo.version)
        .into_app_err_with(|| format!("resolving '{}' under '{}'", args.repo.name, args.repo.path))?;

    common.emit(&root)
}
