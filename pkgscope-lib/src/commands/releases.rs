use super::common::{Common, CommonArgs, RepoArgs};
use super::Host;
use crate::Result;
use crate::model::{Dependency, PackageMetadata, Release};
use clap::Parser;
use ohno::IntoAppError;
use serde::Serialize;

#[derive(Parser, Debug)]
pub struct ReleasesArgs {
    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Debug, Serialize)]
struct ReleaseListing<'a> {
    name: &'a str,
    #[serde(flatten)]
    metadata: &'a PackageMetadata,
    releases: Vec<Release>,
}

/// List the releases of a package found under a local path
///
/// # Errors
///
/// Returns an error if the path cannot be read or the package cannot be resolved
pub fn show_releases<H: Host>(host: &mut H, common_args: &CommonArgs, args: &ReleasesArgs) -> Result<()> {
    let mut common = Common::new(host, common_args)?;

    let constraint = match args.repo.version.as_str() {
        "" | "*" => String::new(),
        version => format!("=={version}"),
    };
    let mut dep = Dependency::new(args.repo.name.as_str(), constraint);

    let releases = args
        .repo
        .repo()
        .list_releases(&mut dep)
        .into_app_err_with(|| format!("listing releases of '{}' under '{}'", args.repo.name, args.repo.path))?;

    common.emit(&ReleaseListing {
        name: &dep.raw_name,
        metadata: &dep.metadata,
        releases,
    })
}
