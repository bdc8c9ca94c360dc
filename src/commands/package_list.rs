use anyhow::Result;
use log::debug;
use std::io::Write;
use std::path::PathBuf;

use crate::{
    api::{ApiError, ListPackages, Package, PackageCloud, PackageQuery},
    config::{self, Options},
    runtime::Runtime,
};

/// List all packages in a repository.
///
/// `flags` holds what the command line supplied; anything not supplied there
/// is taken from the config file and then from the defaults. Both identity
/// fields and every query field are validated before a client is built.
#[tracing::instrument(skip(runtime, flags, config_path, api_url))]
pub async fn package_list<R: Runtime>(
    runtime: R,
    flags: Options,
    config_path: Option<PathBuf>,
    api_url: Option<String>,
) -> Result<()> {
    let file = config::load(&runtime, config_path.as_deref())?;
    let options = flags.or(file).with_defaults();

    let credentials = options.credentials()?;
    let query = options.query()?;

    let client = PackageCloud::new(credentials, api_url)?;
    run(&client, &query, &mut std::io::stdout()).await
}

/// Fetch the listing and print it to `out`.
///
/// On an unexpected HTTP status the numeric code is printed before the
/// error is returned. Nothing else is printed on failure.
#[tracing::instrument(skip(client, out))]
pub async fn run<C: ListPackages, W: Write>(
    client: &C,
    query: &PackageQuery,
    out: &mut W,
) -> Result<()> {
    match client.list_packages(query).await {
        Ok(packages) => {
            debug!("Listing {} package(s)", packages.len());
            print_packages(out, &packages)?;
            Ok(())
        }
        Err(ApiError::UnexpectedStatus(status)) => {
            writeln!(out, "{}", status.as_u16())?;
            Err(ApiError::UnexpectedStatus(status).into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn print_packages<W: Write>(out: &mut W, packages: &[Package]) -> std::io::Result<()> {
    for (i, pkg) in packages.iter().enumerate() {
        writeln!(out, "{:>3}: {}", i + 1, pkg.name)?;
    }
    Ok(())
}
