use anyhow::Result;
use clap::Parser;
use pccli::config::Options;
use std::path::PathBuf;

/// pccli - packagecloud command line interface
///
/// Credentials can also be supplied through PCCLI_APIKEY and PCCLI_USER, or
/// from a JSON config file (default: <config dir>/pccli/config.json) with the
/// keys apikey, user, repo, distro and pkgtype.
///
/// Examples:
///   pccli packagelist --apikey TOKEN --user acme --repo main
///   pccli packagelist --user acme --repo tools --pkgtype deb --distro ubuntu
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// packagecloud API URL (defaults to https://packagecloud.io/api/v1)
    #[arg(long = "api-url", env = "PCCLI_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List all packages in the repository
    #[command(name = "packagelist")]
    PackageList(PackageListArgs),
}

#[derive(clap::Args, Debug)]
pub struct PackageListArgs {
    /// API key to use for authorization
    #[arg(long, env = "PCCLI_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Owner of packagecloud account
    #[arg(long, env = "PCCLI_USER")]
    pub user: Option<String>,

    /// Configuration file path
    #[arg(long, env = "PCCLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Package distribution [default: el]
    #[arg(long)]
    pub distro: Option<String>,

    /// Package type [default: rpm]
    #[arg(long)]
    pub pkgtype: Option<String>,
}

impl PackageListArgs {
    fn into_parts(self) -> (Options, Option<PathBuf>) {
        let flags = Options {
            apikey: self.apikey,
            user: self.user,
            repo: self.repo,
            distro: self.distro,
            pkgtype: self.pkgtype,
        };
        (flags, self.config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pccli::runtime::RealRuntime;

    match cli.command {
        Commands::PackageList(args) => {
            let (flags, config) = args.into_parts();
            pccli::commands::package_list(runtime, flags, config, cli.api_url).await?
        }
    }
    Ok(())
}
