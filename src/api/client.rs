use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use super::error::ApiError;
use super::types::{Credentials, Package, PackageQuery};

pub const DEFAULT_API_URL: &str = "https://packagecloud.io/api/v1";
pub const USER_AGENT: &str = concat!("pccli/", env!("CARGO_PKG_VERSION"));

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListPackages: Send + Sync {
    /// Fetch every package of one repository/package type/distro combination.
    async fn list_packages(&self, query: &PackageQuery) -> Result<Vec<Package>, ApiError>;
}

pub struct PackageCloud {
    client: Client,
    credentials: Credentials,
    api_url: String,
}

impl PackageCloud {
    #[tracing::instrument(skip(credentials, api_url))]
    pub fn new(credentials: Credentials, api_url: Option<String>) -> Result<Self> {
        let api_url = api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        debug!(
            "Using packagecloud API at {} as user {}",
            api_url, credentials.user
        );

        Ok(Self {
            client,
            credentials,
            api_url,
        })
    }

    fn packages_url(&self, query: &PackageQuery) -> String {
        format!(
            "{}/repos/{}/{}/packages/{}/{}.json",
            self.api_url, self.credentials.user, query.repo, query.pkgtype, query.distro
        )
    }
}

#[async_trait]
impl ListPackages for PackageCloud {
    #[tracing::instrument(skip(self))]
    async fn list_packages(&self, query: &PackageQuery) -> Result<Vec<Package>, ApiError> {
        let url = self.packages_url(query);

        debug!("Fetching packages from {}...", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.token, Some(""))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let packages = response
                    .json::<Vec<Package>>()
                    .await
                    .map_err(ApiError::Decode)?;
                debug!("Decoded {} package(s)", packages.len());
                Ok(packages)
            }
            status => {
                debug!("Unexpected status {} from {}", status, url);
                Err(ApiError::UnexpectedStatus(status))
            }
        }
    }
}
