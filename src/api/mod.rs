//! packagecloud API client.

mod client;
mod error;
mod types;

#[cfg(test)]
pub use client::MockListPackages;
pub use client::{DEFAULT_API_URL, ListPackages, PackageCloud, USER_AGENT};
pub use error::ApiError;
pub use types::{Credentials, Package, PackageQuery};
