use serde::Deserialize;
use std::fmt;

/// Identity used to authenticate every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Which package listing to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageQuery {
    pub repo: String,
    pub pkgtype: String,
    pub distro: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Package {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub versions_url: String,
}
