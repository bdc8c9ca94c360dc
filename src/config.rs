//! Resolution of command options from flags, environment and the config file.
//!
//! Every option is an `Option<String>`. Values given on the command line (or
//! through their environment variable) take precedence over the config file,
//! which takes precedence over the built-in defaults for `distro` and
//! `pkgtype`. A value supplied as an empty string still counts as supplied
//! while merging, so it shadows later sources, and is rejected as missing
//! when the credentials and query are validated.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::{Credentials, PackageQuery};
use crate::runtime::Runtime;

pub const DEFAULT_DISTRO: &str = "el";
pub const DEFAULT_PKGTYPE: &str = "rpm";

const CONFIG_DIR_NAME: &str = "pccli";
const CONFIG_FILE_NAME: &str = "config.json";

/// A required option that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `apikey` or `user` is absent.
    MissingCredentials,
    /// An operation parameter is absent.
    MissingField(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingCredentials => write!(f, "apikey or user must be set"),
            ConfigError::MissingField(name) => write!(f, "{} must be set", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Option values from one source. Used both for what the command line
/// supplied and for the contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Options {
    pub apikey: Option<String>,
    pub user: Option<String>,
    pub repo: Option<String>,
    pub distro: Option<String>,
    pub pkgtype: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Options {
    /// Fill every option of `self` that was not supplied from `fallback`.
    pub fn or(self, fallback: Options) -> Options {
        Options {
            apikey: self.apikey.or(fallback.apikey),
            user: self.user.or(fallback.user),
            repo: self.repo.or(fallback.repo),
            distro: self.distro.or(fallback.distro),
            pkgtype: self.pkgtype.or(fallback.pkgtype),
        }
    }

    /// Apply the built-in defaults to whatever was not supplied.
    pub fn with_defaults(self) -> Options {
        self.or(Options {
            distro: Some(DEFAULT_DISTRO.to_string()),
            pkgtype: Some(DEFAULT_PKGTYPE.to_string()),
            ..Default::default()
        })
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (
            non_empty(self.apikey.clone()),
            non_empty(self.user.clone()),
        ) {
            (Some(token), Some(user)) => Ok(Credentials { token, user }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    pub fn query(&self) -> Result<PackageQuery, ConfigError> {
        let required = |value: &Option<String>, name: &'static str| {
            non_empty(value.clone()).ok_or(ConfigError::MissingField(name))
        };

        Ok(PackageQuery {
            repo: required(&self.repo, "repo")?,
            pkgtype: required(&self.pkgtype, "pkgtype")?,
            distro: required(&self.distro, "distro")?,
        })
    }
}

/// Default config file location: `<config dir>/pccli/config.json`.
pub fn default_config_path<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    runtime
        .config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load options from the config file.
///
/// An explicitly given path must exist and parse. Without one, the default
/// location is read when present and otherwise no options are loaded.
#[tracing::instrument(skip(runtime))]
pub fn load<R: Runtime>(runtime: &R, path: Option<&Path>) -> Result<Options> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path(runtime) {
            Some(path) if runtime.exists(&path) => path,
            _ => {
                debug!("No config file found");
                return Ok(Options::default());
            }
        },
    };

    debug!("Loading config from {:?}", path);

    let content = runtime.read_to_string(&path)?;
    let options: Options = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn opt(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_credentials_resolved() {
        let options = Options {
            apikey: opt("token"),
            user: opt("acme"),
            ..Default::default()
        };
        let credentials = options.credentials().unwrap();
        assert_eq!(credentials.token, "token");
        assert_eq!(credentials.user, "acme");
    }

    #[test]
    fn test_credentials_missing_apikey() {
        let options = Options {
            user: opt("acme"),
            ..Default::default()
        };
        assert_eq!(options.credentials(), Err(ConfigError::MissingCredentials));
    }

    #[test]
    fn test_credentials_empty_user_is_missing() {
        let options = Options {
            apikey: opt("token"),
            user: opt(""),
            ..Default::default()
        };
        let err = options.credentials().unwrap_err();
        assert_eq!(err.to_string(), "apikey or user must be set");
    }

    #[test]
    fn test_query_defaults() {
        let options = Options {
            repo: opt("main"),
            ..Default::default()
        }
        .with_defaults();
        let query = options.query().unwrap();
        assert_eq!(query.repo, "main");
        assert_eq!(query.pkgtype, "rpm");
        assert_eq!(query.distro, "el");
    }

    #[test]
    fn test_query_missing_repo() {
        let options = Options::default().with_defaults();
        let err = options.query().unwrap_err();
        assert_eq!(err, ConfigError::MissingField("repo"));
        assert_eq!(err.to_string(), "repo must be set");
    }

    #[test]
    fn test_query_without_defaults_reports_pkgtype() {
        let options = Options {
            repo: opt("main"),
            ..Default::default()
        };
        assert_eq!(options.query(), Err(ConfigError::MissingField("pkgtype")));
    }

    #[test]
    fn test_or_prefers_self() {
        let flags = Options {
            apikey: opt("flag-token"),
            ..Default::default()
        };
        let file = Options {
            apikey: opt("file-token"),
            user: opt("file-user"),
            repo: opt("file-repo"),
            distro: opt("ubuntu"),
            pkgtype: opt("deb"),
        };

        let merged = flags.or(file).with_defaults();
        assert_eq!(merged.apikey, opt("flag-token"));
        assert_eq!(merged.user, opt("file-user"));
        assert_eq!(merged.repo, opt("file-repo"));
        assert_eq!(merged.distro, opt("ubuntu"));
        assert_eq!(merged.pkgtype, opt("deb"));
    }

    #[test]
    fn test_or_keeps_explicit_empty_value() {
        let flags = Options {
            user: opt(""),
            ..Default::default()
        };
        let file = Options {
            apikey: opt("file-token"),
            user: opt("file-user"),
            ..Default::default()
        };

        let merged = flags.or(file);
        assert_eq!(merged.user, opt(""));
        assert_eq!(merged.credentials(), Err(ConfigError::MissingCredentials));
    }

    #[test]
    fn test_empty_pkgtype_is_not_defaulted() {
        let options = Options {
            repo: opt("main"),
            pkgtype: opt(""),
            ..Default::default()
        }
        .with_defaults();
        assert_eq!(options.distro, opt("el"));
        assert_eq!(options.query(), Err(ConfigError::MissingField("pkgtype")));
    }

    #[test]
    fn test_empty_distro_is_not_defaulted() {
        let options = Options {
            repo: opt("main"),
            distro: opt(""),
            ..Default::default()
        }
        .with_defaults();
        assert_eq!(options.query(), Err(ConfigError::MissingField("distro")));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/etc/pccli.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Ok(r#"{"apikey": "token", "user": "acme"}"#.to_string()));

        let options = load(&runtime, Some(&path)).unwrap();
        assert_eq!(options.apikey, opt("token"));
        assert_eq!(options.user, opt("acme"));
        assert_eq!(options.repo, None);
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/nope/config.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Err(anyhow::anyhow!("Failed to read /nope/config.json")));

        assert!(load(&runtime, Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/etc/pccli.json");

        runtime
            .expect_read_to_string()
            .returning(|_| Ok("apikey = token".to_string()));

        let err = load(&runtime, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_default_path() {
        let mut runtime = MockRuntime::new();
        let expected = PathBuf::from("/home/user/.config/pccli/config.json");

        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));
        runtime
            .expect_exists()
            .with(eq(expected.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(expected))
            .returning(|_| Ok(r#"{"repo": "main"}"#.to_string()));

        let options = load(&runtime, None).unwrap();
        assert_eq!(options.repo, opt("main"));
    }

    #[test]
    fn test_load_default_path_absent() {
        let mut runtime = MockRuntime::new();

        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));
        runtime.expect_exists().returning(|_| false);
        runtime.expect_read_to_string().never();

        assert_eq!(load(&runtime, None).unwrap(), Options::default());
    }

    #[test]
    fn test_load_no_config_dir() {
        let mut runtime = MockRuntime::new();
        runtime.expect_config_dir().returning(|| None);

        assert_eq!(load(&runtime, None).unwrap(), Options::default());
    }
}
