//! Runtime configuration loaded from a TOML file.
//!
//! Every field has a default, so an empty file (or no file) yields a working
//! setup: SQLite storage with demo data, the built-in credential table and
//! last-write-wins claims.

use crate::logging::default_log_level;
use crate::service::credential_service::{default_credentials, CredentialStore};
use crate::service::job_board::ClaimPolicy;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@-]+$").expect("valid username regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub jobs: JobSettings,

    #[serde(default = "default_credential_table")]
    pub credentials: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Fill empty tables with demo rows on startup.
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,

    /// Absolute directory for rolling log files; logging stays off when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSettings {
    #[serde(default)]
    pub claim_policy: ClaimPolicy,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Sqlite
}

fn default_db_path() -> PathBuf {
    PathBuf::from("barmaster.sqlite3")
}

fn default_seed_demo() -> bool {
    true
}

fn default_level() -> String {
    default_log_level().to_string()
}

fn default_credential_table() -> BTreeMap<String, String> {
    default_credentials()
        .into_iter()
        .map(|(user, password)| (user.to_string(), password.to_string()))
        .collect()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            db_path: default_db_path(),
            seed_demo: default_seed_demo(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
            jobs: JobSettings::default(),
            credentials: default_credential_table(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl BarConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BarConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.is_empty() {
            return Err(ConfigError::Invalid(
                "credential table must contain at least one user".to_string(),
            ));
        }
        if let Some(user) = self
            .credentials
            .keys()
            .find(|user| !USERNAME_RE.is_match(user))
        {
            return Err(ConfigError::Invalid(format!(
                "username `{user}` must be non-empty and use only letters, digits, `_`, `.`, `@` or `-`"
            )));
        }
        if self.storage.backend == StorageBackend::Sqlite
            && self.storage.db_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("storage.db_path cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{BarConfig, ConfigError, StorageBackend};
    use crate::service::job_board::ClaimPolicy;

    #[test]
    fn empty_document_uses_defaults() {
        let config = BarConfig::from_toml_str("").unwrap();
        assert_eq!(config, BarConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.jobs.claim_policy, ClaimPolicy::LastWriteWins);
        assert!(config.credential_store().verify("admin", "admin"));
    }

    #[test]
    fn explicit_sections_override_defaults() {
        let config = BarConfig::from_toml_str(
            r#"
            [storage]
            backend = "memory"
            seed_demo = false

            [jobs]
            claim_policy = "require_open"

            [credentials]
            mia = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(!config.storage.seed_demo);
        assert_eq!(config.jobs.claim_policy, ClaimPolicy::RequireOpen);

        let credentials = config.credential_store();
        assert!(credentials.verify("mia", "s3cret"));
        assert!(!credentials.verify("leo", "1234"));
    }

    #[test]
    fn rejects_empty_credential_table_and_bad_usernames() {
        let err = BarConfig::from_toml_str("[credentials]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = BarConfig::from_toml_str("[credentials]\n\"bad user\" = \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("bad user"));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let err = BarConfig::from_toml_str("[jobs]\nclaim_policy = \"first_wins\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
