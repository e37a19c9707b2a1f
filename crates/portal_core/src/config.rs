//! Portal runtime configuration.
//!
//! # Responsibility
//! - Resolve the data directory, deletion code and default log level.
//! - Keep environment lookups in one place so other layers take plain values.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - The deletion code is never logged and only compared in constant time.

use crate::repo::document_repo::{JsonDocumentRepository, DOCUMENTS_FILE_NAME};
use crate::repo::training_repo::{JsonTrainingRepository, TRAININGS_FILE_NAME};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

/// Environment variable naming the directory that holds the JSON stores.
pub const ENV_DATA_DIR: &str = "PORTAL_DATA_DIR";
/// Environment variable overriding the deletion verification code.
pub const ENV_DELETE_CODE: &str = "PORTAL_DELETE_CODE";
/// Environment variable overriding the default log level.
pub const ENV_LOG_LEVEL: &str = "PORTAL_LOG_LEVEL";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DELETE_CODE: &str = "9999";

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDataDir,
    EmptyDeleteCode,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataDir => write!(f, "data directory must not be empty"),
            Self::EmptyDeleteCode => write!(f, "delete verification code must not be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Verification code gating destructive actions.
///
/// Acts as a confirmation speed bump, not as access control.
#[derive(Clone, PartialEq, Eq)]
pub struct DeleteCode(String);

impl DeleteCode {
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(ConfigError::EmptyDeleteCode);
        }
        Ok(Self(code))
    }

    /// Compares operator input against the code in constant time.
    ///
    /// Surrounding whitespace in the input is ignored.
    pub fn verify(&self, input: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), input.trim().as_bytes())
    }
}

impl Default for DeleteCode {
    fn default() -> Self {
        Self(DEFAULT_DELETE_CODE.to_string())
    }
}

impl Debug for DeleteCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeleteCode(***)")
    }
}

/// Resolved portal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub data_dir: PathBuf,
    pub delete_code: DeleteCode,
    pub log_level: Option<String>,
}

impl PortalConfig {
    /// Builds a config rooted at `data_dir` with default code and level.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.into();
        if data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        Ok(Self {
            data_dir,
            delete_code: DeleteCode::default(),
            log_level: None,
        })
    }

    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = non_blank(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let delete_code = non_blank(ENV_DELETE_CODE)
            .and_then(|code| DeleteCode::new(code).ok())
            .unwrap_or_default();

        Self {
            data_dir,
            delete_code,
            log_level: non_blank(ENV_LOG_LEVEL),
        }
    }

    pub fn with_delete_code(mut self, delete_code: DeleteCode) -> Self {
        self.delete_code = delete_code;
        self
    }

    pub fn trainings_path(&self) -> PathBuf {
        self.data_dir.join(TRAININGS_FILE_NAME)
    }

    pub fn documents_path(&self) -> PathBuf {
        self.data_dir.join(DOCUMENTS_FILE_NAME)
    }

    pub fn training_repository(&self) -> JsonTrainingRepository {
        JsonTrainingRepository::new(self.trainings_path())
    }

    pub fn document_repository(&self) -> JsonDocumentRepository {
        JsonDocumentRepository::new(self.documents_path())
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    let mut diff = left.len() ^ right.len();
    for (index, byte) in left.iter().enumerate() {
        let other = right.get(index).copied().unwrap_or(0);
        diff |= usize::from(byte ^ other);
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::{
        constant_time_eq, ConfigError, DeleteCode, PortalConfig, DEFAULT_DATA_DIR, ENV_DATA_DIR,
        ENV_DELETE_CODE, ENV_LOG_LEVEL,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = PortalConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.delete_code.verify("9999"));
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn environment_overrides_and_blank_values_fall_back() {
        let config = PortalConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/srv/portal"),
            (ENV_DELETE_CODE, "   "),
            (ENV_LOG_LEVEL, " debug "),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/portal"));
        assert!(config.delete_code.verify("9999"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.trainings_path(),
            PathBuf::from("/srv/portal/trainings.json")
        );
        assert_eq!(
            config.documents_path(),
            PathBuf::from("/srv/portal/documents.json")
        );
    }

    #[test]
    fn delete_code_verifies_exact_value_only() {
        let code = DeleteCode::new("4321").expect("valid code");
        assert!(code.verify("4321"));
        assert!(code.verify(" 4321\n"));
        assert!(!code.verify("432"));
        assert!(!code.verify("43210"));
        assert!(!code.verify(""));
    }

    #[test]
    fn delete_code_rejects_blank_and_hides_value_in_debug() {
        assert_eq!(DeleteCode::new("  "), Err(ConfigError::EmptyDeleteCode));
        let rendered = format!("{:?}", DeleteCode::default());
        assert!(!rendered.contains("9999"));
    }

    #[test]
    fn constant_time_eq_handles_length_mismatch() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abc"));
    }

    #[test]
    fn new_rejects_empty_data_dir() {
        assert_eq!(PortalConfig::new(""), Err(ConfigError::EmptyDataDir));
    }
}
