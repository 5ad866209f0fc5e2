//! Environment-driven service configuration.
//!
//! Recognized variables (blank values count as unset):
//! - `POLCOMPASS_DB_PATH`: SQLite file; defaults to `polcompass.sqlite3` in
//!   the system temp directory.
//! - `POLCOMPASS_LOG_LEVEL`: `trace|debug|info|warn|error`; defaults to the
//!   build-mode level.
//! - `POLCOMPASS_LOG_DIR`: absolute directory for rolling logs; stderr when
//!   unset.

use crate::logging::{default_log_level, normalize_level, LogTarget};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "POLCOMPASS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "POLCOMPASS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "POLCOMPASS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "polcompass.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// - Returns an error when the log level is not recognized.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Overrides the log level, keeping the normalized spelling.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), String> {
        self.log_level = normalize_level(level)?;
        Ok(())
    }

    pub fn log_target(&self) -> LogTarget {
        match &self.log_dir {
            Some(dir) => LogTarget::Directory(dir.clone()),
            None => LogTarget::Stderr,
        }
    }
}
