//! Runtime configuration
//!
//! Command-line flags win over environment variables, which win over the
//! defaults. Blank environment values count as unset.

use std::path::PathBuf;

use codeshelf_core::logging_facility::Profile;

pub const ENV_DB: &str = "CODESHELF_DB";
pub const ENV_LOG: &str = "CODESHELF_LOG";

pub const DEFAULT_DB_PATH: &str = ".codeshelf/store.db";

/// Info-level JSON on stderr; debug output is opt-in with `--log development`
pub const DEFAULT_PROFILE: Profile = Profile::Production;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_profile: Profile,
}

impl Config {
    /// Resolve against the process environment
    ///
    /// # Errors
    /// Returns a description of the problem when the log profile is unknown.
    pub fn resolve(db: Option<PathBuf>, log: Option<String>) -> Result<Self, String> {
        Self::resolve_with(db, log, read_non_empty_env)
    }

    /// Resolve with an explicit environment lookup
    ///
    /// # Errors
    /// Returns a description of the problem when the log profile is unknown.
    pub fn resolve_with(
        db: Option<PathBuf>,
        log: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let db_path = db
            .or_else(|| env(ENV_DB).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let log_profile = match log.or_else(|| env(ENV_LOG)) {
            Some(raw) => raw.parse()?,
            None => DEFAULT_PROFILE,
        };

        Ok(Self {
            db_path,
            log_profile,
        })
    }
}

#[must_use]
fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}
