//! Runtime configuration resolved at startup.
//!
//! Priority: command-line flag > environment variable > default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::db::transfer::EXPORT_LIMIT;
use crate::http::DEFAULT_TIMEOUT;

pub const DATA_DIR_ENV: &str = "GOLEM_DATA_DIR";
pub const TIMEOUT_ENV: &str = "GOLEM_TIMEOUT_SECS";

/// Number of history rows the history view loads at a time.
pub const HISTORY_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `golem.db`.
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub use_system_proxy: bool,
    pub history_page_size: i64,
    pub export_limit: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            use_system_proxy: true,
            history_page_size: HISTORY_PAGE_SIZE,
            export_limit: EXPORT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Apply environment overrides and then an explicit data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let mut config = AppConfig::default();

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(val) = std::env::var(TIMEOUT_ENV) {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout_secs = secs,
                _ => log::warn!("Ignoring invalid {}={}", TIMEOUT_ENV, val),
            }
        }
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `~/.golem`, falling back to a relative `.golem` when no home directory
/// is known.
fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".golem");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".golem");
    }
    PathBuf::from(".golem")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.history_page_size, 100);
        assert_eq!(config.export_limit, 10_000);
        assert!(config.data_dir.ends_with(".golem"));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig::resolve(Some(PathBuf::from("/tmp/golem-explicit")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/golem-explicit"));
    }
}
