//! Server configuration
//!
//! One TOML file plus defaults; CLI flags override file values. Every
//! knob maps onto a limit the core components take at construction.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use artifex_core::errors::{ArtifexError, Result};
use artifex_core::inspector::InspectLimits;
use artifex_core::logging_facility::Profile;

/// Logging profile selection as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

/// Router and engine limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP listen address
    pub listen: String,
    /// Deadline per request; exceeding it abandons the correlation entry
    pub response_timeout_ms: u64,
    /// Hard cap on collection enumeration during inspection
    pub collection_count_cap: usize,
    /// Cap on extracted item identifiers per collection
    pub identifier_cap: usize,
    /// Inspector recursion depth limit
    pub inspect_max_depth: usize,
    /// Pattern build depth guard
    pub pattern_max_depth: usize,
    /// Logging profile
    pub log_profile: LogProfile,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:7430".to_string(),
            response_timeout_ms: 30_000,
            collection_count_cap: 1000,
            identifier_cap: 50,
            inspect_max_depth: 5,
            pattern_max_depth: 10,
            log_profile: LogProfile::Development,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file; unset keys take their defaults
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ArtifexError::Internal {
            message: format!("cannot read config {}: {}", path.display(), e),
        })?;
        toml::from_str(&text).map_err(|e| ArtifexError::Serialization {
            message: format!("invalid config {}: {}", path.display(), e),
        })
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn inspect_limits(&self) -> InspectLimits {
        InspectLimits {
            collection_count_cap: self.collection_count_cap,
            identifier_cap: self.identifier_cap,
            max_depth: self.inspect_max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen, "127.0.0.1:7430");
        assert_eq!(config.response_timeout(), Duration::from_secs(30));
        assert_eq!(config.inspect_limits().collection_count_cap, 1000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = \"0.0.0.0:9000\"").unwrap();
        writeln!(file, "response_timeout_ms = 500").unwrap();
        writeln!(file, "log_profile = \"production\"").unwrap();

        let config = ServerConfig::from_path(file.path()).unwrap();
        assert_eq!(config.listen, "0.0.0.0:9000");
        assert_eq!(config.response_timeout_ms, 500);
        assert_eq!(config.log_profile, LogProfile::Production);
        // Unset keys keep defaults
        assert_eq!(config.identifier_cap, 50);
    }

    #[test]
    fn test_invalid_file_is_a_typed_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = [1, 2]").unwrap();

        assert!(matches!(
            ServerConfig::from_path(file.path()),
            Err(ArtifexError::Serialization { .. })
        ));
    }
}
