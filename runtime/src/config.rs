//! Chain configuration with TOML file support.

use guild_types::ChainId;
use guild_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::RuntimeError;

/// Configuration for an in-process chain.
///
/// Load from TOML via [`ChainConfig::from_toml_file`] or build in code.
/// Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain identity mixed into every org-creation salt.
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,

    /// Deepest nesting of calls a transaction may reach.
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. "info" or "debug,guild_runtime=trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> ChainId {
    ChainId::DEV
}

fn default_max_call_depth() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ChainConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RuntimeError> {
        let config: Self = toml::from_str(s).map_err(|e| RuntimeError::Config(e.to_string()))?;
        if config.max_call_depth == 0 {
            return Err(RuntimeError::Config("max_call_depth must be at least 1".into()));
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ChainConfig is always serializable to TOML")
    }

    /// Install the global log subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), RuntimeError> {
        guild_utils::init_logging(self.log_format, &self.log_level)?;
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            max_call_depth: default_max_call_depth(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ChainConfig::default();
        let parsed = ChainConfig::from_toml_str(&config.to_toml_string()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ChainConfig::from_toml_str("").unwrap();
        assert_eq!(config.chain_id, ChainId(31337));
        assert_eq!(config.max_call_depth, 64);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            chain_id = 1
            log_format = "json"
        "#;
        let config = ChainConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.chain_id, ChainId::MAINNET);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_call_depth, 64);
    }

    #[test]
    fn zero_call_depth_is_rejected() {
        let err = ChainConfig::from_toml_str("max_call_depth = 0").unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ChainConfig::from_toml_str("chain_id = \"mainnet\"").unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chain_id = 5\nmax_call_depth = 8").unwrap();
        let config = ChainConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.chain_id, ChainId(5));
        assert_eq!(config.max_call_depth, 8);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ChainConfig::from_toml_file("/nonexistent/guild.toml").unwrap_err();
        assert!(matches!(err, RuntimeError::Io(_)));
    }

    #[test]
    fn logging_installs_once() {
        let config = ChainConfig {
            log_level: "warn".into(),
            ..ChainConfig::default()
        };
        let _ = config.init_logging();
        assert!(matches!(
            config.init_logging(),
            Err(RuntimeError::Logging(guild_utils::LoggingError::AlreadyInstalled))
        ));
    }
}
