//! Engine configuration
//!
//! Configuration is optional: every section and key falls back to its
//! default, so an empty `declara.toml` is valid.
//!
//! ```toml
//! [validation]
//! legacy_max_check = false
//!
//! [serialization]
//! max_depth = 64
//!
//! [scan]
//! include_synthetic = false
//! ```

use declara_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = "declara.toml";

/// Default nesting limit for serialization
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// EngineConfig
// ============================================================================

/// Configuration shared by the engines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Validation engine settings
    pub validation: ValidationConfig,

    /// Serialization engine settings
    pub serialization: SerializationConfig,

    /// Scanner settings
    pub scan: ScanConfig,
}

/// Validation engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Compare `MAX` rules against the declared min instead of the max,
    /// reproducing the behavior of older rule sets
    pub legacy_max_check: bool,
}

/// Serialization engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializationConfig {
    /// Maximum nesting depth before encoding fails
    pub max_depth: usize,
}

impl Default for SerializationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Scanner settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Keep generated operations in reports
    pub include_synthetic: bool,
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EngineError::config(e.message().to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string_pretty(self).map_err(|e| EngineError::config(e.to_string()))
    }

    /// Enable the legacy `MAX` comparison
    pub fn with_legacy_max_check(mut self) -> Self {
        self.validation.legacy_max_check = true;
        self
    }

    /// Set the serialization depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.serialization.max_depth = max_depth;
        self
    }

    /// Keep synthetic operations in scan reports
    pub fn with_synthetic_operations(mut self) -> Self {
        self.scan.include_synthetic = true;
        self
    }

    fn check(&self) -> EngineResult<()> {
        if self.serialization.max_depth == 0 {
            return Err(EngineError::config(
                "serialization.max_depth must be at least 1",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(!config.validation.legacy_max_check);
        assert_eq!(config.serialization.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.scan.include_synthetic);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [validation]
            legacy_max_check = true
            "#,
        )
        .unwrap();
        assert!(config.validation.legacy_max_check);
        assert_eq!(config.serialization.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = EngineConfig::from_toml_str("[serialization]\npretty = true\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let err = EngineConfig::from_toml_str("[serialization]\nmax_depth = 0\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\ninclude_synthetic = true").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert!(config.scan.include_synthetic);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join(CONFIG_FILENAME)).unwrap_err();
        assert!(err.is_config());
        assert!(err.is_io());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::new().with_legacy_max_check().with_max_depth(8);
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
