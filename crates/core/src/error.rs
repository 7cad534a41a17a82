//! Error types for Declara
//!
//! This module provides unified error handling for the metadata model and
//! the engines that consume it. Only failures that must reach the caller live
//! here: a validation rule whose preconditions are not met is never an error.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Declara
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Access Errors
    // ========================================================================
    /// A declared field could not be read from an instance
    #[error("Cannot read field '{field}' of type '{type_name}'")]
    FieldAccess { type_name: String, field: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// Object graph nesting exceeded the configured limit (likely a cycle)
    #[error("Nesting depth limit of {limit} exceeded while serializing")]
    DepthExceeded { limit: usize },

    /// JSON serialization error (tooling dumps)
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Create a field access error
    pub fn field_access(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        EngineError::FieldAccess {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::InvalidConfig(msg.into())
    }

    /// Check if this error comes from reading an instance
    pub fn is_access(&self) -> bool {
        matches!(self, EngineError::FieldAccess { .. })
    }

    /// Check if this error is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConfig(_) | EngineError::ConfigRead { .. }
        )
    }

    /// Check if this error was caused by the file system
    pub fn is_io(&self) -> bool {
        matches!(self, EngineError::ConfigRead { .. })
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================
