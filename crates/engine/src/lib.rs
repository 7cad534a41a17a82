//! # Declara Engine
//!
//! Engines that consume the declarations built with `declara_core`.
//!
//! ## Features
//!
//! - **Scanning**: Collect every descriptor of a type into a report
//! - **Validation**: Check instances against their declared rules
//! - **Serialization**: Encode values and instances as compact JSON
//! - **Components**: Detect component types and build fresh instances
//!

// ============================================================================
// Modules
// ============================================================================

pub mod component;
pub mod config;
pub mod scanner;
pub mod serialization;
pub mod validation;

#[cfg(test)]
mod fixtures;

// ============================================================================
// Re-exports
// ============================================================================

pub use component::{create_instance, is_component};
pub use config::{
    CONFIG_FILENAME, DEFAULT_MAX_DEPTH, EngineConfig, ScanConfig, SerializationConfig,
    ValidationConfig,
};
pub use scanner::{
    FieldReport, OperationReport, ParamReport, Scanner, TypeReport, reports_to_json,
};
pub use serialization::{JsonSerializer, escape_json, serialized_fields};
pub use validation::{Validator, Violation};

use declara_core::{EngineResult, Reflect, TypeDescriptor};

// ============================================================================
// Engine
// ============================================================================

/// The three engines built from one configuration
#[derive(Debug, Clone, Default)]
pub struct Engine {
    scanner: Scanner,
    validator: Validator,
    serializer: JsonSerializer,
}

impl Engine {
    /// Create an engine set with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine set from a configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            scanner: Scanner::with_config(config.scan.clone()),
            validator: Validator::with_config(config.validation.clone()),
            serializer: JsonSerializer::with_config(config.serialization.clone()),
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn serializer(&self) -> &JsonSerializer {
        &self.serializer
    }

    /// Scan a declaration table
    pub fn scan(&self, descriptor: &TypeDescriptor) -> TypeReport {
        self.scanner.scan_type(descriptor)
    }

    /// Validate an instance, returning `"field: message"` lines
    pub fn validate(&self, instance: &dyn Reflect) -> EngineResult<Vec<String>> {
        self.validator.validate(instance)
    }

    /// Serialize an instance as a JSON object
    pub fn to_json(&self, instance: &dyn Reflect) -> EngineResult<String> {
        self.serializer.object_to_json(instance)
    }
}

// ============================================================================
// Tests
// ============================================================================
