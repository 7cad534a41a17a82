//! Reflection scanner
//!
//! Walks a type's declaration table and collects every attached descriptor
//! into a [`TypeReport`]. Absent metadata is simply left out of the report;
//! scanning never fails.

use crate::config::ScanConfig;
use declara_core::{
    ComponentTag, EngineResult, FieldDescriptor, FieldInfo, JsonFieldInfo, OperationDescriptor,
    OperationInfo, ParamInfo, Reflect, TypeDescriptor, TypeInfo, ValidationRule,
};
use serde::Serialize;

// ============================================================================
// Report Types
// ============================================================================

/// Everything declared on one type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeReport {
    /// Type name
    pub type_name: String,

    /// Type-level documentation, if declared
    pub type_info: Option<TypeInfo>,

    /// Component marker, if declared
    pub component: Option<ComponentTag>,

    /// One entry per declared field, in declaration order
    pub fields: Vec<FieldReport>,

    /// One entry per scanned operation, in declaration order
    pub operations: Vec<OperationReport>,
}

impl TypeReport {
    /// Find a field entry by name
    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find an operation entry by name
    pub fn operation(&self, name: &str) -> Option<&OperationReport> {
        self.operations.iter().find(|o| o.name == name)
    }

    /// Operations that carry at least one documented parameter
    pub fn documented_params(&self) -> impl Iterator<Item = &OperationReport> {
        self.operations.iter().filter(|o| !o.params.is_empty())
    }
}

/// Descriptors attached to one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// Declared field name
    pub name: String,

    /// Declared type label
    pub type_label: String,

    /// Documentation metadata
    pub info: Option<FieldInfo>,

    /// Full ordered rule list
    pub rules: Vec<ValidationRule>,

    /// Serialization hints
    pub json: Option<JsonFieldInfo>,

    /// Name the field gets in serialized output
    pub json_name: String,
}

impl FieldReport {
    fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            type_label: field.type_label.clone(),
            info: field.info.clone(),
            rules: field.rules.clone(),
            json: field.json.clone(),
            json_name: field.json_name().to_string(),
        }
    }

    /// Whether no descriptor at all was found on the field
    pub fn is_bare(&self) -> bool {
        self.info.is_none() && self.rules.is_empty() && self.json.is_none()
    }
}

/// Descriptors attached to one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationReport {
    /// Operation name
    pub name: String,

    /// Parameter list as written, e.g. `(String username)`
    pub signature: String,

    /// Label of the actual return type
    pub return_label: String,

    /// Documentation metadata
    pub info: Option<OperationInfo>,

    /// Parameters carrying `ParamInfo`, keyed by parameter name
    pub params: Vec<ParamReport>,
}

impl OperationReport {
    fn from_descriptor(operation: &OperationDescriptor) -> Self {
        Self {
            name: operation.name.clone(),
            signature: operation.signature(),
            return_label: operation.return_label.clone(),
            info: operation.info.clone(),
            params: operation
                .params
                .iter()
                .filter_map(|p| {
                    p.info.as_ref().map(|info| ParamReport {
                        name: p.name.clone(),
                        info: info.clone(),
                    })
                })
                .collect(),
        }
    }
}

/// `ParamInfo` of one parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamReport {
    /// Parameter name
    pub name: String,

    /// Attached documentation
    pub info: ParamInfo,
}

// ============================================================================
// Scanner
// ============================================================================

/// Metadata scanner
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with the given settings
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan the declaration of `T`
    pub fn scan<T: Reflect>(&self) -> TypeReport {
        self.scan_type(T::type_descriptor())
    }

    /// Scan one declaration table
    pub fn scan_type(&self, descriptor: &TypeDescriptor) -> TypeReport {
        let fields: Vec<FieldReport> = descriptor
            .fields
            .iter()
            .map(FieldReport::from_descriptor)
            .collect();

        let operations: Vec<OperationReport> = descriptor
            .operations
            .iter()
            .filter(|o| self.config.include_synthetic || !o.synthetic)
            .map(OperationReport::from_descriptor)
            .collect();

        tracing::debug!(
            "Scanned {}: {} field(s), {} operation(s)",
            descriptor.name,
            fields.len(),
            operations.len()
        );

        TypeReport {
            type_name: descriptor.name.clone(),
            type_info: descriptor.type_info.clone(),
            component: descriptor.component.clone(),
            fields,
            operations,
        }
    }

    /// Scan several declaration tables, keeping input order
    pub fn scan_many(&self, descriptors: &[&TypeDescriptor]) -> Vec<TypeReport> {
        descriptors.iter().map(|d| self.scan_type(d)).collect()
    }
}

/// Pretty-printed JSON dump of scan reports
pub fn reports_to_json(reports: &[TypeReport]) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

// ============================================================================
// Tests
// ============================================================================
