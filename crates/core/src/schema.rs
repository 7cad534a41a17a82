//! Declaration tables for annotated model types
//!
//! A `TypeDescriptor` is the static declaration of one model type: its
//! type-level descriptors plus the ordered fields and operations, each with
//! the descriptors attached to it. Tables are built once with the builder
//! methods below (usually inside a `static LazyLock`) and never change.

use crate::types::{
    ComponentTag, FieldInfo, JsonFieldInfo, OperationInfo, ParamInfo, TypeInfo, ValidationRule,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// TypeDescriptor
// ============================================================================

/// Declaration table of a model type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name (e.g., "User")
    pub name: String,

    /// Documentation metadata
    pub type_info: Option<TypeInfo>,

    /// Component marker
    pub component: Option<ComponentTag>,

    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,

    /// Operations in declaration order
    pub operations: Vec<OperationDescriptor>,
}

impl TypeDescriptor {
    /// Create an empty declaration for the named type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_info: None,
            component: None,
            fields: Vec::new(),
            operations: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach type info
    pub fn with_type_info(mut self, info: TypeInfo) -> Self {
        self.type_info = Some(info);
        self
    }

    /// Attach a component tag
    pub fn with_component(mut self, component: ComponentTag) -> Self {
        self.component = Some(component);
        self
    }

    /// Declare the next field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare the next operation
    pub fn with_operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Find a field by its declared name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find an operation by its declared name
    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|o| o.name == name)
    }

    /// Check whether the type is tagged as a component
    pub fn is_component(&self) -> bool {
        self.component.is_some()
    }

    /// Total number of validation rules over all fields
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|f| f.rules.len()).sum()
    }
}

// ============================================================================
// FieldDescriptor
// ============================================================================

/// Declaration of one field and its attached descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Declared field name
    pub name: String,

    /// Label of the declared field type (e.g., "String", "Long")
    pub type_label: String,

    /// Documentation metadata
    pub info: Option<FieldInfo>,

    /// Validation rules in attachment order
    pub rules: Vec<ValidationRule>,

    /// Serialization hints
    pub json: Option<JsonFieldInfo>,
}

impl FieldDescriptor {
    /// Declare a field with no metadata
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
            info: None,
            rules: Vec::new(),
            json: None,
        }
    }

    /// Attach field info
    pub fn with_info(mut self, info: FieldInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Attach one more validation rule
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Attach serialization hints
    pub fn with_json(mut self, json: JsonFieldInfo) -> Self {
        self.json = Some(json);
        self
    }

    /// Display name, empty when no field info is attached
    pub fn display_name(&self) -> &str {
        self.info.as_ref().map(|i| i.name.as_str()).unwrap_or("")
    }

    /// Name used in serialized output
    pub fn json_name(&self) -> &str {
        match &self.json {
            Some(json) if !json.name.is_empty() => &json.name,
            _ => &self.name,
        }
    }

    /// Order key, `None` meaning "after every ordered field"
    pub fn json_order(&self) -> Option<i32> {
        self.json.as_ref().and_then(|j| j.order)
    }

    /// Whether the field is left out of serialized output
    pub fn is_excluded(&self) -> bool {
        self.json.as_ref().is_some_and(|j| j.exclude)
    }

    /// Whether any descriptor is attached
    pub fn has_metadata(&self) -> bool {
        self.info.is_some() || !self.rules.is_empty() || self.json.is_some()
    }
}

// ============================================================================
// OperationDescriptor
// ============================================================================

/// Declaration of one operation (method) and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Operation name
    pub name: String,

    /// Label of the actual return type
    pub return_label: String,

    /// Documentation metadata
    pub info: Option<OperationInfo>,

    /// Parameters in declaration order
    pub params: Vec<ParamDescriptor>,

    /// Whether the operation was generated rather than written by the author
    #[serde(default)]
    pub synthetic: bool,
}

impl OperationDescriptor {
    /// Declare an operation with no metadata
    pub fn new(name: impl Into<String>, return_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_label: return_label.into(),
            info: None,
            params: Vec::new(),
            synthetic: false,
        }
    }

    /// Attach operation info
    pub fn with_info(mut self, info: OperationInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Declare the next parameter
    pub fn with_param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    /// Mark the operation as generated
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Parameter list as written in a signature, e.g. `(String username, int age)`
    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.type_label, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("({})", params)
    }
}

// ============================================================================
// ParamDescriptor
// ============================================================================

/// Declaration of one operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name
    pub name: String,

    /// Label of the parameter type
    pub type_label: String,

    /// Documentation metadata
    pub info: Option<ParamInfo>,
}

impl ParamDescriptor {
    /// Declare a parameter with no metadata
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
            info: None,
        }
    }

    /// Attach parameter info
    pub fn with_info(mut self, info: ParamInfo) -> Self {
        self.info = Some(info);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scope;
    use pretty_assertions::assert_eq;

    fn sample() -> TypeDescriptor {
        TypeDescriptor::new("Account")
            .with_type_info(TypeInfo::new().with_author("ops"))
            .with_component(ComponentTag::new("accountService").with_scope(Scope::Prototype))
            .with_field(
                FieldDescriptor::new("account_id", "Long")
                    .with_info(FieldInfo::new("Account ID").required())
                    .with_rule(ValidationRule::required())
                    .with_json(JsonFieldInfo::named("id").with_order(1)),
            )
            .with_field(FieldDescriptor::new("note", "String"))
            .with_operation(
                OperationDescriptor::new("rename", "boolean")
                    .with_param(ParamDescriptor::new("name", "String"))
                    .with_param(ParamDescriptor::new("force", "boolean")),
            )
    }

    #[test]
    fn test_lookups() {
        let ty = sample();
        assert!(ty.field("account_id").is_some());
        assert!(ty.field("missing").is_none());
        assert!(ty.operation("rename").is_some());
        assert!(ty.is_component());
        assert_eq!(ty.rule_count(), 1);
    }

    #[test]
    fn test_field_defaults_without_metadata() {
        let ty = sample();
        let note = ty.field("note").unwrap();
        assert_eq!(note.display_name(), "");
        assert_eq!(note.json_name(), "note");
        assert_eq!(note.json_order(), None);
        assert!(!note.is_excluded());
        assert!(!note.has_metadata());
    }

    #[test]
    fn test_field_with_metadata() {
        let ty = sample();
        let id = ty.field("account_id").unwrap();
        assert_eq!(id.display_name(), "Account ID");
        assert_eq!(id.json_name(), "id");
        assert_eq!(id.json_order(), Some(1));
        assert!(id.has_metadata());
    }

    #[test]
    fn test_empty_override_falls_back_to_field_name() {
        let field = FieldDescriptor::new("phone", "String").with_json(JsonFieldInfo::excluded());
        assert_eq!(field.json_name(), "phone");
        assert!(field.is_excluded());
    }

    #[test]
    fn test_signature() {
        let ty = sample();
        assert_eq!(
            ty.operation("rename").unwrap().signature(),
            "(String name, boolean force)"
        );
        assert_eq!(OperationDescriptor::new("ping", "void").signature(), "()");
    }

    #[test]
    fn test_descriptor_serializes() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["name"], "Account");
        assert_eq!(json["component"]["scope"], "PROTOTYPE");
        assert_eq!(json["fields"][0]["rules"][0]["kind"], "REQUIRED");
    }
}
