//! Metadata descriptors
//!
//! This module contains the declarative vocabulary attached to model types:
//! per-type, per-field, per-operation and per-parameter descriptors, plus the
//! repeatable per-field validation rule. All descriptors are plain immutable
//! data. Every constructor starts from the documented defaults, and nothing
//! here checks the metadata for consistency (a rule with `min > max` is
//! accepted as declared).

use serde::{Deserialize, Serialize};

// ============================================================================
// Type-level Descriptors
// ============================================================================

/// Documentation metadata attached to a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeInfo {
    /// Author of the type
    pub author: String,
    /// Version label
    pub version: String,
    /// Free-text description
    pub description: String,
    /// Creation marker (usually a date)
    pub created: String,
    /// Ordered tags
    pub tags: Vec<String>,
}

impl TypeInfo {
    /// Create type info with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the version label
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the creation marker
    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = created.into();
        self
    }

    /// Append tags, keeping declaration order
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

impl Default for TypeInfo {
    fn default() -> Self {
        Self {
            author: "unknown".to_string(),
            version: "1.0".to_string(),
            description: String::new(),
            created: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Instantiation scope of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    /// One shared instance
    #[default]
    Singleton,
    /// A fresh instance per request
    Prototype,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Singleton => write!(f, "SINGLETON"),
            Scope::Prototype => write!(f, "PROTOTYPE"),
        }
    }
}

/// Marks a type as an externally instantiable component
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentTag {
    /// Component name
    pub name: String,
    /// Instantiation scope
    pub scope: Scope,
}

impl ComponentTag {
    /// Create a singleton component tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::Singleton,
        }
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

// ============================================================================
// Field-level Descriptors
// ============================================================================

/// Documentation metadata attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldInfo {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Whether the field is documented as required
    pub required: bool,
    /// Documented minimum length
    pub min_length: i32,
    /// Documented maximum length
    pub max_length: i32,
    /// Documented pattern (informational; enforcement is done by rules)
    pub pattern: String,
}

impl FieldInfo {
    /// Create field info with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the documented length range
    pub fn with_length(mut self, min: i32, max: i32) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Set the documented pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

impl Default for FieldInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            required: false,
            min_length: 0,
            max_length: i32::MAX,
            pattern: String::new(),
        }
    }
}

/// Kind of a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Value must be present
    Required,
    /// Value must be present and not blank
    NonEmpty,
    /// Value must look like an email address
    Email,
    /// Value must look like a mobile phone number
    Phone,
    /// Numeric value must not be below `min`
    Min,
    /// Numeric value must not be above `max`
    Max,
    /// Text length must lie within `[min, max]`
    LengthRange,
    /// Text must fully match `pattern`
    Pattern,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Required => write!(f, "REQUIRED"),
            RuleKind::NonEmpty => write!(f, "NON_EMPTY"),
            RuleKind::Email => write!(f, "EMAIL"),
            RuleKind::Phone => write!(f, "PHONE"),
            RuleKind::Min => write!(f, "MIN"),
            RuleKind::Max => write!(f, "MAX"),
            RuleKind::LengthRange => write!(f, "LENGTH_RANGE"),
            RuleKind::Pattern => write!(f, "PATTERN"),
        }
    }
}

/// A single validation rule attached to a field
///
/// Fields carry an ordered list of rules; each is evaluated on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind
    pub kind: RuleKind,
    /// Custom failure message (empty means "use the default phrase")
    #[serde(default)]
    pub message: String,
    /// Numeric lower bound
    #[serde(default = "default_min")]
    pub min: i64,
    /// Numeric upper bound
    #[serde(default = "default_max")]
    pub max: i64,
    /// Regex for `Pattern` rules
    #[serde(default)]
    pub pattern: String,
}

fn default_min() -> i64 {
    i64::MIN
}

fn default_max() -> i64 {
    i64::MAX
}

impl ValidationRule {
    /// Create a rule of the given kind with default bounds
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: String::new(),
            min: default_min(),
            max: default_max(),
            pattern: String::new(),
        }
    }

    /// Value must be present
    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    /// Value must be present and not blank
    pub fn non_empty() -> Self {
        Self::new(RuleKind::NonEmpty)
    }

    /// Value must be an email address
    pub fn email() -> Self {
        Self::new(RuleKind::Email)
    }

    /// Value must be a mobile phone number
    pub fn phone() -> Self {
        Self::new(RuleKind::Phone)
    }

    /// Numeric lower bound
    pub fn min(min: i64) -> Self {
        Self::new(RuleKind::Min).with_min(min)
    }

    /// Numeric upper bound
    pub fn max(max: i64) -> Self {
        Self::new(RuleKind::Max).with_max(max)
    }

    /// Inclusive text length range
    pub fn length(min: i64, max: i64) -> Self {
        Self::new(RuleKind::LengthRange).with_min(min).with_max(max)
    }

    /// Full-match regex
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::new(RuleKind::Pattern)
        }
    }

    /// Set a custom failure message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the lower bound
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    /// Set the upper bound
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    /// Phrase used when no custom message is declared
    pub fn default_message(&self) -> String {
        match self.kind {
            RuleKind::Required => "must not be null".to_string(),
            RuleKind::NonEmpty => "must not be empty".to_string(),
            RuleKind::Email => "invalid email format".to_string(),
            RuleKind::Phone => "invalid phone number format".to_string(),
            RuleKind::Min => format!("must not be less than {}", self.min),
            RuleKind::Max => format!("must not be greater than {}", self.max),
            RuleKind::LengthRange => {
                format!("length must be between {}-{}", self.min, self.max)
            }
            RuleKind::Pattern => "invalid format".to_string(),
        }
    }

    /// The message reported on failure
    pub fn effective_message(&self) -> String {
        if self.message.is_empty() {
            self.default_message()
        } else {
            self.message.clone()
        }
    }
}

impl std::fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            RuleKind::Min => write!(f, "{}({})", self.kind, self.min),
            RuleKind::Max => write!(f, "{}({})", self.kind, self.max),
            RuleKind::LengthRange => write!(f, "{}({}-{})", self.kind, self.min, self.max),
            RuleKind::Pattern => write!(f, "{}({})", self.kind, self.pattern),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Serialization hints attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFieldInfo {
    /// External name override (empty means "use the field name")
    pub name: String,
    /// Whether the field is left out of serialized output
    pub exclude: bool,
    /// Format hint, stored for tooling
    pub format: String,
    /// Position in serialized output; `None` sorts after every ordered field
    pub order: Option<i32>,
}

impl JsonFieldInfo {
    /// Hints with an external name override
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Hints that exclude the field from output
    pub fn excluded() -> Self {
        Self {
            exclude: true,
            ..Self::default()
        }
    }

    /// Set the order key
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the format hint
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

// ============================================================================
// Operation-level Descriptors
// ============================================================================

/// Documentation metadata attached to an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationInfo {
    /// Free-text description
    pub description: String,
    /// Declared return-type label
    pub return_type: String,
    /// Whether the operation is deprecated
    pub deprecated: bool,
    /// Version the operation first appeared in
    pub since: String,
    /// Free-text parameter descriptions, in parameter order
    pub params: Vec<String>,
}

impl OperationInfo {
    /// Create operation info with a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the return-type label
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Mark the operation as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Set the since-version
    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = since.into();
        self
    }

    /// Set the parameter descriptions
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for OperationInfo {
    fn default() -> Self {
        Self {
            description: String::new(),
            return_type: "void".to_string(),
            deprecated: false,
            since: "1.0".to_string(),
            params: Vec::new(),
        }
    }
}

/// Documentation metadata attached to an operation parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamInfo {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Whether the argument is mandatory
    pub required: bool,
    /// Default value text
    pub default_value: String,
}

impl ParamInfo {
    /// Create parameter info with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the parameter as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the default value text
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }
}

impl Default for ParamInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            required: true,
            default_value: String::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_info_defaults() {
        let info = TypeInfo::new();
        assert_eq!(info.author, "unknown");
        assert_eq!(info.version, "1.0");
        assert!(info.tags.is_empty());
    }

    #[test]
    fn test_type_info_tags_keep_order() {
        let info = TypeInfo::new().with_tags(["entity", "user", "core"]);
        assert_eq!(info.tags, vec!["entity", "user", "core"]);
    }

    #[test]
    fn test_rule_default_messages() {
        assert_eq!(ValidationRule::required().default_message(), "must not be null");
        assert_eq!(
            ValidationRule::min(0).default_message(),
            "must not be less than 0"
        );
        assert_eq!(
            ValidationRule::max(150).default_message(),
            "must not be greater than 150"
        );
        assert_eq!(
            ValidationRule::length(3, 20).default_message(),
            "length must be between 3-20"
        );
    }

    #[test]
    fn test_rule_effective_message_prefers_custom() {
        let rule = ValidationRule::email().with_message("bad email");
        assert_eq!(rule.effective_message(), "bad email");
        assert_eq!(ValidationRule::email().effective_message(), "invalid email format");
    }

    #[test]
    fn test_rule_bounds_are_not_checked() {
        let rule = ValidationRule::length(10, 2);
        assert_eq!(rule.min, 10);
        assert_eq!(rule.max, 2);
    }

    #[test]
    fn test_max_rule_keeps_default_min() {
        let rule = ValidationRule::max(150);
        assert_eq!(rule.min, i64::MIN);
        assert_eq!(rule.max, 150);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(ValidationRule::length(3, 20).to_string(), "LENGTH_RANGE(3-20)");
        assert_eq!(ValidationRule::non_empty().to_string(), "NON_EMPTY");
    }

    #[test]
    fn test_rule_deserialize_fills_bounds() {
        let rule: ValidationRule = serde_json::from_str(r#"{"kind":"MIN","min":5}"#).unwrap();
        assert_eq!(rule.kind, RuleKind::Min);
        assert_eq!(rule.min, 5);
        assert_eq!(rule.max, i64::MAX);
        assert!(rule.message.is_empty());
    }

    #[test]
    fn test_json_field_info_defaults() {
        let hints = JsonFieldInfo::default();
        assert!(hints.name.is_empty());
        assert!(!hints.exclude);
        assert_eq!(hints.order, None);

        let hints = JsonFieldInfo::named("productId").with_order(1);
        assert_eq!(hints.name, "productId");
        assert_eq!(hints.order, Some(1));
    }

    #[test]
    fn test_operation_and_param_defaults() {
        let op = OperationInfo::default();
        assert_eq!(op.return_type, "void");
        assert_eq!(op.since, "1.0");
        assert!(!op.deprecated);

        let param = ParamInfo::new("quantity");
        assert!(param.required);
        assert!(!param.optional().required);
    }

    #[test]
    fn test_component_tag() {
        let tag = ComponentTag::new("userService");
        assert_eq!(tag.scope, Scope::Singleton);
        let tag = tag.with_scope(Scope::Prototype);
        assert_eq!(tag.scope.to_string(), "PROTOTYPE");
    }
}
