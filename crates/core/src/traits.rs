//! Accessor contract for model types
//!
//! Engines are decoupled from any introspection mechanism: each participating
//! type hands out its static declaration table and reads its own fields by
//! name. Nothing else about the type is visible to the engines.

use crate::error::{EngineError, EngineResult};
use crate::schema::TypeDescriptor;
use crate::value::Value;

// ============================================================================
// Reflect Trait
// ============================================================================

/// Trait for model types whose metadata and field values can be read at runtime
///
/// # Example
///
/// ```rust,ignore
/// use declara_core::{AsValue, EngineError, EngineResult, FieldDescriptor, Reflect,
///     TypeDescriptor, Value};
/// use std::sync::LazyLock;
///
/// static POINT: LazyLock<TypeDescriptor> = LazyLock::new(|| {
///     TypeDescriptor::new("Point")
///         .with_field(FieldDescriptor::new("x", "int"))
///         .with_field(FieldDescriptor::new("y", "int"))
/// });
///
/// struct Point { x: i32, y: i32 }
///
/// impl Reflect for Point {
///     fn type_descriptor() -> &'static TypeDescriptor { &POINT }
///
///     fn descriptor(&self) -> &'static TypeDescriptor { &POINT }
///
///     fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
///         match field {
///             "x" => Ok(self.x.as_value()),
///             "y" => Ok(self.y.as_value()),
///             other => Err(EngineError::field_access("Point", other)),
///         }
///     }
/// }
/// ```
pub trait Reflect: Sync {
    /// Declaration table of the type, without an instance
    fn type_descriptor() -> &'static TypeDescriptor
    where
        Self: Sized;

    /// Declaration table of this instance's type
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Read the current value of a declared field
    ///
    /// Returns [`EngineError::FieldAccess`] when the field cannot be read.
    fn field_value(&self, field: &str) -> EngineResult<Value<'_>>;

    /// Read every declared field, in declaration order
    fn field_values(&self) -> EngineResult<Vec<(&'static str, Value<'_>)>> {
        self.descriptor()
            .fields
            .iter()
            .map(|f| Ok((f.name.as_str(), self.field_value(&f.name)?)))
            .collect()
    }

    /// Name of the instance's type
    fn type_name(&self) -> &'static str {
        self.descriptor().name.as_str()
    }
}

/// Build the access error for a field that is not declared on `ty`
pub fn unknown_field(ty: &TypeDescriptor, field: &str) -> EngineError {
    EngineError::field_access(ty.name.clone(), field)
}

// ============================================================================
// Tests
// ============================================================================
