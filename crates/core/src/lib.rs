//! # Declara Core
//!
//! Metadata model, value model and accessor contract for Declara.
//!
//! This crate provides the foundational building blocks used by the
//! engines, including:
//!
//! - **Types**: Metadata descriptors (`TypeInfo`, `FieldInfo`, `ValidationRule`, ...)
//! - **Schema**: Declaration tables (`TypeDescriptor`, `FieldDescriptor`, ...)
//! - **Values**: The `Value` tagged union read from instances
//! - **Traits**: The `Reflect` accessor contract
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod schema;
pub mod traits;
pub mod types;
pub mod value;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use schema::{FieldDescriptor, OperationDescriptor, ParamDescriptor, TypeDescriptor};
pub use traits::{Reflect, unknown_field};
pub use types::{
    ComponentTag, FieldInfo, JsonFieldInfo, OperationInfo, ParamInfo, RuleKind, Scope, TypeInfo,
    ValidationRule,
};
pub use value::{AsValue, Value, format_float};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
