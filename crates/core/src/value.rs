//! Runtime values read from model instances
//!
//! Engines never inspect Rust types directly. Every field read goes through
//! the [`Reflect`] accessor contract and comes back as a [`Value`], a small
//! closed tagged union the engines dispatch on explicitly.

use crate::traits::Reflect;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Value
// ============================================================================

/// A field value borrowed from a model instance
#[derive(Clone)]
pub enum Value<'a> {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Single character
    Char(char),
    /// Text
    Text(Cow<'a, str>),
    /// Ordered sequence
    Seq(Vec<Value<'a>>),
    /// Key-value mapping, in iteration order of the source
    Map(Vec<(String, Value<'a>)>),
    /// Nested structured object
    Object(&'a dyn Reflect),
}

impl<'a> Value<'a> {
    /// Create a text value
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Value::Text(text.into())
    }

    /// Wrap a nested object
    pub fn object(object: &'a dyn Reflect) -> Self {
        Value::Object(object)
    }

    /// Check if the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if the value is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Numeric view of the value, `None` for anything that is not a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Textual form used by text-based rules, `None` when absent
    pub fn text_form(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Text(text) => Some(Cow::Borrowed(text.as_ref())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Short label for the kind of value
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Text(_) => "text",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
            Value::Object(_) => "object",
        }
    }
}

/// Format a float the way the engine prints numbers
///
/// Integral values keep a trailing `.0` so they stay distinguishable from
/// integers; everything else uses the shortest round-trip form.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Char(c) => write!(f, "{}", c),
            Value::Text(text) => write!(f, "{}", text),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => write!(f, "{}", object.descriptor().name),
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Value::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Value::Seq(v) => f.debug_tuple("Seq").field(v).finish(),
            Value::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Value::Object(object) => f
                .debug_tuple("Object")
                .field(&object.descriptor().name)
                .finish(),
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(*a as *const dyn Reflect, *b as *const dyn Reflect)
            }
            _ => false,
        }
    }
}

// ============================================================================
// AsValue
// ============================================================================

/// Conversion from a Rust field into a [`Value`]
///
/// Model types call this from their accessor implementation. Nested model
/// objects are wrapped with [`Value::object`] instead.
pub trait AsValue {
    /// Borrow `self` as a value
    fn as_value(&self) -> Value<'_>;
}

macro_rules! impl_as_value {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl AsValue for $ty {
                fn as_value(&self) -> Value<'_> {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

impl_as_value!(Int as i64: i8, i16, i32, i64, isize);
impl_as_value!(UInt as u64: u8, u16, u32, u64, usize);
impl_as_value!(Float as f64: f32, f64);

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for char {
    fn as_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self.as_str()))
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::Null,
        }
    }
}

impl<T: AsValue> AsValue for [T] {
    fn as_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(AsValue::as_value).collect())
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_value(&self) -> Value<'_> {
        self.as_slice().as_value()
    }
}

impl<K: ToString, V: AsValue> AsValue for BTreeMap<K, V> {
    fn as_value(&self) -> Value<'_> {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.as_value()))
                .collect(),
        )
    }
}

impl<K: ToString, V: AsValue, S> AsValue for HashMap<K, V, S> {
    fn as_value(&self) -> Value<'_> {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.as_value()))
                .collect(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
