//! JSON serialization engine
//!
//! Renders a [`Value`] as compact JSON text. Structured objects are shaped
//! by the serialization hints on their fields: the external name override,
//! the exclude flag and the order key.
//!
//! Output is built in a local buffer and only returned once the whole value
//! has been encoded, so a failed field read never leaks partial JSON.

use crate::config::SerializationConfig;
use declara_core::{
    EngineError, EngineResult, FieldDescriptor, Reflect, TypeDescriptor, Value, format_float,
};

// ============================================================================
// JsonSerializer
// ============================================================================

/// Metadata-driven JSON encoder
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    config: SerializationConfig,
}

impl JsonSerializer {
    /// Create a serializer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with the given settings
    pub fn with_config(config: SerializationConfig) -> Self {
        Self { config }
    }

    /// Encode any value
    pub fn to_json(&self, value: &Value<'_>) -> EngineResult<String> {
        let mut out = String::new();
        self.write_value(&mut out, value, 0)?;
        Ok(out)
    }

    /// Encode a structured object
    pub fn object_to_json(&self, object: &dyn Reflect) -> EngineResult<String> {
        self.to_json(&Value::object(object))
    }

    fn write_value(
        &self,
        out: &mut String,
        value: &Value<'_>,
        depth: usize,
    ) -> EngineResult<()> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Value::Int(v) => out.push_str(&v.to_string()),
            Value::UInt(v) => out.push_str(&v.to_string()),
            Value::Float(v) if v.is_finite() => out.push_str(&format_float(*v)),
            Value::Float(_) => out.push_str("null"),
            Value::Char(c) => {
                let mut buf = [0u8; 4];
                write_string(out, c.encode_utf8(&mut buf));
            }
            Value::Text(text) => write_string(out, text),
            Value::Seq(items) => {
                self.enter(depth)?;
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item, depth + 1)?;
                }
                out.push(']');
            }
            Value::Map(entries) => {
                self.enter(depth)?;
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_string(out, key);
                    out.push(':');
                    self.write_value(out, item, depth + 1)?;
                }
                out.push('}');
            }
            Value::Object(object) => {
                self.enter(depth)?;
                self.write_object(out, *object, depth)?;
            }
        }
        Ok(())
    }

    fn write_object(
        &self,
        out: &mut String,
        object: &dyn Reflect,
        depth: usize,
    ) -> EngineResult<()> {
        let descriptor = object.descriptor();
        tracing::trace!("Serializing {} at depth {}", descriptor.name, depth);

        out.push('{');
        let mut first = true;
        for field in serialized_fields(descriptor) {
            let value = object.field_value(&field.name)?;
            if !first {
                out.push(',');
            }
            first = false;
            write_string(out, field.json_name());
            out.push(':');
            self.write_value(out, &value, depth + 1)?;
        }
        out.push('}');
        Ok(())
    }

    fn enter(&self, depth: usize) -> EngineResult<()> {
        if depth >= self.config.max_depth {
            return Err(EngineError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Fields of a type in output order, excluded fields removed
///
/// Fields with an order key come first, ascending; fields without one follow.
/// Ties keep declaration order.
pub fn serialized_fields(descriptor: &TypeDescriptor) -> Vec<&FieldDescriptor> {
    let mut fields: Vec<&FieldDescriptor> = descriptor
        .fields
        .iter()
        .filter(|f| !f.is_excluded())
        .collect();
    fields.sort_by_key(|f| match f.json_order() {
        Some(order) => (false, order),
        None => (true, 0),
    });
    fields
}

/// Escape text for use inside a JSON string literal
pub fn escape_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    push_escaped(out, text);
    out.push('"');
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
