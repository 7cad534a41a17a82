//! Model types shared by the engine tests

use declara_core::{
    AsValue, ComponentTag, EngineError, EngineResult, FieldDescriptor, FieldInfo, JsonFieldInfo,
    OperationDescriptor, OperationInfo, ParamDescriptor, ParamInfo, Reflect, TypeDescriptor,
    TypeInfo, ValidationRule, Value, unknown_field,
};
use std::collections::BTreeMap;
use std::sync::LazyLock;

// ============================================================================
// Member
// ============================================================================

pub static MEMBER: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("Member")
        .with_type_info(
            TypeInfo::new()
                .with_author("qa")
                .with_version("2.1")
                .with_tags(["test", "member"]),
        )
        .with_component(ComponentTag::new("memberService"))
        .with_field(
            FieldDescriptor::new("member_id", "Long")
                .with_info(FieldInfo::new("Member ID").required())
                .with_rule(ValidationRule::required().with_message("id is required"))
                .with_json(JsonFieldInfo::named("id").with_order(1)),
        )
        .with_field(
            FieldDescriptor::new("username", "String")
                .with_rule(ValidationRule::non_empty())
                .with_rule(ValidationRule::length(3, 20))
                .with_json(JsonFieldInfo::default().with_order(2)),
        )
        .with_field(
            FieldDescriptor::new("email", "String")
                .with_rule(ValidationRule::email())
                .with_json(JsonFieldInfo::default().with_order(3)),
        )
        .with_field(
            FieldDescriptor::new("age", "Integer")
                .with_rule(ValidationRule::min(0))
                .with_rule(ValidationRule::max(150))
                .with_json(JsonFieldInfo::default().with_order(4)),
        )
        .with_field(
            FieldDescriptor::new("phone", "String")
                .with_rule(ValidationRule::phone())
                .with_json(JsonFieldInfo::excluded().with_order(0)),
        )
        .with_field(
            FieldDescriptor::new("code", "String")
                .with_rule(ValidationRule::pattern("[A-Z]{3}-[0-9]{3}")),
        )
        .with_operation(
            OperationDescriptor::new("rename", "boolean")
                .with_info(OperationInfo::new("Change the username").with_return_type("boolean"))
                .with_param(
                    ParamDescriptor::new("username", "String")
                        .with_info(ParamInfo::new("username").with_description("new name")),
                )
                .with_param(ParamDescriptor::new("force", "boolean")),
        )
        .with_operation(OperationDescriptor::new("touch", "void"))
        .with_operation(OperationDescriptor::new("lambda$0", "void").synthetic())
});

#[derive(Debug, Clone, Default)]
pub struct Member {
    pub member_id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub code: Option<String>,
}

impl Member {
    pub fn valid() -> Self {
        Self {
            member_id: Some(1),
            username: Some("zhangsan".to_string()),
            email: Some("zhangsan@example.com".to_string()),
            age: Some(25),
            phone: Some("13812345678".to_string()),
            code: Some("ABC-123".to_string()),
        }
    }
}

impl Reflect for Member {
    fn type_descriptor() -> &'static TypeDescriptor {
        &MEMBER
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &MEMBER
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "member_id" => Ok(self.member_id.as_value()),
            "username" => Ok(self.username.as_value()),
            "email" => Ok(self.email.as_value()),
            "age" => Ok(self.age.as_value()),
            "phone" => Ok(self.phone.as_value()),
            "code" => Ok(self.code.as_value()),
            other => Err(unknown_field(&MEMBER, other)),
        }
    }
}

// ============================================================================
// Plain (no metadata at all)
// ============================================================================

pub static PLAIN: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("Plain")
        .with_field(FieldDescriptor::new("name", "String"))
        .with_field(FieldDescriptor::new("count", "int"))
});

#[derive(Debug, Clone, Default)]
pub struct Plain {
    pub name: Option<String>,
    pub count: u32,
}

impl Reflect for Plain {
    fn type_descriptor() -> &'static TypeDescriptor {
        &PLAIN
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &PLAIN
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "name" => Ok(self.name.as_value()),
            "count" => Ok(self.count.as_value()),
            other => Err(unknown_field(&PLAIN, other)),
        }
    }
}

// ============================================================================
// Sealed (a declared field that can never be read)
// ============================================================================

pub static SEALED: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("Sealed")
        .with_field(
            FieldDescriptor::new("label", "String").with_rule(ValidationRule::non_empty()),
        )
        .with_field(FieldDescriptor::new("secret", "String").with_rule(ValidationRule::required()))
});

pub struct Sealed {
    pub label: String,
}

impl Reflect for Sealed {
    fn type_descriptor() -> &'static TypeDescriptor {
        &SEALED
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &SEALED
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "label" => Ok(self.label.as_value()),
            other => Err(EngineError::field_access("Sealed", other)),
        }
    }
}

// ============================================================================
// Node (nesting, containers, cycles)
// ============================================================================

pub static NODE: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("Node")
        .with_field(FieldDescriptor::new("label", "String"))
        .with_field(FieldDescriptor::new("weights", "List<Double>"))
        .with_field(FieldDescriptor::new("attrs", "Map<String, String>"))
        .with_field(FieldDescriptor::new("child", "Node"))
});

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub label: String,
    pub weights: Vec<f64>,
    pub attrs: BTreeMap<String, String>,
    pub child: Option<Box<Node>>,
}

impl Reflect for Node {
    fn type_descriptor() -> &'static TypeDescriptor {
        &NODE
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &NODE
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "label" => Ok(self.label.as_value()),
            "weights" => Ok(self.weights.as_value()),
            "attrs" => Ok(self.attrs.as_value()),
            "child" => Ok(match &self.child {
                Some(child) => Value::object(child.as_ref()),
                None => Value::Null,
            }),
            other => Err(unknown_field(&NODE, other)),
        }
    }
}

pub static LOOP: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("Loop").with_field(FieldDescriptor::new("next", "Loop"))
});

/// An object whose only field points back at itself
pub struct Loop;

impl Reflect for Loop {
    fn type_descriptor() -> &'static TypeDescriptor {
        &LOOP
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &LOOP
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "next" => Ok(Value::object(self)),
            other => Err(unknown_field(&LOOP, other)),
        }
    }
}
