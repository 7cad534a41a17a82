//! Sample annotated models
//!
//! `User` and `Product` carry every kind of descriptor and are what the
//! `declara` commands operate on.

use declara_core::{
    AsValue, ComponentTag, EngineResult, FieldDescriptor, FieldInfo, JsonFieldInfo,
    OperationDescriptor, OperationInfo, ParamDescriptor, ParamInfo, Reflect, TypeDescriptor,
    TypeInfo, ValidationRule, Value, unknown_field,
};
use std::sync::LazyLock;

// ============================================================================
// User
// ============================================================================

static USER: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("User")
        .with_type_info(
            TypeInfo::new()
                .with_author("张三")
                .with_version("1.2")
                .with_description("用户实体类，包含用户基本信息")
                .with_created("2025-10-5")
                .with_tags(["实体类", "用户管理", "核心业务"]),
        )
        .with_component(ComponentTag::new("userService"))
        .with_field(
            FieldDescriptor::new("user_id", "Option<i64>")
                .with_info(
                    FieldInfo::new("用户ID")
                        .with_description("用户的唯一标识符")
                        .required(),
                )
                .with_rule(ValidationRule::required().with_message("用户ID不能为空"))
                .with_json(JsonFieldInfo::named("id").with_order(1)),
        )
        .with_field(
            FieldDescriptor::new("username", "Option<String>")
                .with_info(
                    FieldInfo::new("用户名")
                        .with_description("用户登录名称")
                        .required(),
                )
                .with_rule(ValidationRule::non_empty().with_message("用户名不能为空"))
                .with_rule(ValidationRule::length(3, 20).with_message("用户名长度3-20位"))
                .with_json(JsonFieldInfo::named("username").with_order(2)),
        )
        .with_field(
            FieldDescriptor::new("email", "Option<String>")
                .with_info(FieldInfo::new("邮箱").with_description("用户电子邮箱地址"))
                .with_rule(ValidationRule::email().with_message("邮箱格式不正确"))
                .with_json(JsonFieldInfo::named("email").with_order(3)),
        )
        .with_field(
            FieldDescriptor::new("age", "Option<i32>")
                .with_info(FieldInfo::new("年龄").with_description("用户年龄"))
                .with_rule(ValidationRule::min(0).with_message("年龄不能小于0"))
                .with_rule(ValidationRule::max(150).with_message("年龄不能大于150"))
                .with_json(JsonFieldInfo::named("age").with_order(4)),
        )
        .with_field(
            FieldDescriptor::new("phone", "Option<String>")
                .with_info(FieldInfo::new("手机号").with_description("用户手机号码"))
                .with_rule(ValidationRule::phone().with_message("手机号格式不正确"))
                .with_json(JsonFieldInfo::excluded()),
        )
        .with_operation(
            OperationDescriptor::new("register", "bool")
                .with_info(
                    OperationInfo::new("用户注册方法，包含基本的业务逻辑验证")
                        .with_return_type("boolean")
                        .with_params(["用户名", "密码", "邮箱"]),
                )
                .with_param(
                    ParamDescriptor::new("username", "&str")
                        .with_info(ParamInfo::new("username").with_description("用户名")),
                )
                .with_param(
                    ParamDescriptor::new("password", "&str")
                        .with_info(ParamInfo::new("password").with_description("密码")),
                )
                .with_param(
                    ParamDescriptor::new("email", "&str")
                        .with_info(ParamInfo::new("email").with_description("邮箱")),
                ),
        )
        .with_operation(
            OperationDescriptor::new("login", "bool")
                .with_info(OperationInfo::new("用户登录验证").with_return_type("boolean"))
                .with_param(
                    ParamDescriptor::new("username", "&str")
                        .with_info(ParamInfo::new("username").with_description("用户名")),
                )
                .with_param(
                    ParamDescriptor::new("password", "&str")
                        .with_info(ParamInfo::new("password").with_description("密码")),
                ),
        )
        .with_operation(
            OperationDescriptor::new("update_profile", "bool")
                .with_info(OperationInfo::new("更新用户资料").with_return_type("boolean"))
                .with_param(
                    ParamDescriptor::new("email", "Option<&str>")
                        .with_info(ParamInfo::new("email").with_description("新邮箱")),
                )
                .with_param(
                    ParamDescriptor::new("age", "Option<i32>")
                        .with_info(ParamInfo::new("age").with_description("新年龄")),
                ),
        )
        .with_operation(
            OperationDescriptor::new("is_adult", "bool")
                .with_info(OperationInfo::new("检查用户是否成年").with_return_type("boolean")),
        )
        .with_operation(
            OperationDescriptor::new("display_name", "String").with_info(
                OperationInfo::new("获取用户显示名称")
                    .with_return_type("String")
                    .deprecated()
                    .since("1.0"),
            ),
        )
        .with_operation(
            OperationDescriptor::new("user_detail", "String")
                .with_info(OperationInfo::new("获取用户详细信息").with_return_type("String")),
        )
        .with_operation(
            OperationDescriptor::new("is_username_taken", "bool")
                .with_param(ParamDescriptor::new("username", "&str")),
        )
        .with_operation(OperationDescriptor::new("lambda$user_detail$0", "String").synthetic())
});

/// Registered user account
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
}

impl User {
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        age: i32,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            username: Some(username.into()),
            email: Some(email.into()),
            age: Some(age),
            phone: Some(phone.into()),
        }
    }

    /// A user that passes every declared rule
    pub fn sample() -> Self {
        Self::new(1, "zhangsan", "zhangsan@example.com", 25, "13812345678")
    }

    /// A user that breaks one rule on every field
    pub fn invalid_sample() -> Self {
        Self {
            user_id: None,
            username: Some("ab".to_string()),
            email: Some("invalid-email".to_string()),
            age: Some(-5),
            phone: Some("1234567890".to_string()),
        }
    }

    /// Register under a new name
    pub fn register(&mut self, username: &str, password: &str, email: &str) -> bool {
        if Self::is_username_taken(username) {
            tracing::info!("Username already taken: {}", username);
            return false;
        }
        if password.chars().count() < 6 {
            tracing::info!("Password too weak");
            return false;
        }

        self.username = Some(username.to_string());
        self.email = Some(email.to_string());
        tracing::info!("Registered user {}", username);
        true
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        let ok = self.username.as_deref() == Some(username) && password == "123456";
        tracing::info!(
            "Login {} for {}",
            if ok { "succeeded" } else { "failed" },
            username
        );
        ok
    }

    /// Update contact details; empty or negative inputs are ignored
    pub fn update_profile(&mut self, email: Option<&str>, age: Option<i32>) -> bool {
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            self.email = Some(email.to_string());
        }
        if let Some(age) = age.filter(|a| *a >= 0) {
            self.age = Some(age);
        }
        true
    }

    pub fn is_adult(&self) -> bool {
        self.age.is_some_and(|age| age >= 18)
    }

    #[deprecated(since = "1.0", note = "use `user_detail` instead")]
    pub fn display_name(&self) -> String {
        format!("用户{}", self.username.as_deref().unwrap_or_default())
    }

    pub fn user_detail(&self) -> String {
        format!(
            "用户详情 - ID: {}, 姓名: {}, 邮箱: {}, 年龄: {}, 成年: {}",
            self.user_id.map(|id| id.to_string()).unwrap_or_default(),
            self.username.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.age.map(|age| age.to_string()).unwrap_or_default(),
            if self.is_adult() { "是" } else { "否" }
        )
    }

    fn is_username_taken(username: &str) -> bool {
        matches!(username, "admin" | "test")
    }
}

impl Reflect for User {
    fn type_descriptor() -> &'static TypeDescriptor {
        &USER
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &USER
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "user_id" => Ok(self.user_id.as_value()),
            "username" => Ok(self.username.as_value()),
            "email" => Ok(self.email.as_value()),
            "age" => Ok(self.age.as_value()),
            "phone" => Ok(self.phone.as_value()),
            other => Err(unknown_field(&USER, other)),
        }
    }
}

// ============================================================================
// Product
// ============================================================================

static PRODUCT: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::new("Product")
        .with_type_info(
            TypeInfo::new()
                .with_author("李四")
                .with_version("1.0")
                .with_description("产品信息实体类")
                .with_tags(["商品", "电商"]),
        )
        .with_component(ComponentTag::new("productService"))
        .with_field(
            FieldDescriptor::new("id", "Option<i64>")
                .with_info(FieldInfo::new("产品ID").required())
                .with_rule(ValidationRule::required().with_message("产品ID不能为空"))
                .with_json(JsonFieldInfo::named("productId").with_order(1)),
        )
        .with_field(
            FieldDescriptor::new("name", "Option<String>")
                .with_info(FieldInfo::new("产品名称").required())
                .with_rule(ValidationRule::non_empty().with_message("产品名称不能为空"))
                .with_json(JsonFieldInfo::named("name").with_order(2)),
        )
        .with_field(
            FieldDescriptor::new("price", "Option<f64>")
                .with_info(FieldInfo::new("价格"))
                .with_rule(ValidationRule::min(0).with_message("价格不能为负数"))
                .with_json(JsonFieldInfo::named("price").with_order(3)),
        )
        .with_field(
            FieldDescriptor::new("stock", "Option<i32>")
                .with_info(FieldInfo::new("库存"))
                .with_rule(ValidationRule::min(0).with_message("库存不能为负数"))
                .with_json(JsonFieldInfo::named("stock").with_order(4)),
        )
        .with_operation(
            OperationDescriptor::new("is_in_stock", "bool")
                .with_info(OperationInfo::new("检查产品是否有库存").with_return_type("boolean")),
        )
        .with_operation(
            OperationDescriptor::new("reduce_stock", "bool")
                .with_info(OperationInfo::new("减少库存量").with_return_type("boolean"))
                .with_param(
                    ParamDescriptor::new("quantity", "i32")
                        .with_info(ParamInfo::new("quantity").with_description("减少的数量")),
                ),
        )
        .with_operation(
            OperationDescriptor::new("discount_price", "f64")
                .with_info(OperationInfo::new("计算折扣价格").with_return_type("Double"))
                .with_param(
                    ParamDescriptor::new("discount_rate", "Option<f64>").with_info(
                        ParamInfo::new("discountRate")
                            .with_description("折扣率")
                            .with_default("0.9"),
                    ),
                ),
        )
});

/// Default discount applied by [`Product::discount_price`]
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.9;

/// Catalog product
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: f64, stock: i32) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            price: Some(price),
            stock: Some(stock),
        }
    }

    pub fn sample() -> Self {
        Self::new(1001, "笔记本电脑", 5999.99, 50)
    }

    pub fn invalid_sample() -> Self {
        Self {
            id: None,
            name: Some(String::new()),
            price: Some(-1.5),
            stock: Some(-3),
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock.is_some_and(|stock| stock > 0)
    }

    /// Take `quantity` items out of stock
    pub fn reduce_stock(&mut self, quantity: i32) -> bool {
        if quantity <= 0 {
            tracing::info!("Quantity must be positive");
            return false;
        }
        match self.stock {
            Some(stock) if stock >= quantity => {
                self.stock = Some(stock - quantity);
                tracing::info!("Stock reduced, {} left", stock - quantity);
                true
            }
            stock => {
                tracing::info!("Insufficient stock: {:?}", stock);
                false
            }
        }
    }

    /// Price after discount; `None` applies [`DEFAULT_DISCOUNT_RATE`]
    pub fn discount_price(&self, discount_rate: Option<f64>) -> f64 {
        match self.price {
            Some(price) => price * discount_rate.unwrap_or(DEFAULT_DISCOUNT_RATE),
            None => 0.0,
        }
    }
}

impl Reflect for Product {
    fn type_descriptor() -> &'static TypeDescriptor {
        &PRODUCT
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        &PRODUCT
    }

    fn field_value(&self, field: &str) -> EngineResult<Value<'_>> {
        match field {
            "id" => Ok(self.id.as_value()),
            "name" => Ok(self.name.as_value()),
            "price" => Ok(self.price.as_value()),
            "stock" => Ok(self.stock.as_value()),
            other => Err(unknown_field(&PRODUCT, other)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register() {
        let mut user = User::default();
        assert!(!user.register("admin", "secret1", "a@b.c"));
        assert!(!user.register("lisi", "123", "a@b.c"));
        assert!(user.register("lisi", "123456", "lisi@example.com"));
        assert_eq!(user.username.as_deref(), Some("lisi"));
        assert!(user.login("lisi", "123456"));
        assert!(!user.login("lisi", "wrong"));
    }

    #[test]
    fn test_update_profile_ignores_bad_input() {
        let mut user = User::sample();
        user.update_profile(Some(""), Some(-1));
        assert_eq!(user, User::sample());

        user.update_profile(Some("new@example.com"), Some(17));
        assert_eq!(user.email.as_deref(), Some("new@example.com"));
        assert!(!user.is_adult());
    }

    #[test]
    fn test_user_detail() {
        let detail = User::sample().user_detail();
        assert!(detail.contains("zhangsan"));
        assert!(detail.ends_with("成年: 是"));
    }

    #[test]
    fn test_stock_operations() {
        let mut product = Product::sample();
        assert!(product.is_in_stock());
        assert!(!product.reduce_stock(0));
        assert!(!product.reduce_stock(51));
        assert!(product.reduce_stock(50));
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_discount_price() {
        let product = Product::new(1, "pen", 10.0, 1);
        assert!((product.discount_price(None) - 9.0).abs() < 1e-9);
        assert!((product.discount_price(Some(0.5)) - 5.0).abs() < 1e-9);
        assert_eq!(Product::default().discount_price(None), 0.0);
    }

    #[test]
    fn test_every_declared_field_is_readable() {
        let user = User::sample();
        assert!(user.field_values().is_ok());
        let product = Product::sample();
        assert!(product.field_values().is_ok());
        assert!(product.field_value("missing").is_err());
    }
}
