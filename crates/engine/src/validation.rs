//! Validation engine
//!
//! Evaluates the validation rules declared on each field of an instance and
//! collects every failure. Evaluation never stops early: all rules on all
//! fields run, in field-declaration order and then rule-attachment order.
//!
//! A rule whose preconditions do not hold for a value (a `MIN` rule on text,
//! an `EMAIL` rule on an absent value, a `PATTERN` rule whose regex does not
//! compile) is skipped. The only error surfaced to the caller is a failure
//! to read a field.

use crate::config::ValidationConfig;
use declara_core::{EngineResult, Reflect, RuleKind, ValidationRule, Value};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("built-in email regex is valid")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("built-in phone regex is valid"));

// ============================================================================
// Violation
// ============================================================================

/// A failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Declared name of the field
    pub field: String,

    /// Kind of the failed rule
    pub kind: RuleKind,

    /// Custom message, or the rule's default phrase
    pub message: String,
}

impl Violation {
    /// Create a violation for `rule` on `field`
    pub fn new(field: impl Into<String>, rule: &ValidationRule) -> Self {
        Self {
            field: field.into(),
            kind: rule.kind,
            message: rule.effective_message(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Rule-driven instance validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with the given settings
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate an instance and return `"field: message"` lines
    ///
    /// An empty list means every rule passed.
    pub fn validate(&self, instance: &dyn Reflect) -> EngineResult<Vec<String>> {
        Ok(self
            .violations(instance)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Validate an instance and return structured violations
    pub fn violations(&self, instance: &dyn Reflect) -> EngineResult<Vec<Violation>> {
        let descriptor = instance.descriptor();
        tracing::debug!(
            "Validating {} ({} rules over {} fields)",
            descriptor.name,
            descriptor.rule_count(),
            descriptor.fields.len()
        );

        let mut violations = Vec::new();
        for field in &descriptor.fields {
            let value = instance.field_value(&field.name)?;
            violations.extend(self.check_value(&field.name, &value, &field.rules));
        }

        tracing::debug!("{}: {} violation(s)", descriptor.name, violations.len());
        Ok(violations)
    }

    /// Check whether an instance passes every rule
    pub fn is_valid(&self, instance: &dyn Reflect) -> EngineResult<bool> {
        Ok(self.violations(instance)?.is_empty())
    }

    /// Evaluate a list of rules against one value
    pub fn check_value(
        &self,
        field: &str,
        value: &Value<'_>,
        rules: &[ValidationRule],
    ) -> Vec<Violation> {
        rules
            .iter()
            .filter(|rule| self.violates(rule, value))
            .map(|rule| Violation::new(field, rule))
            .collect()
    }

    /// Decide whether `value` fails `rule`
    fn violates(&self, rule: &ValidationRule, value: &Value<'_>) -> bool {
        match rule.kind {
            RuleKind::Required => value.is_null(),
            RuleKind::NonEmpty => value.text_form().is_none_or(|t| t.trim().is_empty()),
            RuleKind::Email => non_empty_text(value).is_some_and(|t| !EMAIL_REGEX.is_match(&t)),
            RuleKind::Phone => non_empty_text(value).is_some_and(|t| !PHONE_REGEX.is_match(&t)),
            RuleKind::Min => value.as_f64().is_some_and(|n| n < rule.min as f64),
            RuleKind::Max => value.as_f64().is_some_and(|n| {
                if self.config.legacy_max_check {
                    n < rule.min as f64
                } else {
                    n > rule.max as f64
                }
            }),
            RuleKind::LengthRange => value.text_form().is_some_and(|t| {
                let len = t.chars().count() as i64;
                len < rule.min || len > rule.max
            }),
            RuleKind::Pattern => {
                if rule.pattern.is_empty() {
                    return false;
                }
                non_empty_text(value).is_some_and(|t| match full_match_regex(&rule.pattern) {
                    Some(regex) => !regex.is_match(&t),
                    None => false,
                })
            }
        }
    }
}

/// Textual form of a present, non-empty value
fn non_empty_text<'v>(value: &'v Value<'_>) -> Option<Cow<'v, str>> {
    value.text_form().filter(|t| !t.is_empty())
}

/// Compiled declared patterns; malformed ones are kept as `None`
static PATTERN_CACHE: LazyLock<Mutex<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Compile a declared pattern so that it must match the whole text.
///
/// Each pattern is compiled once; a malformed one is reported on first use only.
fn full_match_regex(pattern: &str) -> Option<Regex> {
    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cached) = cache.get(pattern) {
        return cached.clone();
    }

    let compiled = match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Skipping malformed pattern '{}': {}", pattern, e);
            None
        }
    };
    cache.insert(pattern.to_string(), compiled.clone());
    compiled
}

// ============================================================================
// Tests
// ============================================================================
