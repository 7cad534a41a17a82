//! Text rendering of scan reports and validation results

use colored::Colorize;
use declara_engine::{FieldReport, OperationReport, TypeReport};
use std::fmt;

// ============================================================================
// ReportView
// ============================================================================

/// Human-readable view of a [`TypeReport`]
///
/// Sections without metadata are left out; an entry for every field and
/// operation is always printed.
pub struct ReportView<'a>(pub &'a TypeReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{} {}", "Type:".bold(), report.type_name.cyan().bold())?;

        if let Some(info) = &report.type_info {
            writeln!(f, "  {}", "TypeInfo".yellow())?;
            writeln!(f, "    author:      {}", info.author)?;
            writeln!(f, "    version:     {}", info.version)?;
            writeln!(f, "    description: {}", info.description)?;
            writeln!(f, "    created:     {}", info.created)?;
            writeln!(f, "    tags:        [{}]", info.tags.join(", "))?;
        }

        if let Some(component) = &report.component {
            writeln!(f, "  {}", "Component".yellow())?;
            writeln!(f, "    name:  {}", component.name)?;
            writeln!(f, "    scope: {}", component.scope)?;
        }

        writeln!(f, "  {}", "Fields".yellow())?;
        for field in &report.fields {
            write_field(f, field)?;
        }

        writeln!(f, "  {}", "Operations".yellow())?;
        for operation in &report.operations {
            write_operation(f, operation)?;
        }

        let documented: Vec<&OperationReport> = report.documented_params().collect();
        if !documented.is_empty() {
            writeln!(f, "  {}", "Parameters".yellow())?;
            for operation in documented {
                writeln!(f, "    {}", operation.name)?;
                for param in &operation.params {
                    let info = &param.info;
                    writeln!(
                        f,
                        "      {}: {} ({}, required: {}, default: {:?})",
                        param.name, info.name, info.description, info.required, info.default_value
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldReport) -> fmt::Result {
    writeln!(f, "    {} ({})", field.name.green(), field.type_label)?;

    if let Some(info) = &field.info {
        writeln!(
            f,
            "      info:  {} - {} (required: {}, length: {}-{})",
            info.name, info.description, info.required, info.min_length, info.max_length
        )?;
        if !info.pattern.is_empty() {
            writeln!(f, "      pattern: {}", info.pattern)?;
        }
    }

    for rule in &field.rules {
        writeln!(f, "      rule:  {} => {}", rule, rule.effective_message())?;
    }

    if let Some(json) = &field.json {
        let order = json
            .order
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            f,
            "      json:  name={}, exclude={}, order={}",
            field.json_name, json.exclude, order
        )?;
    }
    Ok(())
}

fn write_operation(f: &mut fmt::Formatter<'_>, operation: &OperationReport) -> fmt::Result {
    writeln!(
        f,
        "    {}{} -> {}",
        operation.name.green(),
        operation.signature,
        operation.return_label
    )?;

    if let Some(info) = &operation.info {
        writeln!(f, "      {}", info.description)?;
        writeln!(
            f,
            "      returns: {}, deprecated: {}, since: {}",
            info.return_type, info.deprecated, info.since
        )?;
        if !info.params.is_empty() {
            writeln!(f, "      params: [{}]", info.params.join(", "))?;
        }
    }
    Ok(())
}

// ============================================================================
// Validation Output
// ============================================================================

/// Render the outcome of validating one instance
pub fn render_validation(type_name: &str, errors: &[String]) -> String {
    if errors.is_empty() {
        return format!("{} {} is valid", "✓".green(), type_name);
    }

    let mut out = format!(
        "{} {} failed {} rule(s):",
        "✗".red(),
        type_name,
        errors.len()
    );
    for error in errors {
        out.push_str("\n   - ");
        out.push_str(error);
    }
    out
}

/// Print a section header
pub fn header(title: &str) {
    println!();
    println!("{}", "=".repeat(50).dimmed());
    println!("{}", title.bold());
    println!("{}", "=".repeat(50).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, User};
    use declara_engine::{ScanConfig, Scanner};

    #[test]
    fn test_report_lists_every_section() {
        colored::control::set_override(false);
        let report = Scanner::new().scan::<User>();
        let text = ReportView(&report).to_string();

        assert!(text.starts_with("Type: User"));
        assert!(text.contains("author:      张三"));
        assert!(text.contains("scope: SINGLETON"));
        assert!(text.contains("rule:  LENGTH_RANGE(3-20) => 用户名长度3-20位"));
        assert!(text.contains("json:  name=id, exclude=false, order=1"));
        assert!(text.contains("register(&str username, &str password, &str email) -> bool"));
        assert!(text.contains("Parameters"));
    }

    #[test]
    fn test_undocumented_operation_has_entry_only() {
        colored::control::set_override(false);
        let report = Scanner::new().scan::<User>();
        let text = ReportView(&report).to_string();
        assert!(text.contains("is_username_taken(&str username) -> bool"));
    }

    #[test]
    fn test_synthetic_operation_listed_only_on_request() {
        colored::control::set_override(false);
        let hidden = ReportView(&Scanner::new().scan::<User>()).to_string();
        assert!(!hidden.contains("lambda$user_detail$0"));

        let scanner = Scanner::with_config(ScanConfig {
            include_synthetic: true,
        });
        let shown = ReportView(&scanner.scan::<User>()).to_string();
        assert!(shown.contains("lambda$user_detail$0() -> String"));
    }

    #[test]
    fn test_product_report() {
        colored::control::set_override(false);
        let report = Scanner::new().scan::<Product>();
        let text = ReportView(&report).to_string();
        assert!(text.contains("json:  name=productId"));
        assert!(text.contains("discount_rate: discountRate (折扣率, required: true, default: \"0.9\")"));
    }

    #[test]
    fn test_render_validation() {
        colored::control::set_override(false);
        assert_eq!(render_validation("User", &[]), "✓ User is valid");

        let errors = vec!["age: too young".to_string()];
        assert_eq!(
            render_validation("User", &errors),
            "✗ User failed 1 rule(s):\n   - age: too young"
        );
    }
}
