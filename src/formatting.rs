//! Formatting helper functions for migration output
//!
//! This module renders the plain-text summaries printed by the binary.

use crate::block::BlockGridConfiguration;
use crate::report::MigrationReport;

/// Format the summary of a translated grid configuration
///
/// # Arguments
/// * `config` - The BlockGrid configuration produced by the schema pass
///
/// # Returns
/// One line with the grid width, then one line per block group listing its blocks
pub fn format_schema_summary(config: &BlockGridConfiguration) -> String {
    let mut result = format!(
        "BlockGrid configuration: {} columns, {} blocks\n",
        config.grid_columns,
        config.blocks.len()
    );

    for group in &config.block_groups {
        let labels: Vec<&str> = config
            .blocks
            .iter()
            .filter(|b| b.group_key == Some(group.key))
            .map(|b| b.label.as_deref().unwrap_or("(unnamed)"))
            .collect();
        if labels.is_empty() {
            continue;
        }
        result.push_str(&format!("  {}: {}\n", group.name, labels.join(", ")));
    }

    let root: Vec<&str> = config
        .blocks
        .iter()
        .filter(|b| b.allow_at_root)
        .map(|b| b.label.as_deref().unwrap_or("(unnamed)"))
        .collect();
    if !root.is_empty() {
        result.push_str(&format!("  Allowed at root: {}\n", root.join(", ")));
    }

    result
}

/// Format a migration report
///
/// # Arguments
/// * `report` - Report of the converted values
///
/// # Returns
/// One line per value followed by the totals
pub fn format_report(report: &MigrationReport) -> String {
    if report.values.is_empty() {
        return "No grid values converted\n".to_string();
    }

    let mut result = String::new();
    for value in &report.values {
        if value.converted {
            result.push_str(&format!(
                "- {}: {} row(s), {} column(s), {}/{} control(s)\n",
                value.name, value.rows, value.columns, value.converted_controls, value.controls
            ));
        } else {
            result.push_str(&format!("- {}: nothing to migrate\n", value.name));
        }
    }

    result.push_str(&format!(
        "Converted {} of {} value(s)",
        report.converted(),
        report.values.len()
    ));
    let dropped = report.dropped_controls();
    if dropped > 0 {
        result.push_str(&format!(", {} control(s) dropped", dropped));
    }
    result.push('\n');
    result
}
