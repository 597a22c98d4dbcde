//! Formatting of bound variable values for output after a session.
//!
//! Pure functions: (variables, OutputFormat) → String.

use std::collections::BTreeMap;

use crate::cell::VariableCell;

/// Output format for value reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned `name (kind) = value` lines.
    #[default]
    Human,
    /// A JSON object mapping names to values.
    Json,
}

/// Format the current value of every variable.
pub fn format_values(
    values: &BTreeMap<String, VariableCell>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(format_human(values)),
        OutputFormat::Json => format_json(values),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(values: &BTreeMap<String, VariableCell>) -> String {
    if values.is_empty() {
        return "No variables bound.\n".to_string();
    }

    let width = values.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::from("=== Variables ===\n");
    for (name, cell) in values {
        out.push_str(&format!(
            "{:<width$}  {:<4} = {}\n",
            name,
            cell.kind().name(),
            cell.format(),
            width = width
        ));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(values: &BTreeMap<String, VariableCell>) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(values)?;
    json.push('\n');
    Ok(json)
}

// ============================================================================
// TESTS
// ============================================================================
