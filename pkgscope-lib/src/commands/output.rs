//! Projection and rendering of command results.

use crate::Result;
use clap::ValueEnum;
use core::fmt::Write;
use ohno::{IntoAppError, app_err};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented `key: value` tree
    #[default]
    Pretty,

    /// Pretty-printed JSON
    Json,

    /// YAML
    Yaml,
}

/// Select the part of `value` addressed by a dotted `filter` such as `total.week` or `pythons.0.chart`.
///
/// Numeric segments index arrays. An empty filter selects everything.
///
/// # Errors
///
/// Returns an error if a segment does not exist in `value`
pub fn project(value: Value, filter: &str) -> Result<Value> {
    let mut current = value;

    for segment in filter.split('.').filter(|s| !s.is_empty()) {
        let next = match &mut current {
            Value::Object(map) => map.remove(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .filter(|&index| index < items.len())
                .map(|index| items.swap_remove(index)),
            _ => None,
        };

        current = next.ok_or_else(|| app_err!("no value at '{segment}' for filter '{filter}'"))?;
    }

    Ok(current)
}

/// Render `value` in the requested format, without a trailing newline.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized
pub fn render(value: &Value, format: OutputFormat, use_colors: bool) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).into_app_err("serializing JSON output")?,
        OutputFormat::Yaml => serde_yaml::to_string(value).into_app_err("serializing YAML output")?,
        OutputFormat::Pretty => {
            let mut text = String::new();
            if let Some(scalar) = scalar_text(value) {
                text.push_str(&scalar);
            } else {
                write_tree(&mut text, value, 0, use_colors)?;
            }
            text
        }
    };

    Ok(text.trim_end().to_string())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => Some("[]".to_string()),
        Value::Object(map) if map.is_empty() => Some("{}".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn write_tree<W: Write>(writer: &mut W, value: &Value, indent: usize, use_colors: bool) -> Result<()> {
    let pad = " ".repeat(indent);

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = if use_colors { key.cyan().bold().to_string() } else { key.clone() };
                match scalar_text(child) {
                    Some(scalar) => writeln!(writer, "{pad}{key}: {scalar}")?,
                    None => {
                        writeln!(writer, "{pad}{key}:")?;
                        write_tree(writer, child, indent + 2, use_colors)?;
                    }
                }
            }
        }
        Value::Array(items) => {
            for child in items {
                match scalar_text(child) {
                    Some(scalar) => writeln!(writer, "{pad}- {scalar}")?,
                    None => {
                        writeln!(writer, "{pad}-")?;
                        write_tree(writer, child, indent + 2, use_colors)?;
                    }
                }
            }
        }
        scalar => writeln!(writer, "{pad}{}", scalar_text(scalar).unwrap_or_default())?,
    }

    Ok(())
}
