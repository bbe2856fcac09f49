//! Value-shape helpers for legacy grid JSON
//!
//! Stored grid values were written by several generations of the grid editor,
//! so widths show up as numbers or numeric strings and empty payloads show up
//! as `null`, `""`, `[]` or `{}`. These helpers normalize those shapes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

/// Check whether a stored payload carries nothing worth migrating
///
/// `None`, JSON `null`, empty strings, empty arrays and empty objects all count as empty.
pub fn is_null_or_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// Parse a grid width
///
/// # Arguments
/// * `value` - Width as stored (number or numeric string)
///
/// # Returns
/// The width, or 0 when the value is missing, negative or not numeric
pub fn grid_width(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

/// Serde adapter for width fields that may be numbers, strings or null
pub fn deserialize_grid_width<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(grid_width).unwrap_or(0))
}

/// Parse a stored row identifier into a GUID
///
/// Accepts hyphenated and simple forms; anything else yields `None`.
pub fn parse_guid(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// Upper-case the first character of a string, leaving the rest untouched
pub fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
