//! Legacy grid data-type configuration
//!
//! The configuration carries three blocks the migration reads:
//! `config` (setting definitions), `templates` (fixed section templates)
//! and `layouts` (named row layouts). Each block is parsed independently
//! and a malformed block is treated as empty.

use crate::validation::{deserialize_grid_width, grid_width};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A grid configuration document
///
/// Accepts both the host data-type form (blocks nested under `items`) and the
/// bare form (blocks at the top level).
#[derive(Debug, Clone, Default)]
pub struct GridConfiguration {
    document: Value,
}

impl GridConfiguration {
    /// Wrap a parsed configuration document
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    fn items(&self) -> &Value {
        match self.document.get("items") {
            Some(items) if items.is_object() => items,
            _ => &self.document,
        }
    }

    /// Get a named configuration block, ignoring `null`
    pub fn item_block(&self, name: &str) -> Option<&Value> {
        self.items().get(name).filter(|block| !block.is_null())
    }

    /// Column count of the grid, when the configuration states one
    pub fn columns(&self) -> Option<u32> {
        self.item_block("columns")
            .map(grid_width)
            .filter(|columns| *columns > 0)
    }

    /// Setting definitions from the `config` block
    pub fn settings(&self) -> Vec<GridSettingConfiguration> {
        self.parse_block("config")
    }

    /// Fixed templates from the `templates` block
    pub fn templates(&self) -> Vec<GridTemplateConfiguration> {
        self.parse_block("templates")
    }

    /// Row layouts from the `layouts` block
    pub fn layouts(&self) -> Vec<GridLayoutConfiguration> {
        self.parse_block("layouts")
    }

    fn parse_block<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        let Some(block) = self.item_block(name) else {
            return Vec::new();
        };

        match serde_json::from_value::<Vec<T>>(block.clone()) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    block = name,
                    error = %e,
                    "Malformed grid configuration block, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

/// A choice offered by a setting
///
/// Older configurations list plain strings, newer ones label/value pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSettingPrevalue {
    Item {
        #[serde(default)]
        label: Option<String>,
        value: String,
    },
    Plain(String),
}

impl GridSettingPrevalue {
    /// The stored value of the choice
    pub fn value(&self) -> &str {
        match self {
            GridSettingPrevalue::Item { value, .. } => value,
            GridSettingPrevalue::Plain(value) => value,
        }
    }
}

/// A row or cell setting definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettingConfiguration {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key: String,
    /// Input view (e.g., "radiobuttonlist", "textstring")
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub prevalues: Option<Vec<GridSettingPrevalue>>,
    #[serde(default)]
    pub default_config: Option<Value>,
    /// "row" or "cell"; object forms are not supported
    #[serde(default, alias = "ApplyTo")]
    pub apply_to: Option<Value>,
}

impl GridSettingConfiguration {
    /// The applicability as a plain string, if it is one
    pub fn apply_to_str(&self) -> Option<&str> {
        self.apply_to.as_ref().and_then(Value::as_str)
    }

    /// Check whether this setting applies to `target` ("row" or "cell")
    pub fn applies_to(&self, target: &str) -> bool {
        self.apply_to_str()
            .is_some_and(|apply_to| apply_to.trim().eq_ignore_ascii_case(target))
    }
}

/// A named template made of fixed-width sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridTemplateConfiguration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sections: Option<Vec<GridSectionConfiguration>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSectionConfiguration {
    #[serde(default, deserialize_with = "deserialize_grid_width")]
    pub grid: u32,
    #[serde(default)]
    pub allow_all: Option<bool>,
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}

/// A named row layout made of areas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridLayoutConfiguration {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub areas: Option<Vec<GridAreaConfiguration>>,
}

impl GridLayoutConfiguration {
    /// Display name: the label when present, otherwise the name
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridAreaConfiguration {
    #[serde(default, deserialize_with = "deserialize_grid_width")]
    pub grid: u32,
    #[serde(default)]
    pub allow_all: Option<bool>,
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}
