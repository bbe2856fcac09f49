//! Stored legacy grid values
//!
//! A grid value is a tree: sections contain rows, rows contain areas and
//! areas contain controls. Every field is optional in practice, so all
//! collections default to empty and widths fall back to 0.

use crate::validation::{deserialize_grid_width, parse_guid};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored grid property value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridValue {
    /// Section-set identifier (e.g., "1 column layout")
    #[serde(default)]
    pub name: Option<String>,
    /// Ordered sections
    #[serde(default)]
    pub sections: Vec<GridSection>,
}

impl GridValue {
    /// Total width of the grid, the sum of all section widths
    ///
    /// Widths come from stored data, so the sum saturates at `u32::MAX`.
    pub fn grid_columns(&self) -> u32 {
        self.sections
            .iter()
            .map(|s| s.grid)
            .fold(0, u32::saturating_add)
    }
}

/// One section of a grid value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridSection {
    #[serde(default, deserialize_with = "deserialize_grid_width")]
    pub grid: u32,
    #[serde(default)]
    pub rows: Vec<GridRow>,
}

/// A row inside a section, named after the layout it was built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridRow {
    /// Layout name of the row
    #[serde(default)]
    pub name: String,
    /// Stable row identifier, normally a GUID
    #[serde(default)]
    pub id: Option<String>,
    /// Free-form row settings
    #[serde(default)]
    pub config: Option<Value>,
    /// Free-form row styles (not migrated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
    #[serde(default)]
    pub areas: Vec<GridArea>,
}

impl GridRow {
    /// The row identifier as a GUID, if it is one
    pub fn key(&self) -> Option<Uuid> {
        self.id.as_deref().and_then(parse_guid)
    }

    /// Nominal width of the row, the sum of all area widths
    pub fn columns(&self) -> u32 {
        self.areas
            .iter()
            .map(|a| a.grid)
            .fold(0, u32::saturating_add)
    }
}

/// An area (cell) inside a row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridArea {
    #[serde(default, deserialize_with = "deserialize_grid_width")]
    pub grid: u32,
    /// Free-form area settings
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
    /// Editor aliases allowed in this area
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
    #[serde(default)]
    pub controls: Vec<GridControl>,
}

/// A single editor instance inside an area
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridControl {
    /// Stored payload; its shape depends on the editor
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub editor: GridEditor,
}

/// Editor descriptor attached to a control
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridEditor {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-instance editor configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}
