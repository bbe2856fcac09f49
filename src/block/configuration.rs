//! BlockGrid data-type configuration
//!
//! These records describe which element types may be placed as blocks,
//! which areas each block exposes and what may go inside each area.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cosmetic colors of a block group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockColors {
    pub background: &'static str,
    pub icon: &'static str,
}

/// Row layout and template blocks
pub const LAYOUT_BLOCK_COLORS: BlockColors = BlockColors {
    background: "#cfe2f3",
    icon: "#2986cc",
};

/// Column wrapper blocks
pub const COLUMN_BLOCK_COLORS: BlockColors = BlockColors {
    background: "#d9d2e9",
    icon: "#8e7cc3",
};

/// Blocks converted from grid editors
pub const GRID_BLOCK_COLORS: BlockColors = BlockColors {
    background: "#fce5cd",
    icon: "#ce7e00",
};

/// Configuration of a BlockGrid data type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGridConfiguration {
    pub grid_columns: u32,
    #[serde(default)]
    pub block_groups: Vec<BlockGridGroup>,
    #[serde(default)]
    pub blocks: Vec<BlockGridBlockConfiguration>,
}

impl BlockGridConfiguration {
    /// Find the block whose content element type has `key`
    pub fn block(&self, key: &Uuid) -> Option<&BlockGridBlockConfiguration> {
        self.blocks.iter().find(|b| &b.content_element_type_key == key)
    }
}

/// A cosmetic grouping of blocks in the editor UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGridGroup {
    pub key: Uuid,
    pub name: String,
}

/// One block type offered by the BlockGrid editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGridBlockConfiguration {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub areas: Vec<BlockGridAreaConfiguration>,
    #[serde(default)]
    pub allow_at_root: bool,
    #[serde(default)]
    pub allow_in_areas: bool,
    /// Element type backing the block; nil until assigned
    pub content_element_type_key: Uuid,
    #[serde(default)]
    pub settings_element_type_key: Option<Uuid>,
    #[serde(default)]
    pub group_key: Option<Uuid>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub icon_color: Option<String>,
}

impl BlockGridBlockConfiguration {
    /// Create a block with no areas, not allowed anywhere yet
    pub fn new(label: Option<String>, content_element_type_key: Uuid) -> Self {
        Self {
            label,
            areas: Vec::new(),
            allow_at_root: false,
            allow_in_areas: false,
            content_element_type_key,
            settings_element_type_key: None,
            group_key: None,
            background_color: None,
            icon_color: None,
        }
    }

    /// Place the block in a group and apply the group colors
    pub fn in_group(mut self, group: &BlockGridGroup, colors: BlockColors) -> Self {
        self.group_key = Some(group.key);
        self.background_color = Some(colors.background.to_string());
        self.icon_color = Some(colors.icon.to_string());
        self
    }

    /// Find an area by its identity key
    pub fn area(&self, key: &Uuid) -> Option<&BlockGridAreaConfiguration> {
        self.areas.iter().find(|a| &a.key == key)
    }
}

/// An area exposed by a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGridAreaConfiguration {
    pub key: Uuid,
    pub alias: String,
    #[serde(default)]
    pub column_span: Option<u32>,
    #[serde(default)]
    pub row_span: Option<u32>,
    /// Element types allowed in the area; empty means anything
    #[serde(default)]
    pub specified_allowance: Vec<SpecifiedAllowance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecifiedAllowance {
    pub element_type_key: Uuid,
}
