//! BlockGrid property values
//!
//! A block value keeps content and settings records in two flat lists and a
//! layout tree that references them by UDI. Nothing in the tree refers to a
//! record by position.

use super::udi::Udi;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

/// JSON keys of a record's own fields, unusable as property aliases
pub const RESERVED_PROPERTY_ALIASES: [&str; 2] = ["contentTypeKey", "udi"];

/// A complete BlockGrid property value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockValue {
    /// Layout trees keyed by block editor alias
    #[serde(default)]
    pub layout: IndexMap<String, Vec<BlockGridLayoutItem>>,
    #[serde(default)]
    pub content_data: Vec<BlockItemData>,
    #[serde(default)]
    pub settings_data: Vec<BlockItemData>,
}

impl BlockValue {
    /// All layout nodes of every layout tree, depth first in document order
    pub fn layout_items(&self) -> Vec<&BlockGridLayoutItem> {
        let mut items = Vec::new();
        let mut stack: Vec<&BlockGridLayoutItem> = self
            .layout
            .values()
            .flat_map(|roots| roots.iter())
            .rev()
            .collect();

        while let Some(item) = stack.pop() {
            items.push(item);
            for area in item.areas.iter().rev() {
                stack.extend(area.items.iter().rev());
            }
        }
        items
    }

    /// Find a content record by UDI
    pub fn content(&self, udi: &Udi) -> Option<&BlockItemData> {
        self.content_data.iter().find(|c| &c.udi == udi)
    }

    /// Find a settings record by UDI
    pub fn settings(&self, udi: &Udi) -> Option<&BlockItemData> {
        self.settings_data.iter().find(|s| &s.udi == udi)
    }
}

/// A content or settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockItemData {
    pub content_type_key: Uuid,
    pub udi: Udi,
    /// Alias of the element type, kept for diagnostics only
    #[serde(skip)]
    pub content_type_alias: Option<String>,
    /// Property values, stored inline next to the identifiers
    #[serde(flatten)]
    pub raw_property_values: Map<String, Value>,
}

impl BlockItemData {
    pub fn new(udi: Udi, content_type_key: Uuid, content_type_alias: Option<String>) -> Self {
        Self {
            content_type_key,
            udi,
            content_type_alias,
            raw_property_values: Map::new(),
        }
    }

    /// Attach property values
    ///
    /// Properties named like the record's own fields would be written as a
    /// second copy of that key, so they are dropped with a warning.
    pub fn with_properties(mut self, mut properties: Map<String, Value>) -> Self {
        for alias in RESERVED_PROPERTY_ALIASES {
            if properties.remove(alias).is_some() {
                warn!(udi = %self.udi, property = alias, "Reserved property alias, value dropped");
            }
        }
        self.raw_property_values = properties;
        self
    }
}

/// A node of the layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGridLayoutItem {
    pub content_udi: Udi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_udi: Option<Udi>,
    #[serde(default)]
    pub column_span: Option<u32>,
    #[serde(default)]
    pub row_span: Option<u32>,
    #[serde(default)]
    pub areas: Vec<BlockGridLayoutAreaItem>,
}

/// A named area of a layout node, holding child nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockGridLayoutAreaItem {
    /// Identity key of the area definition on the parent element type
    pub key: Uuid,
    #[serde(default)]
    pub items: Vec<BlockGridLayoutItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn udi(n: u128) -> Udi {
        Udi::element(Uuid::from_u128(n))
    }

    fn leaf(n: u128) -> BlockGridLayoutItem {
        BlockGridLayoutItem {
            content_udi: udi(n),
            settings_udi: None,
            column_span: Some(12),
            row_span: Some(1),
            areas: Vec::new(),
        }
    }

    #[test]
    fn test_layout_items_depth_first() {
        let mut value = BlockValue::default();
        let mut row = leaf(1);
        row.areas.push(BlockGridLayoutAreaItem {
            key: Uuid::from_u128(100),
            items: vec![leaf(2), leaf(3)],
        });
        value
            .layout
            .insert("Umbraco.BlockGrid".to_string(), vec![row, leaf(4)]);

        let order: Vec<Udi> = value
            .layout_items()
            .into_iter()
            .map(|i| i.content_udi.clone())
            .collect();
        assert_eq!(order, vec![udi(1), udi(2), udi(3), udi(4)]);
    }

    #[test]
    fn test_item_data_serializes_properties_inline() {
        let mut properties = Map::new();
        properties.insert("headline".to_string(), json!("Hello"));
        let data = BlockItemData::new(udi(7), Uuid::from_u128(9), Some("gridBlock_Headline".into()))
            .with_properties(properties);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["headline"], "Hello");
        assert_eq!(json["udi"], udi(7).to_string());
        assert!(json.get("contentTypeAlias").is_none());
    }

    #[test]
    fn test_reserved_property_aliases_are_dropped() {
        let mut properties = Map::new();
        properties.insert("udi".to_string(), json!("x"));
        properties.insert("contentTypeKey".to_string(), json!("y"));
        properties.insert("class".to_string(), json!("wide"));

        let record =
            BlockItemData::new(udi(1), Uuid::from_u128(9), None).with_properties(properties);
        assert_eq!(record.raw_property_values.len(), 1);
        assert_eq!(record.udi, udi(1));

        let json = serde_json::to_string(&record).unwrap();
        let parsed: BlockItemData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.content_type_key, Uuid::from_u128(9));
        assert_eq!(parsed.raw_property_values["class"], "wide");
    }
}
