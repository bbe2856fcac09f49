//! Text-like grid controls (rich text, headline, quote, embed)
//!
//! All of them store a single value that maps onto a single property.

use super::{BlockMigrator, ElementProperty};
use crate::block::Udi;
use crate::grid::GridControl;
use crate::migration::context::MigrationContext;
use crate::validation::is_null_or_empty;
use serde_json::{Map, Value};

/// Converts a single-value grid control into an element with one property
#[derive(Debug, Clone, Copy)]
pub struct TextBlockMigrator {
    aliases: &'static [&'static str],
    editor_name: &'static str,
    property: ElementProperty,
}

impl TextBlockMigrator {
    pub const fn new(
        aliases: &'static [&'static str],
        editor_name: &'static str,
        property: ElementProperty,
    ) -> Self {
        Self {
            aliases,
            editor_name,
            property,
        }
    }

    /// `rte` controls
    pub const fn rich_text() -> Self {
        Self::new(
            &["rte"],
            "Rich Text",
            ElementProperty {
                alias: "richText",
                name: "Rich text",
                data_type_alias: "Richtext editor",
                editor_alias: "Umbraco.TinyMCE",
            },
        )
    }

    /// `headline` controls
    pub const fn headline() -> Self {
        Self::new(
            &["headline"],
            "Headline",
            ElementProperty {
                alias: "headline",
                name: "Headline",
                data_type_alias: "Textstring",
                editor_alias: "Umbraco.TextBox",
            },
        )
    }

    /// `quote` controls
    pub const fn quote() -> Self {
        Self::new(
            &["quote"],
            "Quote",
            ElementProperty {
                alias: "quote",
                name: "Quote",
                data_type_alias: "Textarea",
                editor_alias: "Umbraco.TextArea",
            },
        )
    }

    /// `embed` controls; object values contribute their `preview` markup
    pub const fn embed() -> Self {
        Self::new(
            &["embed"],
            "Embed",
            ElementProperty {
                alias: "embed",
                name: "Embed",
                data_type_alias: "Textarea",
                editor_alias: "Umbraco.TextArea",
            },
        )
    }
}

impl BlockMigrator for TextBlockMigrator {
    fn aliases(&self) -> &[&'static str] {
        self.aliases
    }

    fn editor_name(&self) -> &str {
        self.editor_name
    }

    fn element_properties(&self) -> Vec<ElementProperty> {
        vec![self.property]
    }

    fn property_values(
        &self,
        control: &GridControl,
        _element: &Udi,
        _context: &MigrationContext,
    ) -> Option<Map<String, Value>> {
        let mut properties = Map::new();
        let Some(stored) = control.value.as_ref().filter(|v| !is_null_or_empty(Some(*v))) else {
            return Some(properties);
        };

        let value = match stored {
            Value::Object(map) => map.get("preview").cloned().unwrap_or_else(|| stored.clone()),
            Value::String(_) => stored.clone(),
            other => Value::String(other.to_string()),
        };
        properties.insert(self.property.alias.to_string(), value);
        Some(properties)
    }
}
