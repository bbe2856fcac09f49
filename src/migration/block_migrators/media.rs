//! Media grid control
//!
//! Stored values look like `{ "udi": "umb://media/<guid>", "image": "/media/..." }`.

use super::{BlockMigrator, ElementProperty};
use crate::block::udi::{MEDIA, Udi};
use crate::grid::GridControl;
use crate::migration::context::MigrationContext;
use crate::migration::property_migrators::media_picker_item;
use crate::validation::is_null_or_empty;
use serde_json::{Map, Value};
use tracing::warn;

/// Converts `media` controls into a media-picker element
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaBlockMigrator;

impl BlockMigrator for MediaBlockMigrator {
    fn aliases(&self) -> &[&'static str] {
        &["media"]
    }

    fn editor_name(&self) -> &str {
        "Media Picker"
    }

    fn element_properties(&self) -> Vec<ElementProperty> {
        vec![ElementProperty {
            alias: "media",
            name: "Media",
            data_type_alias: "Media Picker",
            editor_alias: "Umbraco.MediaPicker3",
        }]
    }

    fn property_values(
        &self,
        control: &GridControl,
        element: &Udi,
        _context: &MigrationContext,
    ) -> Option<Map<String, Value>> {
        let mut properties = Map::new();
        if is_null_or_empty(control.value.as_ref()) {
            return Some(properties);
        }

        let Some(udi) = control
            .value
            .as_ref()
            .and_then(|v| v.get("udi"))
            .and_then(Value::as_str)
        else {
            return Some(properties);
        };

        match udi.parse::<Udi>() {
            Ok(udi) if udi.entity_type() == MEDIA => {
                properties.insert(
                    "media".to_string(),
                    Value::Array(vec![media_picker_item(element, "media/0", &udi)]),
                );
            }
            Ok(udi) => warn!(udi = %udi, "Media control references a non-media item"),
            Err(e) => warn!(error = %e, "Media control has an unreadable reference"),
        }
        Some(properties)
    }
}
