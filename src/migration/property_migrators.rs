//! Secondary migration of individual property values
//!
//! After a block migrator has produced a property bag, each value may be
//! rewritten again by a migrator registered for the property's original
//! editor alias (for example to re-encode a reference format). Properties
//! without a registered migrator pass through unchanged.

use super::context::MigrationContext;
use super::conventions::derived_key;
use crate::block::udi::{MEDIA, Udi};
use anyhow::{Result, bail};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// A property value being migrated
#[derive(Debug, Clone, Copy)]
pub struct ContentProperty<'a> {
    /// Element the property belongs to
    pub element: &'a Udi,
    pub content_type_alias: &'a str,
    pub property_alias: &'a str,
    /// Editor alias the value was stored with
    pub editor_alias: &'a str,
    pub value: &'a Value,
}

/// Converter of stored values for one or more editor aliases
pub trait PropertyValueMigrator: Send + Sync {
    /// Editor aliases this migrator handles
    fn editor_aliases(&self) -> &[&'static str];

    /// Produce the migrated value
    fn content_value(&self, property: &ContentProperty<'_>, context: &MigrationContext) -> Value;
}

/// Property-value migrators keyed by editor alias
#[derive(Default, Clone)]
pub struct PropertyMigratorRegistry {
    migrators: HashMap<String, Arc<dyn PropertyValueMigrator>>,
}

impl PropertyMigratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the bundled migrators
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(MediaPickerValueMigrator));
        registry
    }

    /// Register a migrator for all of its editor aliases
    ///
    /// Fails when an alias already has a migrator.
    pub fn register(&mut self, migrator: Arc<dyn PropertyValueMigrator>) -> Result<()> {
        for alias in migrator.editor_aliases() {
            if self.migrators.contains_key(*alias) {
                bail!("A property migrator is already registered for editor '{}'", alias);
            }
        }
        self.insert(migrator);
        Ok(())
    }

    fn insert(&mut self, migrator: Arc<dyn PropertyValueMigrator>) {
        for alias in migrator.editor_aliases() {
            self.migrators.insert(alias.to_string(), Arc::clone(&migrator));
        }
    }

    /// Find the migrator for an editor alias
    pub fn get(&self, editor_alias: &str) -> Option<&dyn PropertyValueMigrator> {
        self.migrators.get(editor_alias).map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.migrators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrators.is_empty()
    }
}

/// Rewrites legacy media-picker values into media-picker-3 arrays
///
/// Legacy values are comma separated media UDIs
/// (`umb://media/<guid>,umb://media/<guid>`). Values that are already arrays
/// pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaPickerValueMigrator;

impl PropertyValueMigrator for MediaPickerValueMigrator {
    fn editor_aliases(&self) -> &[&'static str] {
        &["Umbraco.MediaPicker", "Umbraco.MediaPicker2"]
    }

    fn content_value(&self, property: &ContentProperty<'_>, _context: &MigrationContext) -> Value {
        let Some(stored) = property.value.as_str() else {
            return property.value.clone();
        };

        let alias = property.property_alias;
        let picked: Vec<Value> = stored
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse::<Udi>() {
                Ok(udi) if udi.entity_type() == MEDIA => Some(udi),
                Ok(udi) => {
                    warn!(property = alias, udi = %udi, "Not a media reference, dropped");
                    None
                }
                Err(e) => {
                    warn!(property = alias, error = %e, "Unreadable media reference, dropped");
                    None
                }
            })
            .enumerate()
            .map(|(position, udi)| {
                media_picker_item(property.element, &format!("{}/{}", alias, position), &udi)
            })
            .collect();

        Value::Array(picked)
    }
}

/// One media-picker-3 entry for a picked media item
///
/// The entry key is derived from the owning element and the pick's `path`
/// within it, so repeated picks of the same media get distinct keys.
pub fn media_picker_item(owner: &Udi, path: &str, media: &Udi) -> Value {
    json!({
        "key": derived_key(&owner.guid(), &format!("picked/{}", path)),
        "mediaKey": media.guid(),
    })
}
