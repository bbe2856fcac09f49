//! Converters from grid editor controls to block elements
//!
//! Each legacy grid editor alias maps to exactly one [`BlockMigrator`]. A
//! migrator names the element type a control becomes and produces the
//! element's property values. New control types are supported by registering
//! another migrator; the content translator never changes.
//!
//! Bundled migrators:
//! - `media`: [`MediaBlockMigrator`]
//! - `rte`, `headline`, `quote`, `embed`: [`TextBlockMigrator`] variants

mod media;
mod text;

pub use media::MediaBlockMigrator;
pub use text::TextBlockMigrator;

use super::context::MigrationContext;
use super::conventions::GridConventions;
use crate::block::Udi;
use crate::grid::GridControl;
use anyhow::{Result, bail};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// A property of the element type a migrator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementProperty {
    pub alias: &'static str,
    pub name: &'static str,
    /// Name of the host data type backing the property
    pub data_type_alias: &'static str,
    pub editor_alias: &'static str,
}

/// Converter for one kind of grid control
pub trait BlockMigrator: Send + Sync {
    /// Legacy editor aliases this migrator claims
    fn aliases(&self) -> &[&'static str];

    /// Display name of the element type (e.g., "Media Picker")
    fn editor_name(&self) -> &str;

    /// Properties of the element type
    fn element_properties(&self) -> Vec<ElementProperty>;

    /// Alias of the element type a control becomes
    ///
    /// The default derives it from [`editor_name`](Self::editor_name);
    /// migrators may consult the control's own editor configuration instead.
    fn content_type_alias(
        &self,
        _control: &GridControl,
        conventions: &GridConventions,
    ) -> Option<String> {
        Some(conventions.grid_block_content_type_alias(self.editor_name()))
    }

    /// Property values of the element for a control
    ///
    /// `element` is the UDI of the element being produced. Returns an empty
    /// map for an empty stored value and `None` when the control cannot be
    /// converted at all.
    fn property_values(
        &self,
        control: &GridControl,
        element: &Udi,
        context: &MigrationContext,
    ) -> Option<Map<String, Value>>;
}

/// Block migrators keyed by legacy editor alias
#[derive(Default, Clone)]
pub struct BlockMigratorRegistry {
    migrators: Vec<Arc<dyn BlockMigrator>>,
    by_alias: HashMap<String, usize>,
}

impl BlockMigratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the bundled migrators
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let bundled: [Arc<dyn BlockMigrator>; 5] = [
            Arc::new(MediaBlockMigrator),
            Arc::new(TextBlockMigrator::rich_text()),
            Arc::new(TextBlockMigrator::headline()),
            Arc::new(TextBlockMigrator::quote()),
            Arc::new(TextBlockMigrator::embed()),
        ];
        for migrator in bundled {
            registry.insert(migrator);
        }
        registry
    }

    /// Register a migrator for all of its aliases
    ///
    /// Fails when an alias already has a migrator.
    pub fn register(&mut self, migrator: Arc<dyn BlockMigrator>) -> Result<()> {
        for alias in migrator.aliases() {
            if self.by_alias.contains_key(*alias) {
                bail!("A block migrator is already registered for editor '{}'", alias);
            }
        }
        self.insert(migrator);
        Ok(())
    }

    fn insert(&mut self, migrator: Arc<dyn BlockMigrator>) {
        let index = self.migrators.len();
        for alias in migrator.aliases() {
            self.by_alias.insert(alias.to_string(), index);
        }
        self.migrators.push(migrator);
    }

    /// Find the migrator for an editor alias (exact match)
    pub fn get(&self, editor_alias: &str) -> Option<&dyn BlockMigrator> {
        self.by_alias
            .get(editor_alias)
            .map(|&index| self.migrators[index].as_ref())
    }

    /// Registered migrators in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn BlockMigrator> {
        self.migrators.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.migrators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrators.is_empty()
    }
}
