//! Grid to BlockGrid Migration Library
//!
//! This library converts legacy "Grid" layout content into the "BlockGrid"
//! structured-content model: the grid data-type configuration becomes a set of
//! element types plus a BlockGrid configuration, and every stored grid value
//! becomes a block value (content records, settings records and a nested
//! layout tree).
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Facade**: `GridMigrator` - Runs the schema and content passes
//! - **Engine**: `migration` module - Translators, naming conventions, converters
//! - **Models**: `grid` (legacy input) and `block` (target output) modules
//!
//! # Example
//!
//! ```
//! use grid2blockgrid::{GridConfiguration, GridMigrator, GridValue, MigrationOptions};
//! use grid2blockgrid::migration::{InMemoryDataTypeService, MigrationContext};
//! use serde_json::json;
//!
//! let migrator = GridMigrator::new(MigrationOptions::default());
//! let mut context = MigrationContext::with_default_migrators();
//! let mut data_types = InMemoryDataTypeService::new();
//!
//! let config = GridConfiguration::new(json!({
//!     "layouts": [{ "name": "Full", "areas": [{ "grid": 12 }] }]
//! }));
//! migrator.translate_config(&config, &mut context, &mut data_types);
//!
//! let value: GridValue = serde_json::from_value(json!({
//!     "name": "1 column layout",
//!     "sections": [{ "grid": 12, "rows": [{
//!         "name": "Full",
//!         "areas": [{ "grid": 12, "controls": [
//!             { "value": "Welcome", "editor": { "alias": "headline" } }
//!         ] }]
//!     }] }]
//! })).unwrap();
//! let block_value = migrator.convert_value(&value, &context).unwrap();
//! assert_eq!(block_value.content_data.len(), 3);
//! ```

pub mod block;
pub mod formatting;
pub mod grid;
pub mod migration;
pub mod options;
pub mod report;
mod storage;
mod validation;

use migration::{
    BlockMigratorRegistry, ContentTranslator, DataTypeService, GridConventions, MigrationContext,
    SchemaTranslator,
};

// Re-export commonly used types
pub use block::{BlockGridConfiguration, BlockValue};
pub use grid::{GridConfiguration, GridValue};
pub use options::MigrationOptions;
pub use report::{MigrationReport, ValueReport};
pub use storage::Storage;

/// Runs grid migrations with one set of converters and options
///
/// The schema pass must complete before any content pass: content conversion
/// resolves element types registered by [`translate_config`](Self::translate_config).
pub struct GridMigrator {
    conventions: GridConventions,
    block_migrators: BlockMigratorRegistry,
    options: MigrationOptions,
}

impl GridMigrator {
    /// Create a migrator with the bundled block migrators
    ///
    /// # Arguments
    /// * `options` - Run options (grid width fallback, folders, property alias)
    pub fn new(options: MigrationOptions) -> Self {
        Self::with_block_migrators(options, BlockMigratorRegistry::with_defaults())
    }

    /// Create a migrator with a custom set of block migrators
    pub fn with_block_migrators(
        options: MigrationOptions,
        block_migrators: BlockMigratorRegistry,
    ) -> Self {
        Self {
            conventions: GridConventions::new(),
            block_migrators,
            options,
        }
    }

    pub fn conventions(&self) -> &GridConventions {
        &self.conventions
    }

    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    pub fn block_migrators(&self) -> &BlockMigratorRegistry {
        &self.block_migrators
    }

    /// Translate a grid configuration (schema pass)
    ///
    /// # Arguments
    /// * `config` - The legacy grid data-type configuration
    /// * `context` - Shared context receiving the generated content types
    /// * `data_types` - Host service for backing data types
    ///
    /// # Returns
    /// The configuration of the BlockGrid data type replacing the grid
    pub fn translate_config(
        &self,
        config: &GridConfiguration,
        context: &mut MigrationContext,
        data_types: &mut dyn DataTypeService,
    ) -> BlockGridConfiguration {
        SchemaTranslator::new(&self.conventions, &self.block_migrators, &self.options)
            .translate(config, context, data_types)
    }

    /// Convert one stored grid value (content pass)
    ///
    /// # Returns
    /// `None` when the value has no sections
    pub fn convert_value(
        &self,
        value: &GridValue,
        context: &MigrationContext,
    ) -> Option<BlockValue> {
        ContentTranslator::new(&self.conventions, &self.block_migrators, &self.options)
            .convert(value, context)
    }

    /// Convert a batch of named grid values
    ///
    /// # Arguments
    /// * `values` - `(name, value)` pairs, converted in order
    /// * `context` - Context populated by the schema pass
    ///
    /// # Returns
    /// The block value of every input (in input order) and the run report
    pub fn convert_values<'v, I>(
        &self,
        values: I,
        context: &MigrationContext,
    ) -> (Vec<(String, Option<BlockValue>)>, MigrationReport)
    where
        I: IntoIterator<Item = (&'v str, &'v GridValue)>,
    {
        let translator =
            ContentTranslator::new(&self.conventions, &self.block_migrators, &self.options);
        let mut report = MigrationReport::new();
        let mut outputs = Vec::new();

        for (name, value) in values {
            let converted = translator.convert(value, context);
            report.push(ValueReport::new(name, value, converted.as_ref()));
            outputs.push((name.to_string(), converted));
        }

        (outputs, report)
    }
}

impl Default for GridMigrator {
    fn default() -> Self {
        Self::new(MigrationOptions::default())
    }
}
