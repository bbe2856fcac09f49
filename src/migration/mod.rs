//! Grid to BlockGrid migration engine
//!
//! The migration runs in two passes over a shared [`MigrationContext`]:
//!
//! 1. [`SchemaTranslator`] reads a grid configuration once and registers the
//!    element types (settings, templates, layouts, columns, grid blocks) plus
//!    the BlockGrid data-type configuration.
//! 2. [`ContentTranslator`] converts each stored grid value against that
//!    schema. It only reads the context.
//!
//! Both passes name and key everything through [`GridConventions`], so the
//! content pass resolves to exactly the element types the schema pass created.
//!
//! ## Extension points
//!
//! - [`BlockMigrator`]: one converter per legacy grid editor alias
//! - [`PropertyValueMigrator`]: re-encodes single property values by editor alias
//! - [`DataTypeService`]: host persistence of backing data types

pub mod block_migrators;
mod content;
mod context;
mod conventions;
mod data_types;
mod property_migrators;
mod schema;

pub use block_migrators::{BlockMigrator, BlockMigratorRegistry, ElementProperty};
pub use content::ContentTranslator;
pub use context::{
    ContentTypeRegistry, EditorAliasInfo, KnownContentType, KnownProperty, MigrationContext,
    NewContentTypeInfo, NewContentTypeProperty,
};
pub use conventions::{
    COLUMN_NAME, COLUMN_SETTING, GridConventions, KEY_NAMESPACE, KEY_SCHEME_VERSION, ROW_SETTING,
    derived_key, key_for, safe_alias,
};
pub use data_types::{
    DataTypeDefinition, DataTypeService, InMemoryDataTypeService, RADIO_BUTTON_LIST,
    ValueListConfiguration, ValueListItem, local_now,
};
pub use property_migrators::{
    ContentProperty, MediaPickerValueMigrator, PropertyMigratorRegistry, PropertyValueMigrator,
    media_picker_item,
};
pub use schema::{ALLOW_ALL, SchemaContext, SchemaTranslator};
