//! Backing data types for generated setting properties
//!
//! The host platform owns data-type persistence. The migration only needs a
//! get-by-name / save pair, expressed by [`DataTypeService`].
//! [`InMemoryDataTypeService`] is the bundled implementation: it can be seeded
//! from a previous run so reruns reuse data types instead of duplicating them.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Get the current time in local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Editor alias of choice-list data types
pub const RADIO_BUTTON_LIST: &str = "Umbraco.RadioButtonList";

/// A data-type definition created by the migration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTypeDefinition {
    pub name: String,
    pub editor_alias: String,
    /// Storage type of values (e.g., "Ntext")
    pub database_type: String,
    pub created: NaiveDateTime,
    pub configuration: ValueListConfiguration,
}

/// Choices of a choice-list data type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueListConfiguration {
    #[serde(default)]
    pub items: Vec<ValueListItem>,
}

impl ValueListConfiguration {
    /// Build a configuration from choice values, numbering them from 1
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let items = values
            .into_iter()
            .zip(1..)
            .map(|(value, id)| ValueListItem {
                id,
                value: value.to_string(),
            })
            .collect();
        Self { items }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueListItem {
    pub id: u32,
    pub value: String,
}

/// Data-type lookup and persistence
pub trait DataTypeService {
    /// Look up a data type by its name
    fn get_by_name(&self, name: &str) -> Option<DataTypeDefinition>;

    /// Persist a new data type
    fn save(&mut self, data_type: DataTypeDefinition);
}

/// Data types held in memory, in creation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryDataTypeService {
    data_types: Vec<DataTypeDefinition>,
}

impl InMemoryDataTypeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the service with data types that already exist
    pub fn from_definitions(data_types: Vec<DataTypeDefinition>) -> Self {
        Self { data_types }
    }

    pub fn definitions(&self) -> &[DataTypeDefinition] {
        &self.data_types
    }

    pub fn len(&self) -> usize {
        self.data_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_types.is_empty()
    }
}

impl DataTypeService for InMemoryDataTypeService {
    fn get_by_name(&self, name: &str) -> Option<DataTypeDefinition> {
        self.data_types.iter().find(|d| d.name == name).cloned()
    }

    fn save(&mut self, data_type: DataTypeDefinition) {
        match self.data_types.iter_mut().find(|d| d.name == data_type.name) {
            Some(existing) => *existing = data_type,
            None => self.data_types.push(data_type),
        }
    }
}
