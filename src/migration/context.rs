//! Shared state of one migration run
//!
//! [`MigrationContext`] is created once per run and passed by reference into
//! every pass. The schema pass writes content types into it; the content pass
//! only reads. Knowledge only accumulates: nothing is ever removed.

use super::property_migrators::PropertyMigratorRegistry;
use crate::block::BlockGridAreaConfiguration;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// A content type the migration wants the host to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContentTypeInfo {
    pub key: Uuid,
    pub alias: String,
    pub name: String,
    pub description: String,
    /// Organisational folder (e.g., "BlockGrid/Layouts")
    pub folder: String,
    pub icon: String,
    pub is_element: bool,
    #[serde(default)]
    pub properties: Vec<NewContentTypeProperty>,
    /// Nested areas, filled in once allow-lists are resolved
    #[serde(default)]
    pub areas: Vec<BlockGridAreaConfiguration>,
}

/// A property of a generated content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContentTypeProperty {
    pub alias: String,
    pub name: String,
    /// Name of the backing data type
    pub data_type_alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_alias: Option<String>,
}

/// Editor of a property before and after migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorAliasInfo {
    pub original_editor_alias: String,
    pub updated_editor_alias: String,
}

/// A content type that already exists on the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownContentType {
    pub alias: String,
    pub key: Uuid,
    #[serde(default)]
    pub is_element: bool,
    #[serde(default)]
    pub properties: Vec<KnownProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownProperty {
    pub alias: String,
    pub editor_alias: String,
    #[serde(default)]
    pub updated_editor_alias: Option<String>,
}

/// Alias/key registry of content types
///
/// Alias lookups are case-insensitive, like aliases on the host. The first
/// key registered for an alias wins, so content types that already exist keep
/// their keys.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    alias_to_key: HashMap<String, Uuid>,
    key_to_alias: HashMap<Uuid, String>,
    element_types: HashSet<Uuid>,
    /// (content type alias, property alias) -> editor info, lower-cased
    property_editors: HashMap<(String, String), EditorAliasInfo>,
    new_content_types: IndexMap<String, NewContentTypeInfo>,
}

fn normalize(alias: &str) -> String {
    alias.to_ascii_lowercase()
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias/key pair unless the alias is already known
    pub fn add_alias_and_key(&mut self, alias: &str, key: Uuid) {
        let normalized = normalize(alias);
        if self.alias_to_key.contains_key(&normalized) {
            return;
        }
        self.alias_to_key.insert(normalized, key);
        self.key_to_alias.entry(key).or_insert_with(|| alias.to_string());
    }

    /// Look up the key of a content type
    pub fn get_key_by_alias(&self, alias: &str) -> Option<Uuid> {
        self.alias_to_key.get(&normalize(alias)).copied()
    }

    /// Look up the key of a content type, falling back to `default`
    pub fn get_key_or(&self, alias: &str, default: Uuid) -> Uuid {
        self.get_key_by_alias(alias).unwrap_or(default)
    }

    pub fn get_alias_by_key(&self, key: &Uuid) -> Option<&str> {
        self.key_to_alias.get(key).map(String::as_str)
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.alias_to_key.contains_key(&normalize(alias))
    }

    /// Mark a content type as an element type
    pub fn add_element_type(&mut self, key: Uuid) {
        self.element_types.insert(key);
    }

    pub fn is_element_type(&self, key: &Uuid) -> bool {
        self.element_types.contains(key)
    }

    /// Record the editor of a content type property
    pub fn add_property(
        &mut self,
        content_type_alias: &str,
        property_alias: &str,
        info: EditorAliasInfo,
    ) {
        self.property_editors
            .entry((normalize(content_type_alias), normalize(property_alias)))
            .or_insert(info);
    }

    /// Look up the editor of a content type property
    pub fn get_editor_alias_by_type_and_property(
        &self,
        content_type_alias: &str,
        property_alias: &str,
    ) -> Option<&EditorAliasInfo> {
        self.property_editors
            .get(&(normalize(content_type_alias), normalize(property_alias)))
    }

    /// Register a content type to be created
    ///
    /// The alias/key pair, the element flag and the property editors are
    /// recorded as well. A second definition for the same alias is ignored.
    pub fn add_new_content_type(&mut self, info: NewContentTypeInfo) {
        let normalized = normalize(&info.alias);
        if self.new_content_types.contains_key(&normalized) {
            debug!(
                alias = %info.alias,
                "Content type already registered, keeping first definition"
            );
            return;
        }

        self.add_alias_and_key(&info.alias, info.key);
        if info.is_element {
            self.add_element_type(info.key);
        }
        for property in &info.properties {
            if let Some(editor_alias) = &property.editor_alias {
                self.add_property(
                    &info.alias,
                    &property.alias,
                    EditorAliasInfo {
                        original_editor_alias: editor_alias.clone(),
                        updated_editor_alias: editor_alias.clone(),
                    },
                );
            }
        }
        self.new_content_types.insert(normalized, info);
    }

    /// Get a registered new content type for amendment
    pub fn new_content_type_mut(&mut self, alias: &str) -> Option<&mut NewContentTypeInfo> {
        self.new_content_types.get_mut(&normalize(alias))
    }

    /// New content types in registration order
    pub fn new_content_types(&self) -> impl Iterator<Item = &NewContentTypeInfo> {
        self.new_content_types.values()
    }

    /// Register a content type that already exists on the host
    pub fn add_known(&mut self, known: KnownContentType) {
        self.add_alias_and_key(&known.alias, known.key);
        if known.is_element {
            self.add_element_type(known.key);
        }
        for property in known.properties {
            let updated = property
                .updated_editor_alias
                .unwrap_or_else(|| property.editor_alias.clone());
            self.add_property(
                &known.alias,
                &property.alias,
                EditorAliasInfo {
                    original_editor_alias: property.editor_alias,
                    updated_editor_alias: updated,
                },
            );
        }
    }
}

/// Shared context of one migration run
#[derive(Default)]
pub struct MigrationContext {
    pub content_types: ContentTypeRegistry,
    pub migrators: PropertyMigratorRegistry,
}

impl MigrationContext {
    /// Create a context with empty registries
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with the bundled property-value migrators registered
    pub fn with_default_migrators() -> Self {
        Self {
            content_types: ContentTypeRegistry::new(),
            migrators: PropertyMigratorRegistry::with_defaults(),
        }
    }

    /// Key of a content type, or `default` when the alias is unknown
    pub fn content_type_key_or(&self, alias: &str, default: Uuid) -> Uuid {
        self.content_types.get_key_or(alias, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_type(alias: &str, key: u128) -> NewContentTypeInfo {
        NewContentTypeInfo {
            key: Uuid::from_u128(key),
            alias: alias.to_string(),
            name: alias.to_string(),
            description: String::new(),
            folder: "BlockGrid".to_string(),
            icon: "icon-document".to_string(),
            is_element: true,
            properties: vec![NewContentTypeProperty {
                alias: "media".to_string(),
                name: "Media".to_string(),
                data_type_alias: "Media Picker".to_string(),
                editor_alias: Some("Umbraco.MediaPicker3".to_string()),
            }],
            areas: Vec::new(),
        }
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let mut registry = ContentTypeRegistry::new();
        registry.add_alias_and_key("gridSetting_Column", Uuid::from_u128(1));
        assert_eq!(
            registry.get_key_by_alias("gridSetting_column"),
            Some(Uuid::from_u128(1))
        );
        assert_eq!(
            registry.get_alias_by_key(&Uuid::from_u128(1)),
            Some("gridSetting_Column")
        );
    }

    #[test]
    fn test_first_key_wins() {
        let mut registry = ContentTypeRegistry::new();
        registry.add_alias_and_key("hero", Uuid::from_u128(1));
        registry.add_alias_and_key("hero", Uuid::from_u128(2));
        assert_eq!(registry.get_key_by_alias("hero"), Some(Uuid::from_u128(1)));
        assert_eq!(registry.get_key_or("missing", Uuid::from_u128(3)), Uuid::from_u128(3));
    }

    #[test]
    fn test_add_new_content_type_registers_everything_once() {
        let mut registry = ContentTypeRegistry::new();
        registry.add_new_content_type(new_type("gridBlock_MediaPicker", 10));
        registry.add_new_content_type(new_type("gridBlock_MediaPicker", 11));

        assert_eq!(registry.new_content_types().count(), 1);
        assert_eq!(
            registry.get_key_by_alias("gridBlock_MediaPicker"),
            Some(Uuid::from_u128(10))
        );
        assert!(registry.is_element_type(&Uuid::from_u128(10)));
        let editor = registry
            .get_editor_alias_by_type_and_property("gridBlock_MediaPicker", "media")
            .unwrap();
        assert_eq!(editor.original_editor_alias, "Umbraco.MediaPicker3");
    }

    #[test]
    fn test_add_known_keeps_original_editor() {
        let mut registry = ContentTypeRegistry::new();
        registry.add_known(KnownContentType {
            alias: "gallery".to_string(),
            key: Uuid::from_u128(5),
            is_element: true,
            properties: vec![KnownProperty {
                alias: "images".to_string(),
                editor_alias: "Umbraco.MediaPicker2".to_string(),
                updated_editor_alias: Some("Umbraco.MediaPicker3".to_string()),
            }],
        });

        let editor = registry
            .get_editor_alias_by_type_and_property("gallery", "images")
            .unwrap();
        assert_eq!(editor.original_editor_alias, "Umbraco.MediaPicker2");
        assert_eq!(editor.updated_editor_alias, "Umbraco.MediaPicker3");
        assert!(registry.new_content_types().next().is_none());
    }
}
