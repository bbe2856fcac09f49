//! Run options, loaded from an optional TOML file
//!
//! ```toml
//! default_grid_columns = 12
//! folder_root = "BlockGrid"
//! block_grid_property_alias = "Umbraco.BlockGrid"
//! ```

use serde::{Deserialize, Serialize};

/// Options shared by the schema and content passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationOptions {
    /// Column count used when the grid configuration does not state one
    pub default_grid_columns: u32,
    /// Root folder for generated content types
    pub folder_root: String,
    /// Key of the layout tree in generated block values
    pub block_grid_property_alias: String,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            default_grid_columns: 12,
            folder_root: "BlockGrid".to_string(),
            block_grid_property_alias: "Umbraco.BlockGrid".to_string(),
        }
    }
}

impl MigrationOptions {
    /// Folder path for a category of generated content types
    ///
    /// # Arguments
    /// * `category` - Sub folder name (e.g., "Settings", "Layouts")
    pub fn folder(&self, category: &str) -> String {
        format!("{}/{}", self.folder_root.trim_end_matches('/'), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options: MigrationOptions = toml::from_str("default_grid_columns = 24").unwrap();
        assert_eq!(options.default_grid_columns, 24);
        assert_eq!(options.folder_root, "BlockGrid");
        assert_eq!(options.block_grid_property_alias, "Umbraco.BlockGrid");
    }

    #[test]
    fn test_folder() {
        let options = MigrationOptions {
            folder_root: "Migrated/".to_string(),
            ..Default::default()
        };
        assert_eq!(options.folder("Layouts"), "Migrated/Layouts");
    }
}
