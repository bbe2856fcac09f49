//! Naming conventions for generated content types, areas and keys
//!
//! Every alias produced by the migration goes through [`safe_alias`] exactly
//! once, and every key is derived from an alias with [`key_for`]. Both are pure
//! functions, so the schema pass and the content pass agree on identities
//! without sharing any state.
//!
//! ## Key scheme (version 1)
//!
//! `key = UUIDv5(KEY_NAMESPACE, utf8(alias))` where `KEY_NAMESPACE` is
//! `7d3c6a52-2f1e-5b8e-9c4a-1b6f0e9d2a31`. Keys nested under another key (for
//! example element UDIs inside a row) use the parent key as the namespace.

use uuid::Uuid;

/// Version of the alias-to-key scheme
pub const KEY_SCHEME_VERSION: u32 = 1;

/// Namespace of all alias-derived keys
pub const KEY_NAMESPACE: Uuid = Uuid::from_u128(0x7d3c6a52_2f1e_5b8e_9c4a_1b6f0e9d2a31);

/// Name of the synthetic column wrapper element type
pub const COLUMN_NAME: &str = "Column";

/// Role names of the two setting element types
pub const ROW_SETTING: &str = "row";
pub const COLUMN_SETTING: &str = "column";

/// Convert an arbitrary name into a safe alias
///
/// Characters outside `[A-Za-z0-9_]` separate words; every word after the
/// first starts upper-case, leading digits are dropped and the first character
/// is lower-cased. Applying the function to its own output changes nothing.
///
/// # Examples
/// ```
/// use grid2blockgrid::migration::safe_alias;
/// assert_eq!(safe_alias("Background Color"), "backgroundColor");
/// assert_eq!(safe_alias("gridLayout_2-col"), "gridLayout_2Col");
/// ```
pub fn safe_alias(name: &str) -> String {
    let mut alias = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if alias.is_empty() && ch.is_ascii_digit() {
                continue;
            }
            if upper_next && !alias.is_empty() {
                alias.push(ch.to_ascii_uppercase());
            } else {
                alias.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }

    if let Some(first) = alias.chars().next() {
        if first.is_ascii_uppercase() {
            alias.replace_range(..1, &first.to_ascii_lowercase().to_string());
        }
    }
    alias
}

/// Derive the key of an alias
pub fn key_for(alias: &str) -> Uuid {
    Uuid::new_v5(&KEY_NAMESPACE, alias.as_bytes())
}

/// Derive a key nested under `parent`
pub fn derived_key(parent: &Uuid, path: &str) -> Uuid {
    Uuid::new_v5(parent, path.as_bytes())
}

/// Alias and key conventions of the grid migration
#[derive(Debug, Clone, Copy, Default)]
pub struct GridConventions;

impl GridConventions {
    pub fn new() -> Self {
        Self
    }

    /// Alias of an area inside a block (e.g., "area_0")
    pub fn area_alias(&self, index: usize) -> String {
        format!("area_{}", index)
    }

    /// Content type alias of a row layout
    pub fn layout_content_type_alias(&self, layout: &str) -> String {
        safe_alias(&format!("gridLayout_{}", layout))
    }

    /// Content type alias of a template
    pub fn template_content_type_alias(&self, template: &str) -> String {
        safe_alias(&format!("gridTemplate_{}", template))
    }

    /// Content type alias of a column wrapper
    pub fn column_content_type_alias(&self, column: &str) -> String {
        safe_alias(&format!("gridColumn_{}", column))
    }

    /// Content type alias of a setting element type (e.g., role "row")
    pub fn setting_content_type_alias(&self, role: &str) -> String {
        safe_alias(&format!("gridSetting_{}", role))
    }

    pub fn row_setting_alias(&self) -> String {
        self.setting_content_type_alias(ROW_SETTING)
    }

    pub fn column_setting_alias(&self) -> String {
        self.setting_content_type_alias(COLUMN_SETTING)
    }

    /// Content type alias of a block converted from a grid editor
    pub fn grid_block_content_type_alias(&self, editor_name: &str) -> String {
        safe_alias(&format!("gridBlock_{}", editor_name))
    }

    /// Alias of an area configuration
    pub fn grid_area_config_alias(&self, area_alias: &str) -> String {
        safe_alias(&format!("gridArea_{}", area_alias))
    }

    /// Alias of an area configuration inside a layout
    pub fn layout_area_alias(&self, layout: &str, area_alias: &str) -> String {
        self.grid_area_config_alias(&format!("layout_{}_{}", layout, area_alias))
    }

    /// Identity key of area `index` of a row layout
    pub fn layout_area_key(&self, layout: &str, index: usize) -> Uuid {
        key_for(&self.layout_area_alias(layout, &self.area_alias(index)))
    }

    /// Identity key of area `index` of a template
    pub fn template_area_key(&self, template: &str, index: usize) -> Uuid {
        key_for(&self.layout_area_alias(&format!("template{}", template), &self.area_alias(index)))
    }

    /// Identity key of the single area of the column wrapper
    pub fn column_area_key(&self) -> Uuid {
        key_for(&self.layout_area_alias(COLUMN_NAME, &self.area_alias(0)))
    }

    /// Content type alias an allow-list entry refers to
    ///
    /// The column wrapper name refers to the column element type, every other
    /// name to a row layout.
    pub fn allowed_content_type_alias(&self, name: &str) -> String {
        if name == COLUMN_NAME {
            self.column_content_type_alias(COLUMN_NAME)
        } else {
            self.layout_content_type_alias(name)
        }
    }

    /// Key of a block group (e.g., "Layouts")
    pub fn group_key(&self, group: &str) -> Uuid {
        key_for(&safe_alias(&format!("gridGroup_{}", group)))
    }

    /// Key of a row that has no GUID identifier of its own
    pub fn fallback_row_key(&self, grid_name: Option<&str>, section: usize, row: usize) -> Uuid {
        key_for(&format!(
            "gridRow_{}_{}_{}",
            grid_name.unwrap_or_default(),
            section,
            row
        ))
    }

    pub fn key_for(&self, alias: &str) -> Uuid {
        key_for(alias)
    }
}
