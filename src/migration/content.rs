//! Content pass: stored grid values to block values
//!
//! Every row becomes a row element whose areas each hold one column element,
//! and the column holds one element per converted control:
//!
//! ```text
//! row (gridLayout_<row name>)
//! └─ area_<i>
//!    └─ column (gridColumn_Column)
//!       └─ area_0
//!          └─ control elements (gridBlock_<editor name>)
//! ```
//!
//! Identifiers are derived from the row key, so converting the same value
//! twice produces the same block value. A row id that repeats within one
//! value falls back to the positional key.

use super::block_migrators::BlockMigratorRegistry;
use super::context::MigrationContext;
use super::conventions::{COLUMN_NAME, GridConventions, derived_key, key_for, safe_alias};
use super::property_migrators::ContentProperty;
use crate::block::{
    BlockGridLayoutAreaItem, BlockGridLayoutItem, BlockItemData, BlockValue, Udi,
};
use crate::grid::{GridArea, GridControl, GridRow, GridValue};
use crate::options::MigrationOptions;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Output of one area that produced content
struct AreaOutput {
    node: BlockGridLayoutAreaItem,
    width: u32,
    /// Column content followed by its control contents
    contents: Vec<BlockItemData>,
    settings: BlockItemData,
}

/// Settings record values from a free-form config object
///
/// Keys are converted to safe aliases; on collision the later key wins.
/// Aliases that clash with record fields are dropped when the record is built.
fn settings_properties(config: Option<&Value>) -> Map<String, Value> {
    config
        .and_then(Value::as_object)
        .map(|config| {
            config
                .iter()
                .map(|(key, value)| (safe_alias(key), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Converts stored grid values against an already translated schema
pub struct ContentTranslator<'a> {
    conventions: &'a GridConventions,
    block_migrators: &'a BlockMigratorRegistry,
    options: &'a MigrationOptions,
}

impl<'a> ContentTranslator<'a> {
    pub fn new(
        conventions: &'a GridConventions,
        block_migrators: &'a BlockMigratorRegistry,
        options: &'a MigrationOptions,
    ) -> Self {
        Self {
            conventions,
            block_migrators,
            options,
        }
    }

    /// Convert one stored grid value
    ///
    /// # Arguments
    /// * `value` - The stored grid value
    /// * `context` - Migration context populated by the schema pass
    ///
    /// # Returns
    /// `None` when the value has no sections, otherwise the block value with
    /// one layout tree under the configured block-grid property alias
    pub fn convert(&self, value: &GridValue, context: &MigrationContext) -> Option<BlockValue> {
        let grid = value.name.as_deref();
        if value.sections.is_empty() {
            debug!(grid = grid.unwrap_or_default(), "Grid value has no sections");
            return None;
        }

        let grid_columns = value.grid_columns();
        let mut block_value = BlockValue::default();
        let mut rows = Vec::new();
        let mut row_keys = HashSet::new();

        for (section_index, section) in value.sections.iter().enumerate() {
            let full_width = section.grid == grid_columns;
            debug!(section = section_index, grid = section.grid, full_width, "Converting section");

            for (row_index, row) in section.rows.iter().enumerate() {
                let fallback_key =
                    || self.conventions.fallback_row_key(grid, section_index, row_index);
                let row_key = match row.key() {
                    Some(key) if row_keys.contains(&key) => {
                        warn!(
                            row = %row.name,
                            id = %key,
                            section = section_index,
                            "Row id already used in this value, positional key used"
                        );
                        fallback_key()
                    }
                    Some(key) => key,
                    None => fallback_key(),
                };
                row_keys.insert(row_key);

                let node = self.convert_row(row, row_key, grid_columns, context, &mut block_value);
                rows.extend(node);
            }
        }

        debug!(
            rows = rows.len(),
            contents = block_value.content_data.len(),
            settings = block_value.settings_data.len(),
            "Grid value converted"
        );
        block_value
            .layout
            .insert(self.options.block_grid_property_alias.clone(), rows);
        Some(block_value)
    }

    fn structural_key(&self, context: &MigrationContext, alias: &str) -> Uuid {
        context.content_type_key_or(alias, key_for(alias))
    }

    fn convert_row(
        &self,
        row: &GridRow,
        row_key: Uuid,
        grid_columns: u32,
        context: &MigrationContext,
        block_value: &mut BlockValue,
    ) -> Option<BlockGridLayoutItem> {
        let areas: Vec<AreaOutput> = row
            .areas
            .iter()
            .enumerate()
            .filter_map(|(index, area)| {
                self.convert_area(row, row_key, index, area, grid_columns, context)
            })
            .collect();

        if areas.is_empty() {
            debug!(row = %row.name, "Row has no convertible content, skipped");
            return None;
        }

        let row_alias = self.conventions.layout_content_type_alias(&row.name);
        let row_setting_alias = self.conventions.row_setting_alias();
        let row_udi = Udi::element(row_key);
        let settings_udi = Udi::element(derived_key(&row_key, "row-settings"));
        let width = areas.iter().map(|a| a.width).fold(0, u32::saturating_add);

        block_value.content_data.push(BlockItemData::new(
            row_udi.clone(),
            self.structural_key(context, &row_alias),
            Some(row_alias),
        ));
        block_value.settings_data.push(
            BlockItemData::new(
                settings_udi.clone(),
                self.structural_key(context, &row_setting_alias),
                Some(row_setting_alias),
            )
            .with_properties(settings_properties(row.config.as_ref())),
        );

        let mut nodes = Vec::with_capacity(areas.len());
        for area in areas {
            block_value.content_data.extend(area.contents);
            block_value.settings_data.push(area.settings);
            nodes.push(area.node);
        }

        Some(BlockGridLayoutItem {
            content_udi: row_udi,
            settings_udi: Some(settings_udi),
            column_span: Some(width),
            row_span: Some(1),
            areas: nodes,
        })
    }

    fn convert_area(
        &self,
        row: &GridRow,
        row_key: Uuid,
        index: usize,
        area: &GridArea,
        grid_columns: u32,
        context: &MigrationContext,
    ) -> Option<AreaOutput> {
        let mut contents = Vec::new();
        let mut control_nodes = Vec::new();

        for (control_index, control) in area.controls.iter().enumerate() {
            let path = format!("control/{}/{}", index, control_index);
            let udi = Udi::element(derived_key(&row_key, &path));
            let Some(content) = self.convert_control(control, udi, context) else {
                continue;
            };
            control_nodes.push(BlockGridLayoutItem {
                content_udi: content.udi.clone(),
                settings_udi: None,
                column_span: Some(grid_columns),
                row_span: Some(1),
                areas: Vec::new(),
            });
            contents.push(content);
        }

        if contents.is_empty() {
            debug!(row = %row.name, area = index, "Area has no convertible controls, skipped");
            return None;
        }

        let column_alias = self.conventions.column_content_type_alias(COLUMN_NAME);
        let column_setting_alias = self.conventions.column_setting_alias();
        let column_udi = Udi::element(derived_key(&row_key, &format!("column/{}", index)));
        let settings_path = format!("column-settings/{}", index);
        let settings_udi = Udi::element(derived_key(&row_key, &settings_path));

        let column = BlockItemData::new(
            column_udi.clone(),
            self.structural_key(context, &column_alias),
            Some(column_alias),
        );
        let settings = BlockItemData::new(
            settings_udi.clone(),
            self.structural_key(context, &column_setting_alias),
            Some(column_setting_alias),
        )
        .with_properties(settings_properties(area.config.as_ref()));

        let column_node = BlockGridLayoutItem {
            content_udi: column_udi,
            settings_udi: Some(settings_udi),
            column_span: Some(grid_columns),
            row_span: Some(1),
            areas: vec![BlockGridLayoutAreaItem {
                key: self.conventions.column_area_key(),
                items: control_nodes,
            }],
        };

        let mut all_contents = Vec::with_capacity(contents.len() + 1);
        all_contents.push(column);
        all_contents.extend(contents);

        Some(AreaOutput {
            node: BlockGridLayoutAreaItem {
                key: self.conventions.layout_area_key(&row.name, index),
                items: vec![column_node],
            },
            width: area.grid,
            contents: all_contents,
            settings,
        })
    }

    /// Convert a single control, or `None` when it has to be dropped
    fn convert_control(
        &self,
        control: &GridControl,
        udi: Udi,
        context: &MigrationContext,
    ) -> Option<BlockItemData> {
        let editor = control.editor.alias.as_str();

        if control.value.is_none() {
            debug!(editor, "Control has no value, skipped");
            return None;
        }

        let Some(migrator) = self.block_migrators.get(editor) else {
            warn!(editor, "No block migrator for grid editor, control dropped");
            return None;
        };

        let Some(alias) = migrator.content_type_alias(control, self.conventions) else {
            warn!(editor, "Block migrator gave no content type alias, control dropped");
            return None;
        };

        let Some(key) = context.content_types.get_key_by_alias(&alias) else {
            warn!(editor, alias = %alias, "No content type key for block, control dropped");
            return None;
        };

        let Some(properties) = migrator.property_values(control, &udi, context) else {
            warn!(
                editor,
                alias = %alias,
                "Block migrator gave no property values, control dropped"
            );
            return None;
        };

        let properties: Map<String, Value> = properties
            .into_iter()
            .map(|(property_alias, value)| {
                let value = self.migrate_property(&udi, &alias, &property_alias, value, context);
                (property_alias, value)
            })
            .collect();

        Some(BlockItemData::new(udi, key, Some(alias)).with_properties(properties))
    }

    /// Run the secondary migrator registered for a property's editor, if any
    fn migrate_property(
        &self,
        element: &Udi,
        content_type_alias: &str,
        property_alias: &str,
        value: Value,
        context: &MigrationContext,
    ) -> Value {
        let Some(editor) = context
            .content_types
            .get_editor_alias_by_type_and_property(content_type_alias, property_alias)
        else {
            return value;
        };
        let Some(migrator) = context.migrators.get(&editor.original_editor_alias) else {
            return value;
        };

        let property = ContentProperty {
            element,
            content_type_alias,
            property_alias,
            editor_alias: &editor.original_editor_alias,
            value: &value,
        };
        let migrated = migrator.content_value(&property, context);
        debug!(
            content_type = content_type_alias,
            property = property_alias,
            editor = %editor.original_editor_alias,
            "Property value migrated"
        );
        migrated
    }
}
