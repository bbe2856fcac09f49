//! Schema pass: grid configuration to element types
//!
//! The pass runs in four steps, each relying on what the previous ones
//! registered:
//! 1. settings: one row-setting and one column-setting element type
//! 2. templates: one element type per template with narrower-than-grid sections
//! 3. layouts: one element type per row layout plus the shared column wrapper
//! 4. back-fill: root allowance, area allow-lists, settings keys
//!
//! Area allow-lists may name layouts defined later in the same document, so
//! blocks are first declared in [`SchemaContext`] and only resolved in step 4.

use super::block_migrators::BlockMigratorRegistry;
use super::context::{MigrationContext, NewContentTypeInfo, NewContentTypeProperty};
use super::conventions::{
    COLUMN_NAME, COLUMN_SETTING, GridConventions, ROW_SETTING, key_for, safe_alias,
};
use super::data_types::{
    DataTypeDefinition, DataTypeService, RADIO_BUTTON_LIST, ValueListConfiguration, local_now,
};
use crate::block::{
    BlockGridAreaConfiguration, BlockGridBlockConfiguration, BlockGridConfiguration,
    BlockGridGroup, COLUMN_BLOCK_COLORS, GRID_BLOCK_COLORS, LAYOUT_BLOCK_COLORS,
    SpecifiedAllowance,
};
use crate::grid::{
    GridConfiguration, GridLayoutConfiguration, GridSettingConfiguration, GridSettingPrevalue,
    GridTemplateConfiguration,
};
use crate::options::MigrationOptions;
use crate::validation::first_upper;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Allow-list entry meaning "anything"
pub const ALLOW_ALL: &str = "*";

/// Working state of one schema pass
#[derive(Debug, Clone)]
pub struct SchemaContext {
    pub grid_columns: u32,
    pub layouts_group: BlockGridGroup,
    pub columns_group: BlockGridGroup,
    pub blocks_group: BlockGridGroup,
    /// Template and row layout blocks by content type alias
    pub layout_blocks: IndexMap<String, BlockGridBlockConfiguration>,
    pub column_blocks: IndexMap<String, BlockGridBlockConfiguration>,
    pub grid_blocks: IndexMap<String, BlockGridBlockConfiguration>,
    /// Area identity key -> names allowed in the area
    allowed_layouts: HashMap<Uuid, Vec<String>>,
    root_layouts: IndexSet<String>,
}

impl SchemaContext {
    pub fn new(grid_columns: u32, conventions: &GridConventions) -> Self {
        let group = |name: &str| BlockGridGroup {
            key: conventions.group_key(name),
            name: name.to_string(),
        };
        Self {
            grid_columns,
            layouts_group: group("Layouts"),
            columns_group: group("Columns"),
            blocks_group: group("Grid Blocks"),
            layout_blocks: IndexMap::new(),
            column_blocks: IndexMap::new(),
            grid_blocks: IndexMap::new(),
            allowed_layouts: HashMap::new(),
            root_layouts: IndexSet::new(),
        }
    }

    /// Add names to the root-allowed set, ignoring ones already present
    pub fn append_to_root_layouts<I, S>(&mut self, layouts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_layouts.extend(layouts.into_iter().map(Into::into));
    }

    pub fn root_layouts(&self) -> &IndexSet<String> {
        &self.root_layouts
    }

    /// Record what an area allows, for resolution during back-fill
    pub fn set_allowed_layouts(&mut self, area_key: Uuid, allowed: Vec<String>) {
        self.allowed_layouts.insert(area_key, allowed);
    }

    pub fn allowed_layouts(&self, area_key: &Uuid) -> &[String] {
        self.allowed_layouts
            .get(area_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Turn the declared blocks into a BlockGrid data-type configuration
    pub fn into_configuration(self) -> BlockGridConfiguration {
        BlockGridConfiguration {
            grid_columns: self.grid_columns,
            block_groups: vec![self.layouts_group, self.columns_group, self.blocks_group],
            blocks: self
                .layout_blocks
                .into_values()
                .chain(self.column_blocks.into_values())
                .chain(self.grid_blocks.into_values())
                .collect(),
        }
    }
}

/// A template or row layout waiting to be declared
struct PendingLayout<'n> {
    label: &'n str,
    display_name: &'n str,
    alias: String,
    areas: Vec<BlockGridAreaConfiguration>,
    allowances: Vec<(Uuid, Vec<String>)>,
    allow_at_root: bool,
    allow_in_areas: bool,
}

fn allowed_or_all(allowed: Option<&[String]>) -> Vec<String> {
    match allowed {
        Some(allowed) if !allowed.is_empty() => allowed.to_vec(),
        _ => vec![ALLOW_ALL.to_string()],
    }
}

/// Translates a grid configuration into element types
pub struct SchemaTranslator<'a> {
    conventions: &'a GridConventions,
    block_migrators: &'a BlockMigratorRegistry,
    options: &'a MigrationOptions,
}

impl<'a> SchemaTranslator<'a> {
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

    /// Run the schema pass
    ///
    /// Registers every generated content type in `context` and returns the
    /// configuration of the BlockGrid data type replacing the grid.
    pub fn translate(
        &self,
        config: &GridConfiguration,
        context: &mut MigrationContext,
        data_types: &mut dyn DataTypeService,
    ) -> BlockGridConfiguration {
        let grid_columns = config
            .columns()
            .unwrap_or(self.options.default_grid_columns);
        info!(grid_columns, "Translating grid configuration");

        let mut schema = SchemaContext::new(grid_columns, self.conventions);

        self.add_settings(&config.settings(), context, data_types);
        self.add_template_layouts(&config.templates(), &mut schema, context);
        self.add_layout_layouts(&config.layouts(), &mut schema, context);
        self.add_grid_blocks(&mut schema, context);
        self.backfill(&mut schema, context);

        info!(
            layouts = schema.layout_blocks.len(),
            columns = schema.column_blocks.len(),
            blocks = schema.grid_blocks.len(),
            root = schema.root_layouts.len(),
            "Grid configuration translated"
        );
        schema.into_configuration()
    }

    fn key_of(&self, context: &MigrationContext, alias: &str) -> Uuid {
        context.content_type_key_or(alias, key_for(alias))
    }

    fn add_settings(
        &self,
        settings: &[GridSettingConfiguration],
        context: &mut MigrationContext,
        data_types: &mut dyn DataTypeService,
    ) {
        debug!(count = settings.len(), "Processing grid settings");

        let roles: [(&str, &[&str], &str, &str); 2] = [
            (ROW_SETTING, &["row"], "Row Setting", "Grid row setting"),
            (COLUMN_SETTING, &["cell", "column"], "Column Setting", "Grid column setting"),
        ];

        for (role, targets, name, description) in roles {
            let alias = self.conventions.setting_content_type_alias(role);
            let properties = settings
                .iter()
                .filter(|s| targets.iter().any(|t| s.applies_to(t)))
                .filter_map(|s| self.setting_property(s, data_types))
                .collect();

            let key = self.key_of(context, &alias);
            context.content_types.add_new_content_type(NewContentTypeInfo {
                key,
                alias,
                name: name.to_string(),
                description: description.to_string(),
                folder: self.options.folder("Settings"),
                icon: "icon-settings color-purple".to_string(),
                is_element: true,
                properties,
                areas: Vec::new(),
            });
        }
    }

    fn setting_property(
        &self,
        setting: &GridSettingConfiguration,
        data_types: &mut dyn DataTypeService,
    ) -> Option<NewContentTypeProperty> {
        match setting.view.as_deref() {
            Some("radiobuttonlist") => {
                let apply_to = setting.apply_to_str().unwrap_or_default().to_lowercase();
                let data_type_name = format!(
                    "BlockGrid {} Setting - {} - Radiobuttonlist",
                    first_upper(&apply_to),
                    first_upper(&setting.key.to_lowercase())
                );

                if data_types.get_by_name(&data_type_name).is_some() {
                    debug!(data_type = %data_type_name, "Reusing existing data type");
                } else {
                    let values = setting
                        .prevalues
                        .iter()
                        .flatten()
                        .map(GridSettingPrevalue::value);
                    data_types.save(DataTypeDefinition {
                        name: data_type_name.clone(),
                        editor_alias: RADIO_BUTTON_LIST.to_string(),
                        database_type: "Ntext".to_string(),
                        created: local_now(),
                        configuration: ValueListConfiguration::from_values(values),
                    });
                    debug!(data_type = %data_type_name, "Created data type");
                }

                let name = if setting.description.is_empty() {
                    setting.label.clone()
                } else {
                    setting.description.clone()
                };
                Some(NewContentTypeProperty {
                    alias: safe_alias(&setting.key),
                    name,
                    data_type_alias: data_type_name,
                    editor_alias: Some(RADIO_BUTTON_LIST.to_string()),
                })
            }
            other => {
                warn!(
                    view = other.unwrap_or("<none>"),
                    setting = %setting.key,
                    "Missing property conversion for setting view, setting was not added"
                );
                None
            }
        }
    }

    fn add_template_layouts(
        &self,
        templates: &[GridTemplateConfiguration],
        schema: &mut SchemaContext,
        context: &mut MigrationContext,
    ) {
        debug!(count = templates.len(), "Processing template layouts");

        for template in templates {
            let Some(sections) = &template.sections else {
                continue;
            };

            let mut areas = Vec::new();
            let mut allowances = Vec::new();

            for (index, section) in sections.iter().enumerate() {
                let allowed = allowed_or_all(section.allowed.as_deref());

                if section.grid == schema.grid_columns {
                    debug!(
                        template = %template.name,
                        allowed = ?allowed,
                        "Adding full-width section to root layouts"
                    );
                    schema.append_to_root_layouts(allowed);
                    continue;
                }

                let area = BlockGridAreaConfiguration {
                    key: self.conventions.template_area_key(&template.name, index),
                    alias: self.conventions.area_alias(index),
                    column_span: Some(section.grid),
                    row_span: None,
                    specified_allowance: Vec::new(),
                };
                allowances.push((area.key, allowed));
                areas.push(area);
            }

            if areas.is_empty() {
                debug!(template = %template.name, "Template has no nested areas, skipped");
                continue;
            }

            self.declare_layout(
                PendingLayout {
                    label: &template.name,
                    display_name: &template.name,
                    alias: self.conventions.template_content_type_alias(&template.name),
                    areas,
                    allowances,
                    allow_at_root: true,
                    allow_in_areas: false,
                },
                schema,
                context,
            );
        }
    }

    fn add_layout_layouts(
        &self,
        layouts: &[GridLayoutConfiguration],
        schema: &mut SchemaContext,
        context: &mut MigrationContext,
    ) {
        debug!(count = layouts.len(), "Processing row layouts");

        for layout in layouts {
            let Some(layout_areas) = &layout.areas else {
                continue;
            };

            let mut areas = Vec::new();
            let mut allowances = Vec::new();

            // every area wraps its content in a column, even at full width
            for (index, area_config) in layout_areas.iter().enumerate() {
                let mut allowed = vec![COLUMN_NAME.to_string()];
                allowed.extend(allowed_or_all(area_config.allowed.as_deref()));

                let area = BlockGridAreaConfiguration {
                    key: self.conventions.layout_area_key(&layout.name, index),
                    alias: self.conventions.area_alias(index),
                    column_span: Some(area_config.grid),
                    row_span: Some(1),
                    specified_allowance: Vec::new(),
                };
                allowances.push((area.key, allowed));
                areas.push(area);
            }

            if areas.is_empty() {
                continue;
            }

            self.ensure_column_block(schema, context);

            let alias = self.conventions.layout_content_type_alias(&layout.name);
            let width = areas
                .iter()
                .filter_map(|a| a.column_span)
                .fold(0, u32::saturating_add);
            if width == schema.grid_columns {
                schema.append_to_root_layouts([alias.clone()]);
            }

            self.declare_layout(
                PendingLayout {
                    label: &layout.name,
                    display_name: layout.display_name(),
                    alias,
                    areas,
                    allowances,
                    allow_at_root: false,
                    allow_in_areas: true,
                },
                schema,
                context,
            );
        }
    }

    fn declare_layout(
        &self,
        pending: PendingLayout<'_>,
        schema: &mut SchemaContext,
        context: &mut MigrationContext,
    ) {
        if schema.layout_blocks.contains_key(&pending.alias) {
            debug!(alias = %pending.alias, "Layout already declared, keeping first definition");
            return;
        }

        let key = self.key_of(context, &pending.alias);
        let row_setting = self.conventions.row_setting_alias();

        let mut block = BlockGridBlockConfiguration::new(Some(pending.label.to_string()), key)
            .in_group(&schema.layouts_group, LAYOUT_BLOCK_COLORS);
        block.areas = pending.areas;
        block.allow_at_root = pending.allow_at_root;
        block.allow_in_areas = pending.allow_in_areas;
        block.settings_element_type_key = Some(self.key_of(context, &row_setting));

        for (area_key, allowed) in pending.allowances {
            schema.set_allowed_layouts(area_key, allowed);
        }

        context.content_types.add_new_content_type(NewContentTypeInfo {
            key,
            alias: pending.alias.clone(),
            name: pending.display_name.to_string(),
            description: "Grid layout block".to_string(),
            folder: self.options.folder("Layouts"),
            icon: "icon-layout color-purple".to_string(),
            is_element: true,
            properties: Vec::new(),
            areas: Vec::new(),
        });

        schema.layout_blocks.insert(pending.alias, block);
    }

    fn ensure_column_block(&self, schema: &mut SchemaContext, context: &mut MigrationContext) {
        let alias = self.conventions.column_content_type_alias(COLUMN_NAME);
        if schema.column_blocks.contains_key(&alias) {
            return;
        }

        let key = self.key_of(context, &alias);
        let column_setting = self.conventions.column_setting_alias();

        let mut block = BlockGridBlockConfiguration::new(Some(COLUMN_NAME.to_string()), key)
            .in_group(&schema.columns_group, COLUMN_BLOCK_COLORS);
        block.allow_in_areas = true;
        block.settings_element_type_key = Some(self.key_of(context, &column_setting));
        block.areas = vec![BlockGridAreaConfiguration {
            key: self.conventions.column_area_key(),
            alias: self.conventions.area_alias(0),
            column_span: Some(schema.grid_columns),
            row_span: Some(1),
            specified_allowance: Vec::new(),
        }];

        context.content_types.add_new_content_type(NewContentTypeInfo {
            key,
            alias: alias.clone(),
            name: COLUMN_NAME.to_string(),
            description: "Grid column block".to_string(),
            folder: self.options.folder("Columns"),
            icon: "icon-application-window-alt color-purple".to_string(),
            is_element: true,
            properties: Vec::new(),
            areas: Vec::new(),
        });

        schema.column_blocks.insert(alias, block);
    }

    fn add_grid_blocks(&self, schema: &mut SchemaContext, context: &mut MigrationContext) {
        debug!(count = self.block_migrators.len(), "Processing grid editor blocks");

        for migrator in self.block_migrators.iter() {
            let name = migrator.editor_name();
            let alias = self.conventions.grid_block_content_type_alias(name);
            if schema.grid_blocks.contains_key(&alias) {
                continue;
            }

            let key = self.key_of(context, &alias);
            if context.content_types.contains_alias(&alias) {
                debug!(alias = %alias, "Grid block element type already known");
            } else {
                let properties = migrator
                    .element_properties()
                    .into_iter()
                    .map(|p| NewContentTypeProperty {
                        alias: p.alias.to_string(),
                        name: p.name.to_string(),
                        data_type_alias: p.data_type_alias.to_string(),
                        editor_alias: Some(p.editor_alias.to_string()),
                    })
                    .collect();
                context.content_types.add_new_content_type(NewContentTypeInfo {
                    key,
                    alias: alias.clone(),
                    name: name.to_string(),
                    description: "Grid editor block".to_string(),
                    folder: self.options.folder("Blocks"),
                    icon: "icon-code color-purple".to_string(),
                    is_element: true,
                    properties,
                    areas: Vec::new(),
                });
            }

            let mut block = BlockGridBlockConfiguration::new(Some(name.to_string()), key)
                .in_group(&schema.blocks_group, GRID_BLOCK_COLORS);
            block.allow_in_areas = true;
            block.allow_at_root = migrator
                .aliases()
                .iter()
                .any(|editor| schema.root_layouts.contains(*editor));

            schema.grid_blocks.insert(alias, block);
        }
    }

    fn backfill(&self, schema: &mut SchemaContext, context: &mut MigrationContext) {
        let row_setting = self.conventions.row_setting_alias();
        let row_setting_key = self.key_of(context, &row_setting);

        let SchemaContext {
            layout_blocks,
            column_blocks,
            grid_blocks,
            allowed_layouts,
            root_layouts,
            ..
        } = schema;

        for (alias, block) in layout_blocks.iter_mut() {
            let label_at_root = block
                .label
                .as_deref()
                .is_some_and(|label| root_layouts.contains(label));
            if label_at_root || root_layouts.contains(alias.as_str()) {
                block.allow_at_root = true;
            }

            for area in block.areas.iter_mut() {
                let Some(allowed) = allowed_layouts.get(&area.key) else {
                    continue;
                };

                for name in allowed.iter().filter(|name| name.as_str() != ALLOW_ALL) {
                    let content_type_alias = self.conventions.allowed_content_type_alias(name);
                    let Some(key) = context.content_types.get_key_by_alias(&content_type_alias)
                    else {
                        debug!(
                            allowed = %name,
                            area = %area.alias,
                            "No element type for allowed name"
                        );
                        continue;
                    };
                    let allowances = &mut area.specified_allowance;
                    if !allowances.iter().any(|a| a.element_type_key == key) {
                        allowances.push(SpecifiedAllowance { element_type_key: key });
                    }
                }
            }

            self.register_element_type(alias, block, context);
            block.settings_element_type_key = Some(row_setting_key);
        }

        for (alias, block) in column_blocks.iter_mut().chain(grid_blocks.iter_mut()) {
            self.register_element_type(alias, block, context);
        }
    }

    fn register_element_type(
        &self,
        alias: &str,
        block: &mut BlockGridBlockConfiguration,
        context: &mut MigrationContext,
    ) {
        if block.content_element_type_key.is_nil() {
            block.content_element_type_key = key_for(alias);
            context
                .content_types
                .add_alias_and_key(alias, block.content_element_type_key);
        }
        context
            .content_types
            .add_element_type(block.content_element_type_key);

        if let Some(content_type) = context.content_types.new_content_type_mut(alias) {
            content_type.areas = block.areas.clone();
        }
    }
}
