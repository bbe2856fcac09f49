//! Integration tests for the schema pass
//!
//! These tests translate the fixture grid configuration and check the
//! generated element types, BlockGrid blocks and data types.

mod common;

use common::*;
use grid2blockgrid::migration::{
    DataTypeService, InMemoryDataTypeService, KnownContentType, MigrationContext, key_for,
};
use grid2blockgrid::{GridConfiguration, GridMigrator};
use serde_json::json;
use uuid::Uuid;

fn block_key(context: &MigrationContext, alias: &str) -> Uuid {
    context.content_types.get_key_by_alias(alias).unwrap()
}

#[test]
fn test_translation_is_deterministic() {
    let migrator = GridMigrator::default();
    let (first_context, _, first) = translated_context(&migrator);
    let (second_context, _, second) = translated_context(&migrator);

    assert_eq!(first, second);
    let first_types: Vec<_> = first_context.content_types.new_content_types().collect();
    let second_types: Vec<_> = second_context.content_types.new_content_types().collect();
    assert_eq!(first_types, second_types);
}

#[test]
fn test_generated_content_types() {
    let migrator = GridMigrator::default();
    let (context, _, _) = translated_context(&migrator);

    let aliases: Vec<&str> = context
        .content_types
        .new_content_types()
        .map(|c| c.alias.as_str())
        .collect();
    assert_eq!(
        aliases,
        vec![
            "gridSetting_row",
            "gridSetting_column",
            "gridTemplate_2ColumnLayout",
            "gridColumn_Column",
            "gridLayout_Hero",
            "gridLayout_2Col",
            "gridLayout_Side",
            "gridBlock_MediaPicker",
            "gridBlock_RichText",
            "gridBlock_Headline",
            "gridBlock_Quote",
            "gridBlock_Embed",
        ]
    );

    for content_type in context.content_types.new_content_types() {
        assert!(content_type.is_element, "{} is not an element", content_type.alias);
        assert_eq!(content_type.key, key_for(&content_type.alias));
        assert!(context.content_types.is_element_type(&content_type.key));
        assert!(content_type.folder.starts_with("BlockGrid/"));
    }
}

#[test]
fn test_full_width_sections_and_layouts_are_allowed_at_root() {
    let migrator = GridMigrator::default();
    let (context, _, config) = translated_context(&migrator);

    let at_root = |alias: &str| config.block(&block_key(&context, alias)).unwrap().allow_at_root;

    // templates always, full-width layouts after back-fill
    assert!(at_root("gridTemplate_2ColumnLayout"));
    assert!(at_root("gridLayout_Hero"));
    assert!(at_root("gridLayout_2Col"));
    assert!(!at_root("gridLayout_Side"));

    // editors of the full-width "1 column layout" section
    assert!(at_root("gridBlock_RichText"));
    assert!(at_root("gridBlock_MediaPicker"));
    assert!(!at_root("gridBlock_Headline"));
    assert!(!at_root("gridColumn_Column"));
}

#[test]
fn test_template_with_only_full_width_sections_is_skipped() {
    let migrator = GridMigrator::default();
    let (context, _, _) = translated_context(&migrator);
    assert!(!context.content_types.contains_alias("gridTemplate_1ColumnLayout"));
}

#[test]
fn test_area_allowances_are_backfilled() {
    let migrator = GridMigrator::default();
    let conventions = migrator.conventions();
    let (context, _, config) = translated_context(&migrator);
    let column_key = block_key(&context, "gridColumn_Column");

    let template = config
        .block(&block_key(&context, "gridTemplate_2ColumnLayout"))
        .unwrap();
    assert_eq!(template.areas.len(), 2);
    let narrow = template
        .area(&conventions.template_area_key("2 column layout", 0))
        .unwrap();
    assert_eq!(narrow.column_span, Some(4));
    let allowed: Vec<Uuid> = narrow
        .specified_allowance
        .iter()
        .map(|a| a.element_type_key)
        .collect();
    assert_eq!(allowed, vec![block_key(&context, "gridLayout_2Col")]);
    // "*" allows anything
    assert!(template.areas[1].specified_allowance.is_empty());

    // every layout area accepts the column wrapper; unknown names are skipped
    let hero = config.block(&block_key(&context, "gridLayout_Hero")).unwrap();
    let hero_area = hero.area(&conventions.layout_area_key("Hero", 0)).unwrap();
    assert_eq!(hero_area.row_span, Some(1));
    let allowed: Vec<Uuid> = hero_area
        .specified_allowance
        .iter()
        .map(|a| a.element_type_key)
        .collect();
    assert_eq!(allowed, vec![column_key]);

    let two_col = config.block(&block_key(&context, "gridLayout_2Col")).unwrap();
    assert_eq!(two_col.areas.len(), 2);
    for area in &two_col.areas {
        assert_eq!(area.column_span, Some(6));
        assert_eq!(area.specified_allowance.len(), 1);
    }

    // areas are mirrored onto the generated content type
    let generated = context
        .content_types
        .new_content_types()
        .find(|c| c.alias == "gridLayout_2Col")
        .unwrap();
    assert_eq!(generated.areas, two_col.areas);
}

#[test]
fn test_column_wrapper_spans_the_grid() {
    let migrator = GridMigrator::default();
    let (context, _, config) = translated_context(&migrator);

    let column = config.block(&block_key(&context, "gridColumn_Column")).unwrap();
    assert_eq!(column.areas.len(), 1);
    assert_eq!(column.areas[0].key, migrator.conventions().column_area_key());
    assert_eq!(column.areas[0].alias, "area_0");
    assert_eq!(column.areas[0].column_span, Some(12));
    assert_eq!(column.areas[0].row_span, Some(1));
    assert_eq!(
        column.settings_element_type_key,
        Some(block_key(&context, "gridSetting_column"))
    );
    assert!(column.allow_in_areas);
}

#[test]
fn test_layouts_and_templates_use_row_settings() {
    let migrator = GridMigrator::default();
    let (context, _, config) = translated_context(&migrator);
    let row_setting = block_key(&context, "gridSetting_row");
    let layout_group = migrator.conventions().group_key("Layouts");

    let layouts: Vec<_> = config
        .blocks
        .iter()
        .filter(|b| b.group_key == Some(layout_group))
        .collect();
    assert_eq!(layouts.len(), 4);
    for block in layouts {
        assert_eq!(block.settings_element_type_key, Some(row_setting));
    }
}

#[test]
fn test_radio_list_settings_create_data_types_once() {
    let migrator = GridMigrator::default();
    let (context, data_types, _) = translated_context(&migrator);

    assert_eq!(data_types.len(), 2);
    let row = data_types
        .get_by_name("BlockGrid Row Setting - Class - Radiobuttonlist")
        .unwrap();
    assert_eq!(row.editor_alias, "Umbraco.RadioButtonList");
    assert_eq!(row.database_type, "Ntext");
    let items: Vec<(u32, &str)> = row
        .configuration
        .items
        .iter()
        .map(|i| (i.id, i.value.as_str()))
        .collect();
    assert_eq!(items, vec![(1, "full"), (2, "narrow"), (3, "wide")]);

    let cell = data_types
        .get_by_name("BlockGrid Cell Setting - Background color - Radiobuttonlist")
        .unwrap();
    assert_eq!(cell.configuration.items.len(), 2);

    let row_type = context
        .content_types
        .new_content_types()
        .find(|c| c.alias == "gridSetting_row")
        .unwrap();
    assert_eq!(row_type.properties.len(), 1);
    assert_eq!(row_type.properties[0].alias, "class");
    assert_eq!(row_type.properties[0].name, "Set a css class");

    let column_type = context
        .content_types
        .new_content_types()
        .find(|c| c.alias == "gridSetting_column")
        .unwrap();
    assert_eq!(column_type.properties[0].alias, "backgroundColor");
    assert_eq!(column_type.properties[0].name, "Background");

    // a second run against the same data types reuses them
    let created = row.created;
    let mut data_types = data_types;
    let mut rerun_context = MigrationContext::with_default_migrators();
    migrator.translate_config(&grid_config(), &mut rerun_context, &mut data_types);
    assert_eq!(data_types.len(), 2);
    assert_eq!(
        data_types
            .get_by_name("BlockGrid Row Setting - Class - Radiobuttonlist")
            .unwrap()
            .created,
        created
    );
}

#[test]
fn test_unsupported_setting_view_is_dropped_with_warning() {
    let migrator = GridMigrator::default();
    let ((context, _, _), events) = with_captured_events(|| translated_context(&migrator));

    let warned: Vec<_> = warnings(&events)
        .into_iter()
        .filter(|e| e.message().contains("Missing property conversion"))
        .collect();
    assert_eq!(warned.len(), 1);
    assert_eq!(warned[0].field("view"), Some("textstring"));

    let row_type = context
        .content_types
        .new_content_types()
        .find(|c| c.alias == "gridSetting_row")
        .unwrap();
    assert!(row_type.properties.iter().all(|p| p.alias != "title"));
}

#[test]
fn test_known_content_types_keep_their_keys() {
    let migrator = GridMigrator::default();
    let existing = Uuid::from_u128(0x1234);
    let mut context = MigrationContext::with_default_migrators();
    context.content_types.add_known(KnownContentType {
        alias: "gridLayout_hero".to_string(),
        key: existing,
        is_element: true,
        properties: Vec::new(),
    });

    let mut data_types = InMemoryDataTypeService::new();
    let config = migrator.translate_config(&grid_config(), &mut context, &mut data_types);

    assert_eq!(block_key(&context, "gridLayout_Hero"), existing);
    assert!(config.block(&existing).is_some());
}

#[test]
fn test_bare_configuration_without_columns_uses_default_width() {
    let migrator = GridMigrator::default();
    let mut context = MigrationContext::new();
    let mut data_types = InMemoryDataTypeService::new();
    let config = GridConfiguration::new(json!({
        "layouts": [{ "name": "Wide", "areas": [{ "grid": 12 }] }],
        "templates": "not a list"
    }));

    let translated = migrator.translate_config(&config, &mut context, &mut data_types);

    assert_eq!(translated.grid_columns, 12);
    assert!(
        translated
            .block(&block_key(&context, "gridLayout_Wide"))
            .unwrap()
            .allow_at_root
    );
    // both setting element types exist even without settings
    assert!(context.content_types.contains_alias("gridSetting_row"));
    assert!(context.content_types.contains_alias("gridSetting_column"));
    assert!(data_types.is_empty());
}
