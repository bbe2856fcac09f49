//! Integration tests for Storage
//!
//! These tests read and write migration documents in temporary directories.

mod common;

use common::*;
use grid2blockgrid::migration::{
    DataTypeService, InMemoryDataTypeService, KnownContentType, MigrationContext,
};
use grid2blockgrid::{BlockGridConfiguration, GridMigrator, GridValue, MigrationOptions, Storage};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_files_load_defaults() {
    let dir = TempDir::new().unwrap();

    let options: MigrationOptions = Storage::new(dir.path().join("migrate.toml"))
        .load_toml_or_default()
        .unwrap();
    assert_eq!(options, MigrationOptions::default());

    let known: Vec<KnownContentType> = Storage::new(dir.path().join("content-types.json"))
        .load_json_or_default()
        .unwrap();
    assert!(known.is_empty());

    let storage = Storage::new(dir.path().join("grid.json"));
    assert!(!storage.exists());
    assert!(storage.load_json::<GridValue>().is_err());
}

#[test]
fn test_options_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("migrate.toml");
    fs::write(&path, "default_grid_columns = 16\nfolder_root = \"Migrated\"\n").unwrap();

    let options: MigrationOptions = Storage::new(&path).load_toml_or_default().unwrap();
    assert_eq!(options.default_grid_columns, 16);
    assert_eq!(options.folder("Layouts"), "Migrated/Layouts");
    assert_eq!(options.block_grid_property_alias, "Umbraco.BlockGrid");
}

#[test]
fn test_malformed_json_reports_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let error = Storage::new(&path).load_json::<GridValue>().unwrap_err();
    assert!(format!("{:#}", error).contains("broken.json"));
}

#[test]
fn test_save_creates_directories_and_round_trips_outputs() {
    let dir = TempDir::new().unwrap();
    let migrator = GridMigrator::default();
    let (context, data_types, config) = translated_context(&migrator);
    let value = migrator.convert_value(&grid_value(), &context).unwrap();

    let value_storage = Storage::new(dir.path().join("out").join("values").join("home.json"));
    value_storage.save_json(&value).unwrap();
    assert!(value_storage.exists());

    let config_storage = Storage::new(dir.path().join("out").join("blockgrid-config.json"));
    config_storage.save_json(&config).unwrap();
    let reloaded_config: BlockGridConfiguration = config_storage.load_json().unwrap();
    assert_eq!(reloaded_config, config);

    // values serialize with camelCase keys and inline properties
    let saved: serde_json::Value = value_storage.load_json().unwrap();
    assert!(saved["layout"]["Umbraco.BlockGrid"].is_array());
    assert!(saved["contentData"][2]["richText"].is_string());
    assert!(saved["contentData"][0]["contentTypeKey"].is_string());
    assert!(
        saved["contentData"][0]["udi"]
            .as_str()
            .unwrap()
            .starts_with("umb://element/")
    );

    // saved data types seed a later run so nothing is created twice
    let data_types_storage = Storage::new(dir.path().join("out").join("data-types.json"));
    data_types_storage.save_json(&data_types).unwrap();
    let mut reloaded: InMemoryDataTypeService = data_types_storage.load_json_or_default().unwrap();
    assert_eq!(reloaded.len(), 2);

    let mut rerun = MigrationContext::with_default_migrators();
    migrator.translate_config(&grid_config(), &mut rerun, &mut reloaded);
    assert_eq!(reloaded.len(), 2);
    assert!(
        reloaded
            .get_by_name("BlockGrid Row Setting - Class - Radiobuttonlist")
            .is_some()
    );
}
