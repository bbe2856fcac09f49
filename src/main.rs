//! Grid to BlockGrid migration - Main Entry Point
//!
//! Reads a grid configuration and stored grid values from JSON files and
//! writes the generated content types, data types, BlockGrid configuration
//! and converted values to an output directory.
//! The actual implementation is in the `grid2blockgrid` library.

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use grid2blockgrid::formatting::{format_report, format_schema_summary};
use grid2blockgrid::migration::{
    InMemoryDataTypeService, KnownContentType, MigrationContext, NewContentTypeInfo,
};
use grid2blockgrid::{GridConfiguration, GridMigrator, GridValue, MigrationOptions, Storage};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Grid to BlockGrid migration - converts legacy grid layouts into BlockGrid content
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the grid data-type configuration (JSON)
    grid_config: PathBuf,

    /// Paths to stored grid values (JSON), one value per file
    values: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    out: PathBuf,

    /// Run options (TOML)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Content types already present on the host (JSON array)
    #[arg(long)]
    content_types: Option<PathBuf>,

    /// Data types already present on the host (JSON array)
    #[arg(long)]
    data_types: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn value_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "value".to_string())
}

/// Output names of the value files
///
/// Each value is written to `values/<file stem>.json`, so two inputs with the
/// same stem are rejected instead of overwriting each other.
fn value_names(paths: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut names = Vec::with_capacity(paths.len());
    for path in paths {
        let name = value_name(path);
        if let Some(first) = seen.insert(name.clone(), path) {
            bail!(
                "Values '{}' and '{}' would both be written as '{}.json'",
                first.display(),
                path.display(),
                name
            );
        }
        names.push(name);
    }
    Ok(names)
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();
    init_tracing(args.verbose);
    let names = value_names(&args.values)?;

    let options: MigrationOptions = match &args.options {
        Some(path) => Storage::new(path).load_toml_or_default()?,
        None => MigrationOptions::default(),
    };

    let mut context = MigrationContext::with_default_migrators();
    if let Some(path) = &args.content_types {
        let known: Vec<KnownContentType> = Storage::new(path).load_json_or_default()?;
        info!(count = known.len(), "Loaded known content types");
        for content_type in known {
            context.content_types.add_known(content_type);
        }
    }

    let mut data_types: InMemoryDataTypeService = match &args.data_types {
        Some(path) => Storage::new(path).load_json_or_default()?,
        None => InMemoryDataTypeService::new(),
    };

    let config: Value = Storage::new(&args.grid_config).load_json()?;
    let migrator = GridMigrator::new(options);
    let block_grid =
        migrator.translate_config(&GridConfiguration::new(config), &mut context, &mut data_types);
    print!("{}", format_schema_summary(&block_grid));

    let mut values = Vec::with_capacity(args.values.len());
    for (path, name) in args.values.iter().zip(names) {
        let value: GridValue = Storage::new(path).load_json()?;
        values.push((name, value));
    }
    let (outputs, report) = migrator.convert_values(
        values.iter().map(|(name, value)| (name.as_str(), value)),
        &context,
    );

    Storage::new(args.out.join("blockgrid-config.json")).save_json(&block_grid)?;
    let new_types: Vec<&NewContentTypeInfo> = context.content_types.new_content_types().collect();
    Storage::new(args.out.join("content-types.json")).save_json(&new_types)?;
    Storage::new(args.out.join("data-types.json")).save_json(&data_types)?;
    for (name, block_value) in &outputs {
        if let Some(block_value) = block_value {
            let path = args.out.join("values").join(format!("{}.json", name));
            Storage::new(path).save_json(block_value)?;
        }
    }
    info!(out = %args.out.display(), "Migration output written");

    print!("{}", format_report(&report));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_names_use_file_stems() {
        let paths = vec![PathBuf::from("in/home.json"), PathBuf::from("in/about.json")];
        assert_eq!(value_names(&paths).unwrap(), vec!["home", "about"]);
    }

    #[test]
    fn test_duplicate_stems_are_rejected() {
        let paths = vec![PathBuf::from("en/home.json"), PathBuf::from("da/home.json")];
        let error = value_names(&paths).unwrap_err().to_string();
        assert!(error.contains("home.json"));
        assert!(error.contains("da/home.json"));
    }
}
