//! Legacy grid models
//!
//! This module contains the shapes written by the legacy grid editor:
//! - `value`: stored property values (sections, rows, areas, controls)
//! - `config`: the grid data-type configuration (settings, templates, layouts)

mod config;
mod value;

pub use config::{
    GridAreaConfiguration, GridConfiguration, GridLayoutConfiguration, GridSectionConfiguration,
    GridSettingConfiguration, GridSettingPrevalue, GridTemplateConfiguration,
};
pub use value::{GridArea, GridControl, GridEditor, GridRow, GridSection, GridValue};
