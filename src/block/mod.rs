//! BlockGrid models
//!
//! - `udi`: entity identifiers shared by values and layouts
//! - `value`: the stored block value (content, settings, layout tree)
//! - `configuration`: the block/area configuration of a BlockGrid data type

mod configuration;
pub mod udi;
mod value;

pub use configuration::{
    BlockColors, BlockGridAreaConfiguration, BlockGridBlockConfiguration, BlockGridConfiguration,
    BlockGridGroup, COLUMN_BLOCK_COLORS, GRID_BLOCK_COLORS, LAYOUT_BLOCK_COLORS,
    SpecifiedAllowance,
};
pub use udi::Udi;
pub use value::{
    BlockGridLayoutAreaItem, BlockGridLayoutItem, BlockItemData, BlockValue,
    RESERVED_PROPERTY_ALIASES,
};
