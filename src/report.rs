//! Per-run summary of converted grid values

use crate::block::BlockValue;
use crate::grid::GridValue;
use serde::Serialize;

/// Outcome of converting one stored grid value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueReport {
    /// Name of the stored value (usually the input file stem)
    pub name: String,
    /// False when the value had nothing to migrate
    pub converted: bool,
    pub rows: usize,
    pub columns: usize,
    /// Controls in the legacy value
    pub controls: usize,
    /// Controls that became block elements
    pub converted_controls: usize,
    pub settings: usize,
}

impl ValueReport {
    /// Summarize a conversion result
    ///
    /// # Arguments
    /// * `name` - Name of the stored value
    /// * `source` - The legacy grid value
    /// * `converted` - The conversion result, `None` if nothing was migrated
    pub fn new(
        name: impl Into<String>,
        source: &GridValue,
        converted: Option<&BlockValue>,
    ) -> Self {
        let controls = source
            .sections
            .iter()
            .flat_map(|s| &s.rows)
            .flat_map(|r| &r.areas)
            .map(|a| a.controls.len())
            .sum();

        let Some(block_value) = converted else {
            return Self {
                name: name.into(),
                controls,
                ..Default::default()
            };
        };

        let rows = block_value.layout.values().map(Vec::len).sum();
        let columns = block_value
            .layout
            .values()
            .flatten()
            .map(|row| row.areas.len())
            .sum();

        Self {
            name: name.into(),
            converted: true,
            rows,
            columns,
            controls,
            converted_controls: block_value.content_data.len().saturating_sub(rows + columns),
            settings: block_value.settings_data.len(),
        }
    }

    /// Controls that were dropped during conversion
    pub fn dropped_controls(&self) -> usize {
        self.controls.saturating_sub(self.converted_controls)
    }
}

/// Summary of a batch of converted values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub values: Vec<ValueReport>,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: ValueReport) {
        self.values.push(value);
    }

    pub fn converted(&self) -> usize {
        self.values.iter().filter(|v| v.converted).count()
    }

    /// Values that produced no block value
    pub fn empty(&self) -> impl Iterator<Item = &ValueReport> {
        self.values.iter().filter(|v| !v.converted)
    }

    pub fn dropped_controls(&self) -> usize {
        self.values.iter().map(ValueReport::dropped_controls).sum()
    }
}
