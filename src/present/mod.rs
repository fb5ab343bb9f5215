//! Result shaping ahead of rendering.
//!
//! The presenter relabels columns for display, extracts chart data when a
//! section declares a chart, and enforces the one hard rule shared by every
//! listing: an empty table always becomes a neutral informational message,
//! never an empty table or chart. Rendering itself stays in the TUI layer.

mod chart;

pub use chart::{ChartData, ChartKind, ChartPoint, ChartSpec, ColumnSource};

use crate::db::Table;
use crate::error::Result;
use std::collections::HashMap;

/// Maps raw column identifiers to display labels.
pub type RenameMap = HashMap<String, String>;

/// A section's displayable outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Zero rows: the section shows this message instead of a table.
    Empty { message: String },
    /// Rows to render, columns already relabeled, plus optional chart data.
    Data {
        table: Table,
        chart: Option<ChartData>,
    },
}

impl Presentation {
    /// Returns the data table, if any.
    pub fn table(&self) -> Option<&Table> {
        match self {
            Presentation::Empty { .. } => None,
            Presentation::Data { table, .. } => Some(table),
        }
    }
}

/// Returns a copy of `table` with display labels applied.
///
/// Matching is a case-sensitive exact comparison against the rename map's
/// keys; unmatched columns pass through unchanged. Applying the same map
/// twice is a no-op the second time, since renamed columns no longer match
/// their original keys.
pub fn rename_columns(table: &Table, renames: &RenameMap) -> Table {
    Table {
        columns: table
            .columns
            .iter()
            .map(|c| renames.get(c).unwrap_or(c).clone())
            .collect(),
        rows: table.rows.clone(),
    }
}

/// Shapes a query result for rendering.
///
/// Chart columns are resolved against the pre- or post-rename table per the
/// chart's declared source.
pub fn present(
    table: Table,
    renames: &RenameMap,
    chart: Option<&ChartSpec>,
    empty_message: &str,
) -> Result<Presentation> {
    if table.is_empty() {
        return Ok(Presentation::Empty {
            message: empty_message.to_string(),
        });
    }

    let renamed = rename_columns(&table, renames);
    let chart = match chart {
        Some(spec) => {
            let source = match spec.source {
                ColumnSource::Original => &table,
                ColumnSource::Renamed => &renamed,
            };
            Some(chart::extract(source, spec)?)
        }
        None => None,
    };

    Ok(Presentation::Data {
        table: renamed,
        chart,
    })
}
