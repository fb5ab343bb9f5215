//! Sidebar "world stats": global scalar aggregates.

use crate::db::{Table, Value};
use crate::error::Result;
use crate::query::{QuerySpec, Runner};

/// The sidebar's scalar aggregates, loaded from three one-row queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldStats {
    /// Crew with the highest total bounty.
    pub top_crew: Option<(String, i64)>,
    /// Pirate with the highest individual bounty.
    pub top_pirate: Option<(String, i64)>,
    pub pirates: i64,
    pub marines: i64,
    pub fruits: i64,
    pub logia: i64,
    pub zoan: i64,
    pub paramecia: i64,
    pub islands: i64,
    pub ships_at_sea: i64,
}

/// Loads the sidebar stats through the shared runner (and cache).
pub async fn load_world_stats(runner: &Runner) -> Result<WorldStats> {
    let records = runner.run(&QuerySpec::BountyRecords).await?;
    let counts = runner.run(&QuerySpec::PopulationCounts).await?;
    let geography = runner.run(&QuerySpec::Geography).await?;

    Ok(WorldStats {
        top_crew: named_value(&records, "nome_bando", "valor_bando"),
        top_pirate: named_value(&records, "nome_pirata", "valor_pirata"),
        pirates: scalar(&counts, "qtd_piratas"),
        marines: scalar(&counts, "qtd_marinha"),
        fruits: scalar(&counts, "qtd_frutas"),
        logia: scalar(&counts, "qtd_logia"),
        zoan: scalar(&counts, "qtd_zoan"),
        paramecia: scalar(&counts, "qtd_paramecia"),
        islands: scalar(&geography, "total_ilhas"),
        ships_at_sea: scalar(&geography, "navios_ativos"),
    })
}

/// First-row integer for a column, 0 when absent or null.
fn scalar(table: &Table, column: &str) -> i64 {
    cell(table, column).and_then(|v| v.as_i64()).unwrap_or(0)
}

/// Pairs a name column with its value column, when both are present.
fn named_value(table: &Table, name_column: &str, value_column: &str) -> Option<(String, i64)> {
    let name = match cell(table, name_column)? {
        Value::Null => return None,
        v => v.to_display_string(),
    };
    let value = cell(table, value_column)?.as_i64()?;
    Some((name, value))
}

fn cell<'t>(table: &'t Table, column: &str) -> Option<&'t Value> {
    let idx = table.column_index(column)?;
    table.rows.first()?.get(idx)
}
