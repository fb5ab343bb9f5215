//! Chart data extraction.
//!
//! A section declares its chart once: kind, the columns to read, and which
//! column namespace (pre- or post-rename) those names live in. Extraction
//! turns table rows into plain points; drawing belongs to the TUI widgets.

use crate::db::{Table, Value};
use crate::error::{GrandlineError, Result};
use serde::{Deserialize, Serialize};

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Scatter,
    Pie,
}

/// Which column namespace a chart's names resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSource {
    /// Raw result column identifiers.
    Original,
    /// Post-rename display labels.
    Renamed,
}

/// Declares how a section charts its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Label column (bar/pie) or numeric x column (scatter).
    pub x: String,
    /// Numeric value column.
    pub y: String,
    /// Optional grouping column (scatter series).
    pub category: Option<String>,
    pub source: ColumnSource,
}

/// One extracted data point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Display label from the x column.
    pub label: String,
    /// Numeric x reading (row position when the x column is not numeric).
    pub x: f64,
    pub y: f64,
    pub category: Option<String>,
}

/// Extracted, render-ready chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    /// Total of the y values; pie slices divide by this.
    pub fn y_total(&self) -> f64 {
        self.points.iter().map(|p| p.y).sum()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for point in &self.points {
            if let Some(cat) = &point.category {
                if !seen.contains(cat) {
                    seen.push(cat.clone());
                }
            }
        }
        seen
    }
}

/// Pulls chart points out of `table` per `spec`.
///
/// The chart columns are app-authored, so a missing column is a
/// programming error, not a data condition.
pub fn extract(table: &Table, spec: &ChartSpec) -> Result<ChartData> {
    let x_idx = column_index(table, &spec.x)?;
    let y_idx = column_index(table, &spec.y)?;
    let category_idx = spec
        .category
        .as_deref()
        .map(|name| column_index(table, name))
        .transpose()?;

    let points = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_number, row)| {
            let x_value = row.get(x_idx).cloned().unwrap_or(Value::Null);
            ChartPoint {
                label: x_value.to_display_string(),
                x: x_value.as_f64().unwrap_or(row_number as f64),
                y: row.get(y_idx).and_then(Value::as_f64).unwrap_or(0.0),
                category: category_idx.map(|idx| {
                    row.get(idx)
                        .map(Value::to_display_string)
                        .unwrap_or_default()
                }),
            }
        })
        .collect();

    Ok(ChartData {
        kind: spec.kind,
        points,
    })
}

fn column_index(table: &Table, name: &str) -> Result<usize> {
    table.column_index(name).ok_or_else(|| {
        GrandlineError::internal(format!("chart column '{name}' missing from result"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn danger_table() -> Table {
        Table::with_data(
            ["nomebando", "recompensacombinada"],
            vec![
                vec![Value::from("Kaizoku-A"), Value::Int(4_500_000_000)],
                vec![Value::from("Kaizoku-B"), Value::Int(1_200_000_000)],
            ],
        )
    }

    #[test]
    fn test_extract_bar_points() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            x: "nomebando".to_string(),
            y: "recompensacombinada".to_string(),
            category: None,
            source: ColumnSource::Original,
        };

        let data = extract(&danger_table(), &spec).unwrap();
        assert_eq!(data.kind, ChartKind::Bar);
        assert_eq!(data.points[0].label, "Kaizoku-A");
        assert_eq!(data.points[0].y, 4_500_000_000.0);
        // Label column is not numeric, so x falls back to the row position.
        assert_eq!(data.points[1].x, 1.0);
    }

    #[test]
    fn test_extract_with_category() {
        let table = Table::with_data(
            ["recompensa", "cluster"],
            vec![
                vec![Value::Int(100), Value::Int(0)],
                vec![Value::Int(5000), Value::Int(1)],
                vec![Value::Int(200), Value::Int(0)],
            ],
        );
        let spec = ChartSpec {
            kind: ChartKind::Scatter,
            x: "recompensa".to_string(),
            y: "recompensa".to_string(),
            category: Some("cluster".to_string()),
            source: ColumnSource::Original,
        };

        let data = extract(&table, &spec).unwrap();
        assert_eq!(data.points[0].category.as_deref(), Some("0"));
        assert_eq!(data.categories(), vec!["0", "1"]);
    }

    #[test]
    fn test_y_total_for_pie() {
        let spec = ChartSpec {
            kind: ChartKind::Pie,
            x: "nomebando".to_string(),
            y: "recompensacombinada".to_string(),
            category: None,
            source: ColumnSource::Original,
        };

        let data = extract(&danger_table(), &spec).unwrap();
        assert_eq!(data.y_total(), 5_700_000_000.0);
    }

    #[test]
    fn test_missing_column_errors() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            x: "nomebando".to_string(),
            y: "nonexistent".to_string(),
            category: None,
            source: ColumnSource::Original,
        };

        assert!(extract(&danger_table(), &spec).is_err());
    }
}
