//! Result table widget.
//!
//! Renders a presented table as formatted lines with column headers,
//! auto-sized columns, and styled NULL values.

use crate::db::{Table, Value};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 32;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Widget for rendering a table as text lines.
pub struct ResultTable<'a> {
    table: &'a Table,
}

impl<'a> ResultTable<'a> {
    /// Creates a new result table widget.
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Calculates the optimal width for each column.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .table
            .columns
            .iter()
            .map(|col| col.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.table.rows {
            for (i, value) in row.iter().enumerate() {
                if i < widths.len() {
                    let value_len = value.to_display_string().chars().count();
                    widths[i] = widths[i].max(value_len);
                }
            }
        }

        widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Truncates a string to fit within the given width, adding an ellipsis
    /// if needed. Operates on characters, not bytes.
    fn truncate(s: &str, max_width: usize) -> String {
        let len = s.chars().count();
        if len <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let kept: String = s.chars().take(max_width - 3).collect();
            format!("{kept}...")
        }
    }

    /// Renders the table to a vector of lines.
    pub fn render_to_lines(&self, available_width: usize) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if self.table.columns.is_empty() {
            lines.push(Line::from(Span::styled(
                "(sem colunas)",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        let widths = self.calculate_column_widths();

        // Scale down when the terminal is narrower than the natural width.
        let total_width: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
        let scale_factor = if total_width > available_width && available_width > 0 {
            available_width as f64 / total_width as f64
        } else {
            1.0
        };

        let adjusted_widths: Vec<usize> = widths
            .iter()
            .map(|&w| ((w as f64 * scale_factor) as usize).max(MIN_COLUMN_WIDTH))
            .collect();

        lines.push(self.render_border(&adjusted_widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&adjusted_widths));
        lines.push(self.render_border(&adjusted_widths, '├', '┼', '┤'));

        for row in &self.table.rows {
            lines.push(self.render_data_row(row, &adjusted_widths));
        }

        lines.push(self.render_border(&adjusted_widths, '└', '┴', '┘'));

        let footer = format!(
            "{} linha{}",
            self.table.row_count(),
            if self.table.row_count() == 1 { "" } else { "s" },
        );
        lines.push(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )));

        lines
    }

    /// Renders a horizontal border line.
    fn render_border(&self, widths: &[usize], left: char, mid: char, right: char) -> Line<'a> {
        let mut border = String::new();
        border.push(left);

        for (i, &width) in widths.iter().enumerate() {
            border.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                border.push(mid);
            }
        }

        border.push(right);

        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    /// Renders the header row with column labels.
    fn render_header_row(&self, widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, col) in self.table.columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let name = Self::truncate(col, width);
            let padded = format!(" {:width$} ", name, width = width);

            spans.push(Span::styled(
                padded,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Renders a data row.
    fn render_data_row(&self, row: &[Value], widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, value) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let display = value.to_display_string();
            let truncated = Self::truncate(&display, width);
            let padded = format!(" {:width$} ", truncated, width = width);

            let style = if value.is_null() {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };

            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}
