//! One-shot plain-text rendering of the whole dashboard.
//!
//! `--snapshot` renders every section once with default filters and exits.
//! Used for smoke testing a connection and for automation; stdout carries
//! only the rendered page.

use crate::dashboard::labels::format_berries;
use crate::dashboard::{
    load_options, load_world_stats, render_section, FilterState, Tab, WorldStats,
};
use crate::db::Table;
use crate::error::Result;
use crate::present::{ChartKind, Presentation};
use crate::query::Runner;
use tracing::warn;

/// Renders the full page with default filters.
///
/// A section whose query fails degrades to a one-line notice; the rest of
/// the page still renders.
pub async fn render_page(runner: &Runner) -> Result<String> {
    let options = load_options(runner).await?;
    let filters = FilterState::default();

    let mut out = String::new();
    out.push_str("GRANDLINE DASHBOARD\n");
    out.push_str("===================\n\n");

    match load_world_stats(runner).await {
        Ok(stats) => out.push_str(&render_world_stats(&stats)),
        Err(e) => {
            warn!("world stats failed: {e}");
            out.push_str(&format!("[Estatísticas do Mundo indisponíveis: {e}]\n"));
        }
    }

    for tab in Tab::ALL {
        out.push_str(&format!("\n## {}\n", tab.title()));

        for &id in tab.sections() {
            out.push_str(&format!("\n### {}\n", id.title()));

            match render_section(runner, id, &filters, &options).await {
                Ok(presentation) => out.push_str(&render_presentation(&presentation)),
                Err(e) => {
                    warn!("section {:?} failed: {e}", id);
                    out.push_str(&format!("[{}]\n", e));
                }
            }
        }
    }

    Ok(out)
}

fn render_world_stats(stats: &WorldStats) -> String {
    let mut out = String::from("Estatísticas do Mundo\n");

    if let Some((name, value)) = &stats.top_crew {
        out.push_str(&format!(
            "  Maior Recompensa (Bando): {} ({})\n",
            format_berries(*value),
            name
        ));
    }
    if let Some((name, value)) = &stats.top_pirate {
        out.push_str(&format!(
            "  Maior Recompensa (Individual): {} ({})\n",
            format_berries(*value),
            name
        ));
    }

    out.push_str(&format!(
        "  Piratas: {}  Marinha: {}\n",
        stats.pirates, stats.marines
    ));
    out.push_str(&format!(
        "  Akuma no Mi: {} (Paramecia {}, Zoan {}, Logia {})\n",
        stats.fruits, stats.paramecia, stats.zoan, stats.logia
    ));
    out.push_str(&format!(
        "  Ilhas Registradas: {}  Navios no Mar: {}\n",
        stats.islands, stats.ships_at_sea
    ));

    out
}

fn render_presentation(presentation: &Presentation) -> String {
    match presentation {
        Presentation::Empty { message } => format!("{message}\n"),
        Presentation::Data { table, chart } => {
            let mut out = render_table(table);
            if let Some(chart) = chart {
                let kind = match chart.kind {
                    ChartKind::Bar => "barras",
                    ChartKind::Scatter => "dispersão",
                    ChartKind::Pie => "pizza",
                };
                out.push_str(&format!(
                    "[gráfico de {kind}: {} pontos]\n",
                    chart.points.len()
                ));
            }
            out
        }
    }
}

/// Renders a table with padded columns.
fn render_table(table: &Table) -> String {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            table
                .rows
                .iter()
                .map(|row| row.get(i).map_or(0, |v| v.to_display_string().chars().count()))
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, &w)| format!("{col:<w$}"))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, &w)| format!("{:<w$}", value.to_display_string()))
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    out.push_str(&format!("({} linha(s))\n", table.row_count()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{FailingDatabaseClient, MockDatabaseClient, Value};
    use std::sync::Arc;

    #[test]
    fn test_render_table_pads_columns() {
        let table = Table::with_data(
            ["nomebando", "recompensatotalbando"],
            vec![
                vec![Value::from("Kaizoku-A"), Value::Int(5_000_000_000)],
                vec![Value::from("B"), Value::Int(7)],
            ],
        );

        let rendered = render_table(&table);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("nomebando "));
        assert!(lines[2].starts_with("Kaizoku-A"));
        assert!(rendered.ends_with("(2 linha(s))\n"));
    }

    #[tokio::test]
    async fn test_snapshot_renders_empty_sections_as_messages() {
        let runner = Runner::with_default_ttl(Arc::new(MockDatabaseClient::new()));
        let page = render_page(&runner).await.unwrap();

        assert!(page.contains("GRANDLINE DASHBOARD"));
        assert!(page.contains("Nenhum pirata encontrado"));
        assert!(page.contains("Nenhum capitão encontrado"));
        assert!(page.contains("Nenhum poneglyph encontrado"));
    }

    #[tokio::test]
    async fn test_snapshot_fails_when_bootstrap_queries_fail() {
        // Option loading happens before any section renders; a store that
        // rejects everything fails the page, like a dead connection would.
        let runner = Runner::with_default_ttl(Arc::new(FailingDatabaseClient::new()));
        assert!(render_page(&runner).await.is_err());
    }

    #[tokio::test]
    async fn test_one_failing_section_degrades_to_a_notice() {
        let mock = Arc::new(MockDatabaseClient::new());
        mock.fail_when("rank_piratas");
        let runner = Runner::with_default_ttl(mock);

        let page = render_page(&runner).await.unwrap();

        // The danger index shows a one-line notice...
        assert!(page.contains("[Query error:"));
        // ...while its neighbours still render their empty-state messages.
        assert!(page.contains("Nenhum pirata encontrado"));
        assert!(page.contains("Nenhum capitão encontrado"));
    }

    #[tokio::test]
    async fn test_snapshot_renders_data_sections() {
        let mock = Arc::new(MockDatabaseClient::new());
        mock.respond(
            "rank_piratas",
            Table::with_data(
                ["nomebando", "nomealianca", "recompensacombinada"],
                vec![vec![
                    Value::from("Kaizoku-A"),
                    Value::Null,
                    Value::Int(4_500_000_000),
                ]],
            ),
        );
        let runner = Runner::with_default_ttl(mock);

        let page = render_page(&runner).await.unwrap();
        assert!(page.contains("Nome do Bando"));
        assert!(page.contains("Kaizoku-A"));
        assert!(page.contains("[gráfico de barras: 1 pontos]"));
    }
}
