//! Sidebar widget: the "world stats" metrics.

use crate::dashboard::labels::format_berries;
use crate::dashboard::WorldStats;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Renders the sidebar metrics as text lines.
pub fn world_stats_lines(stats: Option<&WorldStats>) -> Vec<Line<'static>> {
    let Some(stats) = stats else {
        return vec![Line::from(Span::styled(
            "Carregando estatísticas...",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut lines = Vec::new();

    lines.push(header("Os Mais Procurados"));
    match &stats.top_crew {
        Some((name, value)) => {
            lines.push(metric("Maior Recompensa (Bando)"));
            lines.push(value_line(format_berries(*value)));
            lines.push(delta_line(name.clone()));
        }
        None => lines.push(delta_line("Nenhum bando registrado".to_string())),
    }
    match &stats.top_pirate {
        Some((name, value)) => {
            lines.push(metric("Maior Recompensa (Individual)"));
            lines.push(value_line(format_berries(*value)));
            lines.push(delta_line(name.clone()));
        }
        None => lines.push(delta_line("Nenhum pirata registrado".to_string())),
    }

    lines.push(Line::default());
    lines.push(header("População & Poder"));
    lines.push(pair("Piratas", stats.pirates));
    lines.push(pair("Marinha", stats.marines));

    lines.push(Line::default());
    lines.push(header("Akuma no Mi (Distribuição)"));
    lines.push(pair("Total", stats.fruits));
    lines.push(pair("Paramecia", stats.paramecia));
    // Inclui Míticas, Ancestrais e Artificiais
    lines.push(pair("Zoan", stats.zoan));
    lines.push(pair("Logia", stats.logia));

    lines.push(Line::default());
    lines.push(header("Geografia & Navios"));
    lines.push(pair("Ilhas Registradas", stats.islands));
    lines.push(pair("Navios no Mar", stats.ships_at_sea));

    lines
}

fn header(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn metric(text: &'static str) -> Line<'static> {
    Line::from(Span::from(text))
}

fn value_line(value: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {value}"),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
}

fn delta_line(name: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {name}"),
        Style::default().fg(Color::DarkGray),
    ))
}

fn pair(label: &'static str, value: i64) -> Line<'static> {
    Line::from(vec![
        Span::from(format!("{label}: ")),
        Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}
