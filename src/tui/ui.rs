//! Drawing: page layout and section rendering.

use crate::present::{ChartData, ChartKind, Presentation};
use crate::tui::app::{App, SectionOutcome};
use crate::tui::widgets::{chart, sidebar, table::ResultTable};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Draws the whole page.
pub fn draw(frame: &mut Frame, app: &App) {
    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(34), Constraint::Min(40)]).areas(frame.area());

    draw_sidebar(frame, app, sidebar_area);
    draw_main(frame, app, main_area);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Estatísticas do Mundo");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = sidebar::world_stats_lines(app.world.as_ref());
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    let controls = app.controls();
    let [tabs_area, controls_area, sections_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(controls.len() as u16 + 2),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    let titles: Vec<&str> = crate::dashboard::Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab_index)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");
    frame.render_widget(tabs, tabs_area);

    draw_controls(frame, app, controls_area);
    draw_sections(frame, app, sections_area);

    let help = Line::from(Span::styled(
        "Tab: aba  ↑↓: foco  ←→: ajustar  r: atualizar  q: sair",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(help), help_area);
}

fn draw_controls(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Filtros");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = app
        .controls()
        .iter()
        .enumerate()
        .map(|(i, &control)| {
            let label = app.control_label(control);
            if i == app.focus {
                Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Yellow)),
                    Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(format!("  {label}"))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_sections(frame: &mut Frame, app: &App, area: Rect) {
    let section_ids = app.tab().sections();
    let constraints: Vec<Constraint> = section_ids
        .iter()
        .map(|_| Constraint::Ratio(1, section_ids.len() as u32))
        .collect();
    let areas = Layout::vertical(constraints).split(area);

    for (&id, &section_area) in section_ids.iter().zip(areas.iter()) {
        let block = Block::default().borders(Borders::ALL).title(id.title());
        let inner = block.inner(section_area);
        frame.render_widget(block, section_area);

        match app.sections.get(&id) {
            None => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Carregando...",
                        Style::default().fg(Color::DarkGray),
                    )),
                    inner,
                );
            }
            Some(SectionOutcome::Failed(message)) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        message.as_str(),
                        Style::default().fg(Color::Red),
                    )),
                    inner,
                );
            }
            Some(SectionOutcome::Ready(Presentation::Empty { message })) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        message.as_str(),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )),
                    inner,
                );
            }
            Some(SectionOutcome::Ready(Presentation::Data { table, chart })) => {
                match chart {
                    Some(chart_data) => {
                        let [table_area, chart_area] = Layout::vertical([
                            Constraint::Percentage(55),
                            Constraint::Percentage(45),
                        ])
                        .areas(inner);
                        draw_table(frame, table, table_area);
                        draw_chart(frame, chart_data, chart_area);
                    }
                    None => draw_table(frame, table, inner),
                }
            }
        }
    }
}

fn draw_table(frame: &mut Frame, table: &crate::db::Table, area: Rect) {
    let lines = ResultTable::new(table).render_to_lines(area.width as usize);
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_chart(frame: &mut Frame, data: &ChartData, area: Rect) {
    match data.kind {
        ChartKind::Bar => frame.render_widget(chart::bar_chart(data), area),
        ChartKind::Scatter => {
            let series = chart::scatter_series(data);
            frame.render_widget(chart::scatter_chart(&series), area);
        }
        ChartKind::Pie => frame.render_widget(Paragraph::new(chart::pie_lines(data)), area),
    }
}
