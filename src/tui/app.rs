//! Application state and event handling.
//!
//! The app owns the widget state and the latest section outcomes. Whenever
//! a control changes, the visible sections re-run top to bottom through the
//! shared runner, in-line with the render loop. A section whose query fails
//! keeps a one-line notice; the rest of the page still renders.

use std::collections::HashMap;

use crate::dashboard::filters::{
    cycle_selection, step_slider, CREW_BOUNTY_MAX, CREW_BOUNTY_MIN, CREW_BOUNTY_STEP, DANGER_MAX,
    DANGER_MIN, DANGER_STEP, TOP_N_MAX, TOP_N_MIN,
};
use crate::dashboard::labels::format_berries;
use crate::dashboard::{
    load_world_stats, render_section, FilterState, SectionId, SelectOptions, Tab, WorldStats,
};
use crate::present::Presentation;
use crate::query::Runner;
use crate::stats::{CLUSTERS_MAX, CLUSTERS_MIN};
use crossterm::event::KeyCode;
use tracing::warn;

/// The latest outcome for a section.
pub enum SectionOutcome {
    /// Rendered successfully (possibly the empty-state message).
    Ready(Presentation),
    /// The section's query failed; show this notice instead.
    Failed(String),
}

/// A focusable filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    CrewBountySlider,
    AllianceSelect,
    TopNSlider,
    DangerMinSlider,
    DangerAllianceSelect,
    SpeciesSelect,
    FruitTypeSelect,
    PoneglyphTypeSelect,
    RegionSelect,
    ClusterSlider,
}

/// Controls shown on each tab, top to bottom.
fn tab_controls(tab: Tab) -> &'static [Control] {
    match tab {
        Tab::Recompensas => &[
            Control::CrewBountySlider,
            Control::AllianceSelect,
            Control::TopNSlider,
            Control::DangerMinSlider,
            Control::DangerAllianceSelect,
        ],
        Tab::Personagens => &[Control::SpeciesSelect, Control::FruitTypeSelect],
        Tab::Historia => &[Control::PoneglyphTypeSelect, Control::RegionSelect],
        Tab::Estatisticas => &[Control::ClusterSlider],
    }
}

/// TUI application state.
pub struct App {
    pub filters: FilterState,
    pub options: SelectOptions,
    pub tab_index: usize,
    pub focus: usize,
    pub sections: HashMap<SectionId, SectionOutcome>,
    pub world: Option<WorldStats>,
    pub should_quit: bool,
}

impl App {
    /// Creates the app with freshly loaded select-box options.
    pub fn new(options: SelectOptions) -> Self {
        Self {
            filters: FilterState::default(),
            options,
            tab_index: 0,
            focus: 0,
            sections: HashMap::new(),
            world: None,
            should_quit: false,
        }
    }

    /// The currently selected tab.
    pub fn tab(&self) -> Tab {
        Tab::ALL[self.tab_index]
    }

    /// The current tab's controls.
    pub fn controls(&self) -> &'static [Control] {
        tab_controls(self.tab())
    }

    /// Handles a key press. Returns true when the visible sections must
    /// re-run.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Tab => {
                self.tab_index = (self.tab_index + 1) % Tab::ALL.len();
                self.focus = 0;
                true
            }
            KeyCode::BackTab => {
                self.tab_index = (self.tab_index + Tab::ALL.len() - 1) % Tab::ALL.len();
                self.focus = 0;
                true
            }
            KeyCode::Up => {
                let len = self.controls().len();
                if len > 0 {
                    self.focus = (self.focus + len - 1) % len;
                }
                false
            }
            KeyCode::Down => {
                let len = self.controls().len();
                if len > 0 {
                    self.focus = (self.focus + 1) % len;
                }
                false
            }
            KeyCode::Left => self.adjust_focused(-1),
            KeyCode::Right => self.adjust_focused(1),
            KeyCode::Char('r') => true,
            _ => false,
        }
    }

    /// Moves the focused control by one step. Returns true when a value
    /// actually changed.
    fn adjust_focused(&mut self, delta: i64) -> bool {
        let Some(&control) = self.controls().get(self.focus) else {
            return false;
        };

        let before = self.filters.clone();
        match control {
            Control::CrewBountySlider => {
                self.filters.min_crew_bounty = step_slider(
                    self.filters.min_crew_bounty,
                    CREW_BOUNTY_STEP,
                    CREW_BOUNTY_MIN,
                    CREW_BOUNTY_MAX,
                    delta,
                );
            }
            Control::AllianceSelect => {
                self.filters.alliance =
                    cycle_selection(self.options.alliances.len(), self.filters.alliance, delta as isize);
            }
            Control::TopNSlider => {
                self.filters.danger_top_n =
                    step_slider(self.filters.danger_top_n, 1, TOP_N_MIN, TOP_N_MAX, delta);
            }
            Control::DangerMinSlider => {
                self.filters.danger_min = step_slider(
                    self.filters.danger_min,
                    DANGER_STEP,
                    DANGER_MIN,
                    DANGER_MAX,
                    delta,
                );
            }
            Control::DangerAllianceSelect => {
                self.filters.danger_alliance = cycle_selection(
                    self.options.alliances.len(),
                    self.filters.danger_alliance,
                    delta as isize,
                );
            }
            Control::SpeciesSelect => {
                self.filters.species =
                    cycle_selection(self.options.species.len(), self.filters.species, delta as isize);
            }
            Control::FruitTypeSelect => {
                self.filters.fruit_type = cycle_selection(
                    self.options.fruit_types.len(),
                    self.filters.fruit_type,
                    delta as isize,
                );
            }
            Control::PoneglyphTypeSelect => {
                self.filters.poneglyph_type = cycle_selection(
                    self.options.poneglyph_types.len(),
                    self.filters.poneglyph_type,
                    delta as isize,
                );
            }
            Control::RegionSelect => {
                self.filters.region =
                    cycle_selection(self.options.regions.len(), self.filters.region, delta as isize);
            }
            Control::ClusterSlider => {
                self.filters.cluster_k = (self.filters.cluster_k as i64 + delta)
                    .clamp(CLUSTERS_MIN as i64, CLUSTERS_MAX as i64)
                    as usize;
            }
        }

        self.filters != before
    }

    /// Display label for a control, including its current value.
    pub fn control_label(&self, control: Control) -> String {
        match control {
            Control::CrewBountySlider => format!(
                "Recompensa total mínima do bando: {}",
                format_berries(self.filters.min_crew_bounty)
            ),
            Control::AllianceSelect => format!(
                "Filtrar por aliança: {}",
                option_at(&self.options.alliances, self.filters.alliance)
            ),
            Control::TopNSlider => {
                format!("Somar os N maiores recompensados: {}", self.filters.danger_top_n)
            }
            Control::DangerMinSlider => format!(
                "Recompensa combinada mínima (Top {}): {}",
                self.filters.danger_top_n,
                format_berries(self.filters.danger_min)
            ),
            Control::DangerAllianceSelect => format!(
                "Filtrar por aliança (periculosidade): {}",
                option_at(&self.options.alliances, self.filters.danger_alliance)
            ),
            Control::SpeciesSelect => format!(
                "Filtrar por espécie: {}",
                option_at(&self.options.species, self.filters.species)
            ),
            Control::FruitTypeSelect => format!(
                "Filtrar por tipo de fruta: {}",
                option_at(&self.options.fruit_types, self.filters.fruit_type)
            ),
            Control::PoneglyphTypeSelect => format!(
                "Filtrar por tipo de poneglyph: {}",
                option_at(&self.options.poneglyph_types, self.filters.poneglyph_type)
            ),
            Control::RegionSelect => format!(
                "Filtrar por região: {}",
                option_at(&self.options.regions, self.filters.region)
            ),
            Control::ClusterSlider => {
                format!("Número de grupos (k): {}", self.filters.cluster_k)
            }
        }
    }

    /// Re-runs the sidebar and every section of the current tab.
    pub async fn refresh(&mut self, runner: &Runner) {
        match load_world_stats(runner).await {
            Ok(stats) => self.world = Some(stats),
            Err(e) => warn!("world stats failed: {e}"),
        }

        for &id in self.tab().sections() {
            let outcome = match render_section(runner, id, &self.filters, &self.options).await {
                Ok(presentation) => SectionOutcome::Ready(presentation),
                Err(e) => {
                    warn!("section {:?} failed: {e}", id);
                    SectionOutcome::Failed(e.to_string())
                }
            };
            self.sections.insert(id, outcome);
        }
    }
}

fn option_at(options: &[String], index: usize) -> String {
    options
        .get(index)
        .cloned()
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockDatabaseClient, Table, Value};
    use std::sync::Arc;

    fn app_with_options() -> App {
        App::new(SelectOptions {
            species: vec!["Todas".into(), "Mink".into()],
            fruit_types: vec!["Todos".into(), "Logia".into()],
            alliances: vec!["Todas".into(), "Grande Frota".into()],
            poneglyph_types: vec!["Todos".into(), "Rio".into()],
            regions: vec!["Todas".into(), "Grand Line".into()],
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with_options();
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = app_with_options();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_cycling_resets_focus() {
        let mut app = app_with_options();
        app.focus = 2;

        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.tab(), Tab::Personagens);
        assert_eq!(app.focus, 0);

        assert!(app.handle_key(KeyCode::BackTab));
        assert_eq!(app.tab(), Tab::Recompensas);
    }

    #[test]
    fn test_slider_adjustment_marks_dirty() {
        let mut app = app_with_options();

        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.filters.min_crew_bounty, 50_000_000);

        // Left at the minimum changes nothing, so no re-run.
        let mut app = app_with_options();
        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.filters.min_crew_bounty, 0);
    }

    #[test]
    fn test_select_cycles_through_options() {
        let mut app = app_with_options();
        app.handle_key(KeyCode::Down); // focus the alliance select

        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.filters.alliance, 1);

        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.filters.alliance, 0); // wrapped past the end
    }

    #[test]
    fn test_cluster_slider_clamps() {
        let mut app = app_with_options();
        app.tab_index = 3; // Estatísticas

        for _ in 0..10 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.filters.cluster_k, CLUSTERS_MAX);

        for _ in 0..10 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.filters.cluster_k, CLUSTERS_MIN);
    }

    #[test]
    fn test_control_labels_carry_values() {
        let mut app = app_with_options();
        app.filters.min_crew_bounty = 4_000_000_000;
        app.filters.species = 1;

        assert_eq!(
            app.control_label(Control::CrewBountySlider),
            "Recompensa total mínima do bando: B$ 4,000,000,000"
        );
        assert_eq!(
            app.control_label(Control::SpeciesSelect),
            "Filtrar por espécie: Mink"
        );
    }

    #[tokio::test]
    async fn test_refresh_records_section_outcomes() {
        let mock = Arc::new(MockDatabaseClient::new());
        mock.respond(
            "rank_piratas",
            Table::with_data(
                ["nomebando", "nomealianca", "recompensacombinada"],
                vec![vec![Value::from("Kaizoku-A"), Value::Null, Value::Int(1)]],
            ),
        );
        let runner = Runner::with_default_ttl(mock);

        let mut app = app_with_options();
        app.refresh(&runner).await;

        assert!(app.world.is_some());
        assert!(matches!(
            app.sections.get(&SectionId::DangerIndex),
            Some(SectionOutcome::Ready(Presentation::Data { .. }))
        ));
        assert!(matches!(
            app.sections.get(&SectionId::PiratesByCrewBounty),
            Some(SectionOutcome::Ready(Presentation::Empty { .. }))
        ));
    }

    #[tokio::test]
    async fn test_refresh_keeps_failing_section_as_notice() {
        let mock = Arc::new(MockDatabaseClient::new());
        mock.fail_when("rank_piratas");
        let runner = Runner::with_default_ttl(mock);

        let mut app = app_with_options();
        app.refresh(&runner).await;

        assert!(matches!(
            app.sections.get(&SectionId::DangerIndex),
            Some(SectionOutcome::Failed(_))
        ));
        // Neighbouring sections still rendered.
        assert!(matches!(
            app.sections.get(&SectionId::Captains),
            Some(SectionOutcome::Ready(_))
        ));
    }
}
