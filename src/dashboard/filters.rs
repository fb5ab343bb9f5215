//! Filter widget state.
//!
//! Slider ranges, steps and defaults for every control, plus the select-box
//! option lists with their sentinel "all" entries. The widget state is
//! plain data; the TUI only moves it and the section catalog reads it.

use crate::db::Table;
use crate::query::Choice;
use crate::stats::CLUSTERS_DEFAULT;

/// Sentinel select-box entry meaning "no restriction" (feminine nouns).
pub const ALL_FEMININE: &str = "Todas";
/// Sentinel select-box entry meaning "no restriction" (masculine nouns).
pub const ALL_MASCULINE: &str = "Todos";

/// Crew-total-bounty slider: 0 to 8 billion berries in 50-million steps.
pub const CREW_BOUNTY_MIN: i64 = 0;
pub const CREW_BOUNTY_MAX: i64 = 8_000_000_000;
pub const CREW_BOUNTY_STEP: i64 = 50_000_000;

/// Danger-index combined-bounty slider: 0 to 10 billion berries.
pub const DANGER_MIN: i64 = 0;
pub const DANGER_MAX: i64 = 10_000_000_000;
pub const DANGER_STEP: i64 = 50_000_000;

/// Danger-index window slider: top 1 to top 20 members, default 3.
pub const TOP_N_MIN: i64 = 1;
pub const TOP_N_MAX: i64 = 20;
pub const TOP_N_DEFAULT: i64 = 3;

/// Current position of every filter widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Minimum crew total bounty (pirates listing).
    pub min_crew_bounty: i64,
    /// Selected species index (0 is the sentinel).
    pub species: usize,
    /// Selected fruit-type index (0 is the sentinel).
    pub fruit_type: usize,
    /// Selected alliance index for the captains ranking.
    pub alliance: usize,
    /// Danger index: how many top members to sum.
    pub danger_top_n: i64,
    /// Danger index: minimum combined bounty.
    pub danger_min: i64,
    /// Selected alliance index for the danger index.
    pub danger_alliance: usize,
    /// Selected poneglyph-type index.
    pub poneglyph_type: usize,
    /// Selected region index.
    pub region: usize,
    /// Cluster count for the bounty grouping section.
    pub cluster_k: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_crew_bounty: CREW_BOUNTY_MIN,
            species: 0,
            fruit_type: 0,
            alliance: 0,
            danger_top_n: TOP_N_DEFAULT,
            danger_min: DANGER_MIN,
            danger_alliance: 0,
            poneglyph_type: 0,
            region: 0,
            cluster_k: CLUSTERS_DEFAULT,
        }
    }
}

/// Select-box option lists, sentinel entry first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectOptions {
    pub species: Vec<String>,
    pub fruit_types: Vec<String>,
    pub alliances: Vec<String>,
    pub poneglyph_types: Vec<String>,
    pub regions: Vec<String>,
}

impl SelectOptions {
    /// Builds the option lists from the distinct-value query results.
    pub fn from_tables(
        species: &Table,
        fruit_types: &Table,
        alliances: &Table,
        poneglyph_types: &Table,
        regions: &Table,
    ) -> Self {
        Self {
            species: with_sentinel(ALL_FEMININE, species),
            fruit_types: with_sentinel(ALL_MASCULINE, fruit_types),
            alliances: with_sentinel(ALL_FEMININE, alliances),
            poneglyph_types: with_sentinel(ALL_MASCULINE, poneglyph_types),
            regions: with_sentinel(ALL_FEMININE, regions),
        }
    }
}

/// Prepends the sentinel to the first column of a distinct-value result.
fn with_sentinel(sentinel: &str, table: &Table) -> Vec<String> {
    let mut options = vec![sentinel.to_string()];
    options.extend(
        table
            .rows
            .iter()
            .filter_map(|row| row.first())
            .filter(|v| !v.is_null())
            .map(|v| v.to_display_string()),
    );
    options
}

/// Resolves a select-box position into a filter choice.
///
/// Index 0 is the sentinel and means no restriction.
pub fn selection(options: &[String], index: usize) -> Choice<String> {
    match options.get(index) {
        Some(value) if index > 0 => Choice::Only(value.clone()),
        _ => Choice::All,
    }
}

/// Moves a slider by `delta` steps, clamped to its range.
pub fn step_slider(value: i64, step: i64, min: i64, max: i64, delta: i64) -> i64 {
    (value + delta * step).clamp(min, max)
}

/// Moves a select-box position by `delta`, wrapping around.
pub fn cycle_selection(len: usize, index: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (((index as isize + delta) % len + len) % len) as usize
}
