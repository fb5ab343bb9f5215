//! The section catalog.
//!
//! Each section is one query-spec + presenter pair: a title, the spec built
//! from the current filter state, the display labels, an optional chart and
//! the neutral message shown when the result is empty. The page layout
//! (tabs, sidebar) composes these; nothing in here renders.

use crate::dashboard::filters::{selection, FilterState, SelectOptions};
use crate::dashboard::labels::column_labels;
use crate::db::{Table, Value};
use crate::error::Result;
use crate::present::{present, ChartKind, ChartSpec, ColumnSource, Presentation};
use crate::query::{
    CaptainRanking, DangerIndex, FruitHolders, PiratesByCrewBounty, PoneglyphListing, QuerySpec,
    Runner,
};
use crate::stats::{cluster_1d, flag_upper_outliers};

/// Seed for the bounty clustering, fixed so renders are reproducible.
const CLUSTER_SEED: u64 = 42;

/// Section groups shown as tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Recompensas,
    Personagens,
    Historia,
    Estatisticas,
}

impl Tab {
    /// Tab order in the tab bar.
    pub const ALL: [Tab; 4] = [
        Tab::Recompensas,
        Tab::Personagens,
        Tab::Historia,
        Tab::Estatisticas,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Recompensas => "Recompensas",
            Tab::Personagens => "Personagens",
            Tab::Historia => "História",
            Tab::Estatisticas => "Estatísticas",
        }
    }

    /// Sections rendered on this tab, top to bottom.
    pub fn sections(&self) -> &'static [SectionId] {
        match self {
            Tab::Recompensas => &[
                SectionId::PiratesByCrewBounty,
                SectionId::Captains,
                SectionId::DangerIndex,
            ],
            Tab::Personagens => &[SectionId::FruitHolders],
            Tab::Historia => &[SectionId::Poneglyphs],
            Tab::Estatisticas => &[
                SectionId::BountyStats,
                SectionId::Outliers,
                SectionId::Clusters,
                SectionId::FruitDistribution,
            ],
        }
    }
}

/// Every section the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    PiratesByCrewBounty,
    Captains,
    DangerIndex,
    FruitHolders,
    Poneglyphs,
    BountyStats,
    Outliers,
    Clusters,
    FruitDistribution,
}

impl SectionId {
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::PiratesByCrewBounty => "Piratas filtrados pela Recompensa Total do Bando",
            SectionId::Captains => "Capitães de Bando – Ranking por Recompensa Total",
            SectionId::DangerIndex => "Periculosidade do Bando – Soma das Maiores Recompensas",
            SectionId::FruitHolders => "Personagens com Akuma no Mi – Espécie e Tipo de Fruta",
            SectionId::Poneglyphs => "Rastreamento de Poneglyphs e Contexto Histórico",
            SectionId::BountyStats => "Estatísticas de Recompensas",
            SectionId::Outliers => "Recompensas Fora da Curva",
            SectionId::Clusters => "Agrupamento de Recompensas",
            SectionId::FruitDistribution => "Distribuição de Akuma no Mi",
        }
    }

    /// Neutral message shown when the section has no rows.
    pub fn empty_message(&self) -> &'static str {
        match self {
            SectionId::PiratesByCrewBounty => {
                "Nenhum pirata encontrado com essa recompensa total de bando mínima."
            }
            SectionId::Captains => "Nenhum capitão encontrado com esse filtro.",
            SectionId::DangerIndex => "Nenhum bando encontrado com esse critério.",
            SectionId::FruitHolders => "Nenhum personagem encontrado com os filtros aplicados.",
            SectionId::Poneglyphs => "Nenhum poneglyph encontrado com os filtros aplicados.",
            SectionId::BountyStats => "Nenhuma recompensa registrada.",
            SectionId::Outliers => "Nenhuma recompensa acima do limite superior.",
            SectionId::Clusters => "Nenhuma recompensa registrada.",
            SectionId::FruitDistribution => "Nenhuma Akuma no Mi registrada.",
        }
    }

    /// Chart declaration, for the sections that plot their result.
    pub fn chart(&self) -> Option<ChartSpec> {
        match self {
            SectionId::DangerIndex => Some(ChartSpec {
                kind: ChartKind::Bar,
                x: "nomebando".to_string(),
                y: "recompensacombinada".to_string(),
                category: None,
                source: ColumnSource::Original,
            }),
            SectionId::Clusters => Some(ChartSpec {
                kind: ChartKind::Scatter,
                x: "posicao".to_string(),
                y: "recompensa".to_string(),
                category: Some("grupo".to_string()),
                source: ColumnSource::Original,
            }),
            SectionId::FruitDistribution => Some(ChartSpec {
                kind: ChartKind::Pie,
                x: "Tipo da Fruta".to_string(),
                y: "Quantidade".to_string(),
                category: None,
                source: ColumnSource::Renamed,
            }),
            _ => None,
        }
    }

    /// Builds the query spec this section issues.
    pub fn spec(&self, filters: &FilterState, options: &SelectOptions) -> QuerySpec {
        match self {
            SectionId::PiratesByCrewBounty => {
                QuerySpec::PiratesByCrewBounty(PiratesByCrewBounty {
                    min_crew_bounty: filters.min_crew_bounty,
                })
            }
            SectionId::Captains => QuerySpec::CaptainRanking(CaptainRanking {
                alliance: selection(&options.alliances, filters.alliance),
            }),
            SectionId::DangerIndex => QuerySpec::DangerIndex(DangerIndex {
                top_n: filters.danger_top_n,
                min_combined: filters.danger_min,
                alliance: selection(&options.alliances, filters.danger_alliance),
            }),
            SectionId::FruitHolders => QuerySpec::FruitHolders(FruitHolders {
                species: selection(&options.species, filters.species),
                fruit_type: selection(&options.fruit_types, filters.fruit_type),
            }),
            SectionId::Poneglyphs => QuerySpec::Poneglyphs(PoneglyphListing {
                poneglyph_type: selection(&options.poneglyph_types, filters.poneglyph_type),
                region: selection(&options.regions, filters.region),
            }),
            SectionId::BountyStats => QuerySpec::BountyStatsInSql,
            SectionId::Outliers | SectionId::Clusters => QuerySpec::PirateBounties,
            SectionId::FruitDistribution => QuerySpec::PopulationCounts,
        }
    }
}

/// Runs one section end to end: query, shape, relabel, chart.
pub async fn render_section(
    runner: &Runner,
    id: SectionId,
    filters: &FilterState,
    options: &SelectOptions,
) -> Result<Presentation> {
    let table = runner.run(&id.spec(filters, options)).await?;

    let shaped = match id {
        SectionId::Outliers => shape_outliers(&table),
        SectionId::Clusters => shape_clusters(&table, filters.cluster_k),
        SectionId::FruitDistribution => shape_fruit_distribution(&table),
        _ => table,
    };

    present(
        shaped,
        &column_labels(),
        id.chart().as_ref(),
        id.empty_message(),
    )
}

/// Keeps only the rows whose bounty clears the upper fence, with the fence
/// value alongside for context.
pub fn shape_outliers(bounties: &Table) -> Table {
    let Some(bounty_idx) = bounties.column_index("recompensa") else {
        return Table::new();
    };

    let sampled: Vec<(usize, f64)> = bounties
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(bounty_idx).and_then(Value::as_f64).map(|v| (i, v)))
        .collect();

    let values: Vec<f64> = sampled.iter().map(|(_, v)| *v).collect();
    let Some((summary, flags)) = flag_upper_outliers(&values) else {
        return Table::new();
    };

    let mut columns = bounties.columns.clone();
    columns.push("limite_superior".to_string());

    let rows = sampled
        .iter()
        .zip(&flags)
        .filter(|(_, &flagged)| flagged)
        .map(|((row_idx, _), _)| {
            let mut row = bounties.rows[*row_idx].clone();
            row.push(Value::Float(summary.upper_fence));
            row
        })
        .collect();

    Table { columns, rows }
}

/// Assigns every bounty a cluster label and a rank position.
pub fn shape_clusters(bounties: &Table, k: usize) -> Table {
    let Some(bounty_idx) = bounties.column_index("recompensa") else {
        return Table::new();
    };

    let sampled: Vec<(usize, f64)> = bounties
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(bounty_idx).and_then(Value::as_f64).map(|v| (i, v)))
        .collect();

    let values: Vec<f64> = sampled.iter().map(|(_, v)| *v).collect();
    let labels = cluster_1d(&values, k, CLUSTER_SEED);

    let mut columns = bounties.columns.clone();
    columns.push("posicao".to_string());
    columns.push("grupo".to_string());

    let rows = sampled
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(position, ((row_idx, _), &label))| {
            let mut row = bounties.rows[*row_idx].clone();
            row.push(Value::Int(position as i64 + 1));
            row.push(Value::Int(label as i64 + 1));
            row
        })
        .collect();

    Table { columns, rows }
}

/// Pivots the one-row population counts into fruit-category rows.
pub fn shape_fruit_distribution(counts: &Table) -> Table {
    let Some(row) = counts.rows.first() else {
        return Table::new();
    };

    let category = |column: &str| -> Option<i64> {
        counts
            .column_index(column)
            .and_then(|idx| row.get(idx))
            .and_then(Value::as_i64)
    };

    let rows: Vec<Vec<Value>> = [
        ("Paramecia", category("qtd_paramecia")),
        ("Zoan", category("qtd_zoan")),
        ("Logia", category("qtd_logia")),
    ]
    .into_iter()
    .filter_map(|(name, count)| count.map(|c| vec![Value::from(name), Value::Int(c)]))
    .filter(|row| row[1] != Value::Int(0))
    .collect();

    Table::with_data(["tipofruta", "quantidade"], rows)
}
