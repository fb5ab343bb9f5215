//! Typed query specifications.
//!
//! Every dashboard section is driven by a spec in this module: named filter
//! fields with an explicit "unset" representation instead of sentinel
//! strings spliced into SQL. A spec compiles (see [`crate::query::builder`])
//! to a [`Statement`] — SQL text plus the ordered bound values — and the
//! cache is keyed by the spec's template id and parameters, never by the
//! literal SQL formatting.

use crate::db::ScalarValue;
use serde::{Deserialize, Serialize};

/// An optional filter: either "no restriction" or a single chosen value.
///
/// The UI's `"Todas"`/`"Todos"` sentinel entries map to [`Choice::All`];
/// only [`Choice::Only`] values ever reach a WHERE/HAVING clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice<T> {
    /// No restriction; the clause is omitted entirely.
    All,
    /// Restrict to this value, bound as a statement parameter.
    Only(T),
}

impl<T> Choice<T> {
    /// Returns true when no restriction applies.
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// The chosen value, if any.
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(value) => Choice::Only(value),
            None => Choice::All,
        }
    }
}

/// Identifies a base query template.
///
/// Together with the bound parameters this is the cache key: two specs with
/// the same template and values share one cache entry regardless of how the
/// SQL text happens to be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    PiratesByCrewBounty,
    FruitHolders,
    CaptainRanking,
    DangerIndex,
    Poneglyphs,
    BountyRecords,
    PopulationCounts,
    Geography,
    SpeciesOptions,
    FruitTypeOptions,
    AllianceOptions,
    PoneglyphTypeOptions,
    RegionOptions,
    PirateBounties,
    BountyStatsInSql,
}

/// A compiled, executable statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The template this statement was compiled from.
    pub template: TemplateId,
    /// SQL text with numbered placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub params: Vec<ScalarValue>,
}

/// Pirates joined to their crew, filtered by minimum crew total bounty.
///
/// The threshold always participates; 0 (the slider minimum) is equivalent
/// to no filter since bounties are non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PiratesByCrewBounty {
    /// Minimum crew total bounty, in berries.
    pub min_crew_bounty: i64,
}

/// Devil-fruit holders with optional species and fruit-type filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FruitHolders {
    pub species: Choice<String>,
    pub fruit_type: Choice<String>,
}

/// Crew captains ranked by crew total bounty, optionally within an alliance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptainRanking {
    pub alliance: Choice<String>,
}

/// Danger index: per-crew sum of the top-N individual bounties.
///
/// Ties at the window boundary resolve by the store's row order, which is
/// unspecified; no secondary sort key is added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DangerIndex {
    /// How many top members to sum per crew (1–20).
    pub top_n: i64,
    /// Minimum combined bounty for a crew to appear.
    pub min_combined: i64,
    pub alliance: Choice<String>,
}

/// Valid range for the danger-index window size.
pub const TOP_N_RANGE: std::ops::RangeInclusive<i64> = 1..=20;

/// Poneglyphs joined to their island and region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoneglyphListing {
    pub poneglyph_type: Choice<String>,
    pub region: Choice<String>,
}

/// Which select-box an option query feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionList {
    Species,
    FruitTypes,
    Alliances,
    PoneglyphTypes,
    Regions,
}

/// Every query the dashboard can issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuerySpec {
    PiratesByCrewBounty(PiratesByCrewBounty),
    FruitHolders(FruitHolders),
    CaptainRanking(CaptainRanking),
    DangerIndex(DangerIndex),
    Poneglyphs(PoneglyphListing),
    /// Sidebar: top crew and top pirate by bounty.
    BountyRecords,
    /// Sidebar: pirate/navy/fruit-category counts.
    PopulationCounts,
    /// Sidebar: island and sailing-ship counts.
    Geography,
    /// Distinct values feeding a select-box.
    Options(OptionList),
    /// Pirate name, alias and bounty for the client-side stats sections.
    PirateBounties,
    /// Descriptive bounty statistics computed in SQL.
    BountyStatsInSql,
}

impl QuerySpec {
    /// The template this spec compiles to.
    pub fn template(&self) -> TemplateId {
        match self {
            QuerySpec::PiratesByCrewBounty(_) => TemplateId::PiratesByCrewBounty,
            QuerySpec::FruitHolders(_) => TemplateId::FruitHolders,
            QuerySpec::CaptainRanking(_) => TemplateId::CaptainRanking,
            QuerySpec::DangerIndex(_) => TemplateId::DangerIndex,
            QuerySpec::Poneglyphs(_) => TemplateId::Poneglyphs,
            QuerySpec::BountyRecords => TemplateId::BountyRecords,
            QuerySpec::PopulationCounts => TemplateId::PopulationCounts,
            QuerySpec::Geography => TemplateId::Geography,
            QuerySpec::Options(OptionList::Species) => TemplateId::SpeciesOptions,
            QuerySpec::Options(OptionList::FruitTypes) => TemplateId::FruitTypeOptions,
            QuerySpec::Options(OptionList::Alliances) => TemplateId::AllianceOptions,
            QuerySpec::Options(OptionList::PoneglyphTypes) => TemplateId::PoneglyphTypeOptions,
            QuerySpec::Options(OptionList::Regions) => TemplateId::RegionOptions,
            QuerySpec::PirateBounties => TemplateId::PirateBounties,
            QuerySpec::BountyStatsInSql => TemplateId::BountyStatsInSql,
        }
    }

    /// Compiles the spec into an executable statement.
    pub fn compile(&self) -> Statement {
        crate::query::builder::compile(self)
    }
}
