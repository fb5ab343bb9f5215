//! SQL compilation for query specs.
//!
//! Pure string composition: each template starts from a fixed SELECT/JOIN
//! base, appends a clause per active filter, and binds every
//! user-controlled value as a numbered placeholder. Threshold filters
//! always participate (their slider minimum is the neutral value); sentinel
//! "all" filters are omitted entirely, so an all-sentinel spec compiles to
//! the unfiltered base query. Composition never executes anything.

use crate::db::ScalarValue;
use crate::query::spec::{
    CaptainRanking, DangerIndex, FruitHolders, OptionList, PiratesByCrewBounty, PoneglyphListing,
    QuerySpec, Statement, TemplateId, TOP_N_RANGE,
};

/// Compiles a spec into an executable statement.
pub fn compile(spec: &QuerySpec) -> Statement {
    match spec {
        QuerySpec::PiratesByCrewBounty(s) => pirates_by_crew_bounty(s),
        QuerySpec::FruitHolders(s) => fruit_holders(s),
        QuerySpec::CaptainRanking(s) => captain_ranking(s),
        QuerySpec::DangerIndex(s) => danger_index(s),
        QuerySpec::Poneglyphs(s) => poneglyphs(s),
        QuerySpec::BountyRecords => fixed(TemplateId::BountyRecords, BOUNTY_RECORDS_SQL),
        QuerySpec::PopulationCounts => fixed(TemplateId::PopulationCounts, POPULATION_COUNTS_SQL),
        QuerySpec::Geography => fixed(TemplateId::Geography, GEOGRAPHY_SQL),
        QuerySpec::Options(list) => options(*list),
        QuerySpec::PirateBounties => fixed(TemplateId::PirateBounties, PIRATE_BOUNTIES_SQL),
        QuerySpec::BountyStatsInSql => fixed(TemplateId::BountyStatsInSql, BOUNTY_STATS_SQL),
    }
}

/// Accumulates SQL text and the bound values backing its placeholders.
struct SqlWriter {
    sql: String,
    params: Vec<ScalarValue>,
}

impl SqlWriter {
    fn new(base: &str) -> Self {
        Self {
            sql: base.trim().to_string(),
            params: Vec::new(),
        }
    }

    /// Appends a clause on its own line.
    fn line(&mut self, clause: &str) {
        self.sql.push('\n');
        self.sql.push_str(clause);
    }

    /// Registers a bound value and returns its placeholder.
    fn bind(&mut self, value: impl Into<ScalarValue>) -> String {
        self.params.push(value.into());
        format!("${}", self.params.len())
    }

    fn finish(self, template: TemplateId) -> Statement {
        Statement {
            template,
            sql: self.sql,
            params: self.params,
        }
    }
}

fn fixed(template: TemplateId, sql: &str) -> Statement {
    Statement {
        template,
        sql: sql.trim().to_string(),
        params: Vec::new(),
    }
}

const PIRATES_BY_CREW_BOUNTY_BASE: &str = "
SELECT p.NomePersonagem,
       p.Alcunha,
       pir.Recompensa AS RecompensaIndividual,
       b.NomeBando,
       b.RecompensaTotalBando,
       b.NomeAlianca
FROM Pirata pir
JOIN Personagem p ON pir.NomePersonagem = p.NomePersonagem
JOIN Bando b ON pir.NomeBando = b.NomeBando";

fn pirates_by_crew_bounty(spec: &PiratesByCrewBounty) -> Statement {
    let mut w = SqlWriter::new(PIRATES_BY_CREW_BOUNTY_BASE);
    let threshold = w.bind(spec.min_crew_bounty);
    w.line(&format!("WHERE b.RecompensaTotalBando >= {threshold}"));
    w.line("ORDER BY b.RecompensaTotalBando DESC, pir.Recompensa DESC");
    w.finish(TemplateId::PiratesByCrewBounty)
}

const FRUIT_HOLDERS_BASE: &str = "
SELECT p.NomePersonagem,
       p.Alcunha,
       f.NomeEspecie,
       pf.NomeFruta,
       a.TipoFruta
FROM Personagem p
JOIN Filiacao_Especie f ON p.NomePersonagem = f.NomePersonagem
JOIN Posse_Fruta pf ON p.NomePersonagem = pf.NomePersonagem
JOIN AkumaNoMi a ON pf.NomeFruta = a.NomeFruta";

fn fruit_holders(spec: &FruitHolders) -> Statement {
    let mut w = SqlWriter::new(FRUIT_HOLDERS_BASE);

    let mut conditions = Vec::new();
    if let Some(species) = spec.species.as_only() {
        let ph = w.bind(species.clone());
        conditions.push(format!("f.NomeEspecie = {ph}"));
    }
    if let Some(fruit_type) = spec.fruit_type.as_only() {
        let ph = w.bind(fruit_type.clone());
        conditions.push(format!("a.TipoFruta = {ph}"));
    }
    if !conditions.is_empty() {
        w.line(&format!("WHERE {}", conditions.join(" AND ")));
    }

    w.line("ORDER BY p.NomePersonagem ASC");
    w.finish(TemplateId::FruitHolders)
}

const CAPTAIN_RANKING_BASE: &str = "
SELECT pr.NomePersonagem,
       p.Alcunha,
       pr.Recompensa,
       b.NomeBando,
       b.RecompensaTotalBando,
       b.NomeAlianca
FROM Pirata pr
JOIN Personagem p ON pr.NomePersonagem = p.NomePersonagem
JOIN Bando b ON pr.NomePersonagem = b.PirataCapitao";

fn captain_ranking(spec: &CaptainRanking) -> Statement {
    let mut w = SqlWriter::new(CAPTAIN_RANKING_BASE);

    if let Some(alliance) = spec.alliance.as_only() {
        let ph = w.bind(alliance.clone());
        w.line(&format!("WHERE b.NomeAlianca = {ph}"));
    }

    // Ranking is by crew total bounty only; no secondary key.
    w.line("ORDER BY b.RecompensaTotalBando DESC");
    w.finish(TemplateId::CaptainRanking)
}

const DANGER_INDEX_BASE: &str = "
WITH rank_piratas AS (
    SELECT NomeBando,
           NomePersonagem,
           Recompensa,
           ROW_NUMBER() OVER (
               PARTITION BY NomeBando
               ORDER BY Recompensa DESC
           ) AS rn
    FROM Pirata
)
SELECT b.NomeBando,
       b.NomeAlianca,
       SUM(rp.Recompensa)::BIGINT AS RecompensaCombinada
FROM rank_piratas rp
JOIN Bando b ON b.NomeBando = rp.NomeBando";

fn danger_index(spec: &DangerIndex) -> Statement {
    let mut w = SqlWriter::new(DANGER_INDEX_BASE);

    // Ties within the window resolve by the store's row order.
    let top_n = spec
        .top_n
        .clamp(*TOP_N_RANGE.start(), *TOP_N_RANGE.end());
    let ph_n = w.bind(top_n);
    let mut where_clause = format!("WHERE rp.rn <= {ph_n}");
    if let Some(alliance) = spec.alliance.as_only() {
        let ph = w.bind(alliance.clone());
        where_clause.push_str(&format!(" AND b.NomeAlianca = {ph}"));
    }
    w.line(&where_clause);

    w.line("GROUP BY b.NomeBando, b.NomeAlianca");
    let ph_min = w.bind(spec.min_combined);
    w.line(&format!("HAVING SUM(rp.Recompensa) >= {ph_min}"));
    w.line("ORDER BY RecompensaCombinada DESC");
    w.finish(TemplateId::DangerIndex)
}

const PONEGLYPHS_BASE: &str = "
SELECT po.TipoPoneglyph,
       po.Conteudo,
       i.NomeIlha,
       ar.NomeArea,
       i.Afiliacao
FROM Poneglyph po
JOIN Ilha i ON po.NomeIlha = i.NomeIlha
JOIN Area ar ON i.NomeArea = ar.NomeArea";

fn poneglyphs(spec: &PoneglyphListing) -> Statement {
    let mut w = SqlWriter::new(PONEGLYPHS_BASE);

    let mut conditions = Vec::new();
    if let Some(ptype) = spec.poneglyph_type.as_only() {
        let ph = w.bind(ptype.clone());
        conditions.push(format!("po.TipoPoneglyph = {ph}"));
    }
    if let Some(region) = spec.region.as_only() {
        let ph = w.bind(region.clone());
        conditions.push(format!("ar.NomeArea = {ph}"));
    }
    if !conditions.is_empty() {
        w.line(&format!("WHERE {}", conditions.join(" AND ")));
    }

    w.line("ORDER BY po.TipoPoneglyph ASC, i.NomeIlha ASC");
    w.finish(TemplateId::Poneglyphs)
}

const BOUNTY_RECORDS_SQL: &str = "
SELECT
    (SELECT NomeBando FROM Bando ORDER BY RecompensaTotalBando DESC LIMIT 1) AS nome_bando,
    (SELECT RecompensaTotalBando FROM Bando ORDER BY RecompensaTotalBando DESC LIMIT 1) AS valor_bando,
    (SELECT p.NomePersonagem FROM Pirata pi JOIN Personagem p ON pi.NomePersonagem = p.NomePersonagem ORDER BY pi.Recompensa DESC LIMIT 1) AS nome_pirata,
    (SELECT Recompensa FROM Pirata ORDER BY Recompensa DESC LIMIT 1) AS valor_pirata";

// ILIKE '%Zoan%' also counts the mythical/ancient/artificial subtypes.
const POPULATION_COUNTS_SQL: &str = "
SELECT
    (SELECT COUNT(*) FROM Pirata) AS qtd_piratas,
    (SELECT COUNT(*) FROM Marinheiro) AS qtd_marinha,
    (SELECT COUNT(*) FROM AkumaNoMi) AS qtd_frutas,
    (SELECT COUNT(*) FROM AkumaNoMi WHERE TipoFruta ILIKE '%Logia%') AS qtd_logia,
    (SELECT COUNT(*) FROM AkumaNoMi WHERE TipoFruta ILIKE '%Zoan%') AS qtd_zoan,
    (SELECT COUNT(*) FROM AkumaNoMi WHERE TipoFruta ILIKE '%Paramecia%') AS qtd_paramecia";

const GEOGRAPHY_SQL: &str = "
SELECT
    (SELECT COUNT(*) FROM Ilha) AS total_ilhas,
    (SELECT COUNT(*) FROM Navio WHERE Navegando = TRUE) AS navios_ativos";

const PIRATE_BOUNTIES_SQL: &str = "
SELECT p.NomePersonagem,
       p.Alcunha,
       pir.Recompensa
FROM Pirata pir
JOIN Personagem p ON pir.NomePersonagem = p.NomePersonagem
ORDER BY pir.Recompensa DESC";

// Casts keep the driver decoding simple: NUMERIC aggregates come back as
// BIGINT or DOUBLE PRECISION.
const BOUNTY_STATS_SQL: &str = "
SELECT COUNT(Recompensa)::BIGINT AS qtd,
       AVG(Recompensa)::DOUBLE PRECISION AS media,
       (PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY Recompensa))::DOUBLE PRECISION AS mediana,
       STDDEV(Recompensa)::DOUBLE PRECISION AS desvio,
       MIN(Recompensa)::BIGINT AS minimo,
       MAX(Recompensa)::BIGINT AS maximo,
       SUM(Recompensa)::BIGINT AS soma
FROM Pirata";

fn options(list: OptionList) -> Statement {
    let (template, sql) = match list {
        OptionList::Species => (
            TemplateId::SpeciesOptions,
            "SELECT DISTINCT NomeEspecie FROM Filiacao_Especie ORDER BY NomeEspecie",
        ),
        OptionList::FruitTypes => (
            TemplateId::FruitTypeOptions,
            "SELECT DISTINCT TipoFruta FROM AkumaNoMi ORDER BY TipoFruta",
        ),
        OptionList::Alliances => (
            TemplateId::AllianceOptions,
            "SELECT DISTINCT NomeAlianca FROM Bando WHERE NomeAlianca IS NOT NULL ORDER BY NomeAlianca",
        ),
        OptionList::PoneglyphTypes => (
            TemplateId::PoneglyphTypeOptions,
            "SELECT DISTINCT TipoPoneglyph FROM Poneglyph ORDER BY TipoPoneglyph",
        ),
        OptionList::Regions => (
            TemplateId::RegionOptions,
            "SELECT DISTINCT NomeArea FROM Area ORDER BY NomeArea",
        ),
    };
    fixed(template, sql)
}
