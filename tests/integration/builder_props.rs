//! Query builder properties across the whole catalog.
//!
//! The unit tests in `query::builder` pin individual templates; these tests
//! check the cross-cutting rules every listing must obey.

use grandline::db::ScalarValue;
use grandline::query::{
    CaptainRanking, Choice, DangerIndex, FruitHolders, OptionList, PiratesByCrewBounty,
    PoneglyphListing, QuerySpec,
};

/// Every spec with its optional filters in the "all" state.
fn all_sentinel_specs() -> Vec<QuerySpec> {
    vec![
        QuerySpec::PiratesByCrewBounty(PiratesByCrewBounty { min_crew_bounty: 0 }),
        QuerySpec::FruitHolders(FruitHolders {
            species: Choice::All,
            fruit_type: Choice::All,
        }),
        QuerySpec::CaptainRanking(CaptainRanking {
            alliance: Choice::All,
        }),
        QuerySpec::DangerIndex(DangerIndex {
            top_n: 3,
            min_combined: 0,
            alliance: Choice::All,
        }),
        QuerySpec::Poneglyphs(PoneglyphListing {
            poneglyph_type: Choice::All,
            region: Choice::All,
        }),
    ]
}

#[test]
fn all_sentinel_specs_bind_only_thresholds() {
    for spec in all_sentinel_specs() {
        let stmt = spec.compile();

        // No text parameter may appear: sentinels never reach the store.
        assert!(
            stmt.params
                .iter()
                .all(|p| matches!(p, ScalarValue::Int(_))),
            "{:?} bound a non-threshold parameter: {:?}",
            stmt.template,
            stmt.params
        );
    }
}

#[test]
fn optional_filters_add_one_placeholder_each() {
    let base = QuerySpec::FruitHolders(FruitHolders {
        species: Choice::All,
        fruit_type: Choice::All,
    })
    .compile();

    let one = QuerySpec::FruitHolders(FruitHolders {
        species: Choice::Only("Mink".to_string()),
        fruit_type: Choice::All,
    })
    .compile();

    let two = QuerySpec::FruitHolders(FruitHolders {
        species: Choice::Only("Mink".to_string()),
        fruit_type: Choice::Only("Logia".to_string()),
    })
    .compile();

    assert_eq!(base.params.len(), 0);
    assert_eq!(one.params.len(), 1);
    assert_eq!(two.params.len(), 2);

    // The filtered statements extend the base, they never rewrite it.
    assert!(one.sql.contains("JOIN AkumaNoMi a ON pf.NomeFruta = a.NomeFruta"));
    assert!(two.sql.contains("JOIN AkumaNoMi a ON pf.NomeFruta = a.NomeFruta"));
}

#[test]
fn placeholders_are_numbered_consecutively() {
    for spec in [
        QuerySpec::DangerIndex(DangerIndex {
            top_n: 5,
            min_combined: 1_000_000_000,
            alliance: Choice::Only("Grande Frota".to_string()),
        }),
        QuerySpec::Poneglyphs(PoneglyphListing {
            poneglyph_type: Choice::Only("Rio".to_string()),
            region: Choice::Only("Grand Line".to_string()),
        }),
    ] {
        let stmt = spec.compile();
        for n in 1..=stmt.params.len() {
            assert!(
                stmt.sql.contains(&format!("${n}")),
                "{:?}: missing placeholder ${n}",
                stmt.template
            );
        }
        assert!(
            !stmt.sql.contains(&format!("${}", stmt.params.len() + 1)),
            "{:?}: dangling placeholder",
            stmt.template
        );
    }
}

#[test]
fn ordering_policies_are_fixed_per_listing() {
    let pirates = QuerySpec::PiratesByCrewBounty(PiratesByCrewBounty { min_crew_bounty: 0 })
        .compile();
    assert!(pirates
        .sql
        .ends_with("ORDER BY b.RecompensaTotalBando DESC, pir.Recompensa DESC"));

    let captains = QuerySpec::CaptainRanking(CaptainRanking {
        alliance: Choice::All,
    })
    .compile();
    assert!(captains.sql.ends_with("ORDER BY b.RecompensaTotalBando DESC"));

    let danger = QuerySpec::DangerIndex(DangerIndex {
        top_n: 3,
        min_combined: 0,
        alliance: Choice::All,
    })
    .compile();
    assert!(danger.sql.ends_with("ORDER BY RecompensaCombinada DESC"));

    let poneglyphs = QuerySpec::Poneglyphs(PoneglyphListing {
        poneglyph_type: Choice::All,
        region: Choice::All,
    })
    .compile();
    assert!(poneglyphs
        .sql
        .ends_with("ORDER BY po.TipoPoneglyph ASC, i.NomeIlha ASC"));
}

#[test]
fn window_predicate_binds_the_user_chosen_n() {
    for n in [1, 3, 20] {
        let stmt = QuerySpec::DangerIndex(DangerIndex {
            top_n: n,
            min_combined: 0,
            alliance: Choice::All,
        })
        .compile();

        assert!(stmt.sql.contains("WHERE rp.rn <= $1"));
        assert_eq!(stmt.params[0], ScalarValue::Int(n));
    }
}

#[test]
fn every_option_list_compiles_without_params() {
    for list in [
        OptionList::Species,
        OptionList::FruitTypes,
        OptionList::Alliances,
        OptionList::PoneglyphTypes,
        OptionList::Regions,
    ] {
        let stmt = QuerySpec::Options(list).compile();
        assert!(stmt.sql.starts_with("SELECT DISTINCT"));
        assert!(stmt.params.is_empty());
    }
}
