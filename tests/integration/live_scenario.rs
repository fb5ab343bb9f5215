//! Live database scenario tests.
//!
//! These run against a real PostgreSQL endpoint and are skipped unless
//! DATABASE_URL is set. The seed fixture creates the world schema with the
//! "Kaizoku-A" crew: total bounty 5e9, member bounties [3e9, 1.5e9, 0.4e9,
//! 0.1e9].

use std::sync::Arc;
use std::time::Duration;

use grandline::dashboard::labels::column_labels;
use grandline::dashboard::{load_world_stats, SectionId};
use grandline::db::{PostgresClient, Value};
use grandline::present::{present, Presentation};
use grandline::query::{
    CaptainRanking, Choice, DangerIndex, FruitHolders, PiratesByCrewBounty, PoneglyphListing,
    QuerySpec, Runner,
};
use grandline::stats::describe;

/// The seed drops and recreates the schema, so live tests take turns.
static LIVE_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

async fn seeded_runner() -> Option<Runner> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .ok()?;

    sqlx::raw_sql(include_str!("../fixtures/seed.sql"))
        .execute(&pool)
        .await
        .expect("seed fixture applies cleanly");

    let client = PostgresClient::from_pool(pool);
    Some(Runner::new(Arc::new(client), Duration::from_secs(600)))
}

fn pirates_spec(threshold: i64) -> QuerySpec {
    QuerySpec::PiratesByCrewBounty(PiratesByCrewBounty {
        min_crew_bounty: threshold,
    })
}

fn danger_spec(top_n: i64) -> QuerySpec {
    QuerySpec::DangerIndex(DangerIndex {
        top_n,
        min_combined: 0,
        alliance: Choice::All,
    })
}

#[tokio::test]
async fn live_kaizoku_scenario() {
    let _guard = LIVE_LOCK.lock().await;
    let Some(runner) = seeded_runner().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    // Threshold 4e9 keeps exactly the Kaizoku-A crew, ordered by crew
    // total bounty then individual bounty.
    let table = runner.run(&pirates_spec(4_000_000_000)).await.unwrap();
    assert_eq!(table.row_count(), 4);
    let crew_idx = table.column_index("nomebando").unwrap();
    assert!(table
        .rows
        .iter()
        .all(|row| row[crew_idx] == Value::from("Kaizoku-A")));
    assert_eq!(table.rows[0][0], Value::from("Capitao A"));
    assert_eq!(table.rows[3][0], Value::from("Tripulante A2"));

    // Threshold 6e9 matches nothing; the section renders its neutral
    // message.
    let empty = runner.run(&pirates_spec(6_000_000_000)).await.unwrap();
    assert!(empty.is_empty());
    let presentation = present(
        empty,
        &column_labels(),
        None,
        SectionId::PiratesByCrewBounty.empty_message(),
    )
    .unwrap();
    assert!(matches!(presentation, Presentation::Empty { .. }));

    // Result sizes shrink monotonically as the threshold rises.
    let mut previous = usize::MAX;
    for threshold in [0, 1_200_000_000, 4_000_000_000, 6_000_000_000] {
        let rows = runner
            .run(&pirates_spec(threshold))
            .await
            .unwrap()
            .row_count();
        assert!(rows <= previous, "threshold {threshold} grew the result");
        previous = rows;
    }

    runner.close().await.unwrap();
}

#[tokio::test]
async fn live_danger_index_window() {
    let _guard = LIVE_LOCK.lock().await;
    let Some(runner) = seeded_runner().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    // N=2 sums the two highest bounties per crew: 3e9 + 1.5e9 for
    // Kaizoku-A.
    let table = runner.run(&danger_spec(2)).await.unwrap();
    assert_eq!(table.rows[0][0], Value::from("Kaizoku-A"));
    assert_eq!(table.rows[0][2], Value::Int(4_500_000_000));
    assert_eq!(table.rows[1][0], Value::from("Kaizoku-B"));
    assert_eq!(table.rows[1][2], Value::Int(1_200_000_000));

    // N larger than the roster includes min(N, m) members: the whole crew.
    let table = runner.run(&danger_spec(10)).await.unwrap();
    assert_eq!(table.rows[0][2], Value::Int(5_000_000_000));

    // The minimum-sum threshold filters whole crews.
    let table = runner
        .run(&QuerySpec::DangerIndex(DangerIndex {
            top_n: 2,
            min_combined: 2_000_000_000,
            alliance: Choice::All,
        }))
        .await
        .unwrap();
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows[0][0], Value::from("Kaizoku-A"));

    runner.close().await.unwrap();
}

#[tokio::test]
async fn live_filtered_listings() {
    let _guard = LIVE_LOCK.lock().await;
    let Some(runner) = seeded_runner().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    // Captains: ranked by crew total bounty; the alliance filter narrows
    // to its member crews.
    let captains = runner
        .run(&QuerySpec::CaptainRanking(CaptainRanking {
            alliance: Choice::All,
        }))
        .await
        .unwrap();
    assert_eq!(captains.row_count(), 2);
    assert_eq!(captains.rows[0][0], Value::from("Capitao A"));

    let allied = runner
        .run(&QuerySpec::CaptainRanking(CaptainRanking {
            alliance: Choice::Only("Grande Frota".to_string()),
        }))
        .await
        .unwrap();
    assert_eq!(allied.row_count(), 1);
    assert_eq!(allied.rows[0][0], Value::from("Capitao B"));

    // Fruit holders: species and fruit-type filters compose.
    let minks = runner
        .run(&QuerySpec::FruitHolders(FruitHolders {
            species: Choice::Only("Mink".to_string()),
            fruit_type: Choice::All,
        }))
        .await
        .unwrap();
    assert_eq!(minks.row_count(), 1);
    assert_eq!(minks.rows[0][0], Value::from("Imediato A"));

    // Poneglyphs: ordered by type then island; region filter applies.
    let poneglyphs = runner
        .run(&QuerySpec::Poneglyphs(PoneglyphListing {
            poneglyph_type: Choice::All,
            region: Choice::All,
        }))
        .await
        .unwrap();
    assert_eq!(poneglyphs.rows[0][0], Value::from("Historico"));
    assert_eq!(poneglyphs.rows[1][0], Value::from("Rio"));

    let grand_line = runner
        .run(&QuerySpec::Poneglyphs(PoneglyphListing {
            poneglyph_type: Choice::All,
            region: Choice::Only("Grand Line".to_string()),
        }))
        .await
        .unwrap();
    assert_eq!(grand_line.row_count(), 1);
    assert_eq!(grand_line.rows[0][2], Value::from("Zou"));

    runner.close().await.unwrap();
}

#[tokio::test]
async fn live_sql_and_client_stats_agree() {
    let _guard = LIVE_LOCK.lock().await;
    let Some(runner) = seeded_runner().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let in_sql = runner.run(&QuerySpec::BountyStatsInSql).await.unwrap();
    let bounties = runner.run(&QuerySpec::PirateBounties).await.unwrap();
    let column = bounties.numeric_column("recompensa").unwrap();
    let client_side = describe(&column).unwrap();

    let sql_value = |name: &str| -> f64 {
        let idx = in_sql.column_index(name).unwrap();
        in_sql.rows[0][idx].as_f64().unwrap()
    };

    let close = |a: f64, b: f64| (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0);

    assert_eq!(sql_value("qtd") as usize, client_side.count);
    assert!(close(sql_value("media"), client_side.mean));
    assert!(close(sql_value("mediana"), client_side.median));
    assert!(close(sql_value("desvio"), client_side.std_dev.unwrap()));
    assert!(close(sql_value("minimo"), client_side.min));
    assert!(close(sql_value("maximo"), client_side.max));
    assert!(close(sql_value("soma"), client_side.sum));

    runner.close().await.unwrap();
}

#[tokio::test]
async fn live_world_stats() {
    let _guard = LIVE_LOCK.lock().await;
    let Some(runner) = seeded_runner().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let stats = load_world_stats(&runner).await.unwrap();

    assert_eq!(
        stats.top_crew,
        Some(("Kaizoku-A".to_string(), 5_000_000_000))
    );
    assert_eq!(
        stats.top_pirate,
        Some(("Capitao A".to_string(), 3_000_000_000))
    );
    assert_eq!(stats.pirates, 6);
    assert_eq!(stats.marines, 1);
    assert_eq!(stats.fruits, 3);
    assert_eq!(stats.paramecia, 1);
    // "Zoan Ancestral" still counts as Zoan via the substring match.
    assert_eq!(stats.zoan, 1);
    assert_eq!(stats.logia, 1);
    assert_eq!(stats.islands, 2);
    assert_eq!(stats.ships_at_sea, 1);

    runner.close().await.unwrap();
}
