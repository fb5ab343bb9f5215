//! End-to-end section rendering against the mock store.

use std::sync::Arc;
use std::time::Duration;

use grandline::dashboard::{
    load_options, render_section, FilterState, SectionId, SelectOptions, Tab,
};
use grandline::db::{MockDatabaseClient, Table, Value};
use grandline::present::Presentation;
use grandline::query::Runner;

fn danger_table() -> Table {
    Table::with_data(
        ["nomebando", "nomealianca", "recompensacombinada"],
        vec![vec![
            Value::from("Kaizoku-A"),
            Value::Null,
            Value::Int(4_500_000_000),
        ]],
    )
}

#[tokio::test]
async fn every_section_renders_with_an_empty_store() {
    // Zero rows everywhere: each section must degrade to its neutral
    // message, never an empty table or a crash.
    let runner = Runner::with_default_ttl(Arc::new(MockDatabaseClient::new()));
    let filters = FilterState::default();
    let options = SelectOptions::default();

    for tab in Tab::ALL {
        for &id in tab.sections() {
            let presentation = render_section(&runner, id, &filters, &options)
                .await
                .unwrap();

            assert_eq!(
                presentation,
                Presentation::Empty {
                    message: id.empty_message().to_string()
                },
                "section {id:?} did not render its empty-state message"
            );
        }
    }
}

#[tokio::test]
async fn repeated_renders_inside_the_ttl_hit_the_cache() {
    let mock = Arc::new(MockDatabaseClient::new());
    mock.respond("rank_piratas", danger_table());
    let runner = Runner::with_default_ttl(mock.clone());
    let filters = FilterState::default();
    let options = SelectOptions::default();

    let first = render_section(&runner, SectionId::DangerIndex, &filters, &options)
        .await
        .unwrap();
    let second = render_section(&runner, SectionId::DangerIndex, &filters, &options)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(mock.call_count(), 1, "second render must be served from cache");
}

#[tokio::test]
async fn changing_a_filter_issues_a_new_statement() {
    let mock = Arc::new(MockDatabaseClient::new());
    let runner = Runner::with_default_ttl(mock.clone());
    let options = SelectOptions::default();

    let mut filters = FilterState::default();
    render_section(&runner, SectionId::PiratesByCrewBounty, &filters, &options)
        .await
        .unwrap();

    filters.min_crew_bounty = 4_000_000_000;
    render_section(&runner, SectionId::PiratesByCrewBounty, &filters, &options)
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 2);
    let calls = mock.calls();
    assert_ne!(calls[0].params, calls[1].params);
}

#[tokio::test]
async fn expired_entries_reflect_the_changed_store() {
    let mock = Arc::new(MockDatabaseClient::new());
    mock.respond("rank_piratas", danger_table());
    let runner = Runner::new(mock.clone(), Duration::from_millis(10));
    let filters = FilterState::default();
    let options = SelectOptions::default();

    render_section(&runner, SectionId::DangerIndex, &filters, &options)
        .await
        .unwrap();

    mock.respond(
        "rank_piratas",
        Table::with_data(
            ["nomebando", "nomealianca", "recompensacombinada"],
            vec![vec![
                Value::from("Kaizoku-B"),
                Value::Null,
                Value::Int(1_200_000_000),
            ]],
        ),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    let refreshed = render_section(&runner, SectionId::DangerIndex, &filters, &options)
        .await
        .unwrap();
    let Presentation::Data { table, .. } = refreshed else {
        panic!("expected data");
    };
    assert_eq!(table.rows[0][0], Value::from("Kaizoku-B"));
}

#[tokio::test]
async fn option_loading_and_sections_share_the_runner() {
    let mock = Arc::new(MockDatabaseClient::new());
    mock.respond(
        "FROM Bando",
        Table::with_data(["nomealianca"], vec![vec![Value::from("Grande Frota")]]),
    );
    let runner = Runner::with_default_ttl(mock.clone());

    let options = load_options(&runner).await.unwrap();
    assert_eq!(options.alliances, vec!["Todas", "Grande Frota"]);

    // Loading again is free inside the TTL window.
    let calls_before = mock.call_count();
    load_options(&runner).await.unwrap();
    assert_eq!(mock.call_count(), calls_before);
}
