use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use user_dashboard::{
    CaptureChartSink, CaptureRenderSink, ChartScope, ChartSeries, Dashboard, DashboardConfig,
    ManualClock, RenderCoordinator, SortKey, StaticSource,
};

use crate::support::{users, Harness};

#[test]
fn identical_inputs_render_identical_views() {
    let mut harness = Harness::loaded();
    harness.dashboard.select_category("Rust").unwrap();
    let first = harness.renders.last().unwrap();

    harness.dashboard.recompute().unwrap();
    let second = harness.renders.last().unwrap();

    assert_eq!(first, second);
    assert_eq!(second.cards.len(), 4);
}

#[test]
fn empty_states_follow_active_filters() {
    let mut harness = Harness::loaded();

    harness.dashboard.search_input("nobody");
    harness.dashboard.flush_search().unwrap();
    let view = harness.renders.last().unwrap();
    let empty = view.empty_state.unwrap();
    assert_eq!(empty.title, "No Search Results");
    assert_eq!(
        empty.description,
        "No users found matching \"nobody\". Check your spelling or try different search terms."
    );
    assert!(view.cards.is_empty());

    harness.dashboard.select_category("Go").unwrap();
    let empty = harness.renders.last().unwrap().empty_state.unwrap();
    assert_eq!(empty.title, "No Matching Results");
    assert!(empty.description.contains("in Go"));

    harness.dashboard.reset_filters().unwrap();
    assert!(harness.renders.last().unwrap().empty_state.is_none());
}

#[test]
fn active_filter_button_tracks_category() {
    let mut harness = Harness::loaded();
    harness.dashboard.select_category("Python").unwrap();

    let view = harness.renders.last().unwrap();
    let active: Vec<&str> = view
        .filters
        .iter()
        .filter(|button| button.active)
        .map(|button| button.label.as_str())
        .collect();
    assert_eq!(active, vec!["Python"]);
}

type Drawn = Arc<Mutex<Vec<ChartSeries>>>;

fn charted(scope: ChartScope) -> (Dashboard<ManualClock>, Drawn) {
    charted_with(scope, users())
}

fn charted_with(scope: ChartScope, payload: Value) -> (Dashboard<ManualClock>, Drawn) {
    let config = DashboardConfig {
        chart_scope: scope,
        ..DashboardConfig::default()
    };
    let drawn = Arc::new(Mutex::new(Vec::new()));
    let mut dashboard = Dashboard::with_clock(&config, ManualClock::new());
    dashboard.subscribe(Box::new(
        RenderCoordinator::new(CaptureRenderSink::new())
            .with_charts(Box::new(CaptureChartSink::with_buffer(drawn.clone()))),
    ));
    dashboard.load_from(&StaticSource::new(payload)).unwrap();
    (dashboard, drawn)
}

#[test]
fn collection_charts_draw_once_per_load() {
    let (mut dashboard, drawn) = charted(ChartScope::Collection);
    assert_eq!(drawn.lock().unwrap().len(), 4);

    dashboard.select_category("Go").unwrap();
    dashboard.go_to_page(1).unwrap();
    assert_eq!(drawn.lock().unwrap().len(), 4);

    let ids: Vec<String> = drawn
        .lock()
        .unwrap()
        .iter()
        .map(|series| series.container_id.clone())
        .collect();
    assert_eq!(
        ids,
        vec!["languageChart", "versionChart", "performanceChart", "comparisonChart"]
    );
}

#[test]
fn missing_versions_do_not_force_redraws() {
    let payload = json!([
        { "id": 1, "name": "Ann", "language": "Go", "bio": "", "version": "n/a" },
        { "id": 2, "name": "Bob", "language": "Rust", "bio": "", "version": 3.5 },
    ]);
    let (mut dashboard, drawn) = charted_with(ChartScope::Collection, payload);
    assert_eq!(drawn.lock().unwrap().len(), 4);

    dashboard.select_category("Go").unwrap();
    dashboard.select_sort(SortKey::Version).unwrap();
    assert_eq!(drawn.lock().unwrap().len(), 4);
    assert!(drawn.lock().unwrap()[2].spec.datasets[0].data[0].is_nan());
}

#[test]
fn filtered_charts_follow_criteria() {
    let (mut dashboard, drawn) = charted(ChartScope::Filtered);
    dashboard.select_category("Go").unwrap();

    let drawn = drawn.lock().unwrap();
    assert_eq!(drawn.len(), 8);
    assert_eq!(drawn[4].spec.labels, vec!["Go"]);
    assert_eq!(drawn[4].spec.datasets[0].data, vec![4.0]);
}
