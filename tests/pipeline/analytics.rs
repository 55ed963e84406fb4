use std::sync::{Arc, Mutex};

use user_dashboard::{
    AnalyticsCollector, AnalyticsConfig, AnalyticsEvent, AnalyticsObserver, BufferSink,
    Dashboard, DashboardConfig, DataSourceError, ManualClock, StaticSource,
};

use crate::support::users;

#[test]
fn dashboard_activity_is_tracked_in_batches() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let config = DashboardConfig {
        analytics: AnalyticsConfig {
            batch_size: 3,
            ..AnalyticsConfig::default()
        },
        ..DashboardConfig::default()
    };
    let collector = AnalyticsCollector::with_clock(
        BufferSink::with_buffer(sent.clone()),
        config.analytics.clone(),
        ManualClock::new(),
    )
    .with_user_id("user-42");

    let mut dashboard = Dashboard::with_clock(&config, ManualClock::new());
    dashboard.subscribe(Box::new(AnalyticsObserver::new(collector)));

    dashboard.load_from(&StaticSource::new(users())).unwrap();
    dashboard.select_category("Go").unwrap();
    let _ = dashboard.load_from(&StaticSource::failing(DataSourceError::Status(503)));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let batch = &sent[0];
    assert_eq!(batch.user_id, "user-42");
    assert!(matches!(
        &batch.events[0],
        AnalyticsEvent::Custom { event_name, .. } if event_name == "collection_loaded"
    ));
    assert!(matches!(
        &batch.events[1],
        AnalyticsEvent::UserInteraction { action, .. } if action == "filter"
    ));
    assert_eq!(batch.events[2].properties()["message"], "HTTP error! status: 503");
}

#[test]
fn rejected_and_clamped_changes_track_what_took_effect() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let config = DashboardConfig {
        analytics: AnalyticsConfig {
            batch_size: 3,
            ..AnalyticsConfig::default()
        },
        ..DashboardConfig::default()
    };
    let collector = AnalyticsCollector::with_clock(
        BufferSink::with_buffer(sent.clone()),
        config.analytics.clone(),
        ManualClock::new(),
    );

    let mut dashboard = Dashboard::with_clock(&config, ManualClock::new());
    dashboard.subscribe(Box::new(AnalyticsObserver::new(collector)));
    dashboard.load_from(&StaticSource::new(users())).unwrap();

    assert!(dashboard.set_page_size(0).is_err());
    dashboard.go_to_page(99).unwrap();
    dashboard.set_page_size(5).unwrap();
    dashboard.go_to_page(99).unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let events = &sent[0].events;
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[1],
        AnalyticsEvent::UserInteraction { action, .. } if action == "page_size"
    ));
    assert_eq!(events[1].properties()["pageSize"], 5);
    assert!(matches!(
        &events[2],
        AnalyticsEvent::UserInteraction { action, .. } if action == "paginate"
    ));
    assert_eq!(events[2].properties()["page"], 3);
}
