use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use user_dashboard::{
    CaptureRenderSink, Dashboard, DashboardConfig, ManualClock, RenderCoordinator, StateEvent,
    StateTopic, StaticSource,
};

/// Twelve users over three languages; ids 1 and 13 collide.
pub fn users() -> Value {
    let languages = ["Go", "Rust", "Python"];
    let mut rows: Vec<Value> = (1..=12)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("User {i:02}"),
                "language": languages[(i - 1) % 3],
                "bio": format!("Bio {i}"),
                "version": (i % 6) as f64 + 0.5,
            })
        })
        .collect();
    rows.push(json!({ "id": 1, "name": "Duplicate", "language": "Go", "bio": "", "version": 9 }));
    Value::Array(rows)
}

pub struct Harness {
    pub dashboard: Dashboard<ManualClock>,
    pub clock: ManualClock,
    pub renders: CaptureRenderSink,
    pub topics: Arc<Mutex<Vec<StateTopic>>>,
}

impl Harness {
    pub fn new(config: DashboardConfig) -> Self {
        let clock = ManualClock::new();
        let mut dashboard = Dashboard::with_clock(&config, clock.clone());

        let renders = CaptureRenderSink::new();
        dashboard.subscribe(Box::new(
            RenderCoordinator::new(renders.clone()).with_page_sizes(config.page_size_options),
        ));

        let topics = Arc::new(Mutex::new(Vec::new()));
        let sink = topics.clone();
        dashboard.subscribe(Box::new(move |event: &StateEvent<'_>| {
            sink.lock().unwrap().push(event.topic());
        }));

        Self {
            dashboard,
            clock,
            renders,
            topics,
        }
    }

    /// A harness with the sample users already loaded.
    pub fn loaded() -> Self {
        let mut harness = Self::new(DashboardConfig::default());
        harness
            .dashboard
            .load_from(&StaticSource::new(users()))
            .unwrap();
        harness.topics.lock().unwrap().clear();
        harness
    }

    pub fn topics(&self) -> Vec<StateTopic> {
        self.topics.lock().unwrap().clone()
    }
}
