#![cfg(feature = "fetch")]

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use user_dashboard::{
    CycleOutcome, Dashboard, DashboardConfig, DataSource, DataSourceError, HttpSource, ManualClock,
};

/// Serve `app` from its own runtime thread so the blocking client can call it.
fn serve(app: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{addr}")
}

fn feed() -> String {
    serve(
        Router::new()
            .route(
                "/users.json",
                get(|| async {
                    Json(json!([
                        { "id": 1, "name": "Ann", "language": "Go", "bio": "", "version": 2.5 },
                        { "id": 2, "name": "Bob", "language": "Rust", "bio": "", "version": 4 },
                    ]))
                }),
            )
            .route(
                "/busy.json",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
            )
            .route("/page.json", get(|| async { "<html>" }))
            .route("/object.json", get(|| async { Json(json!({ "users": [] })) })),
    )
}

#[test]
fn error_statuses_and_bodies_map_to_source_errors() {
    let base = feed();
    let fetch = |path: &str| HttpSource::new(format!("{base}{path}")).unwrap().fetch();

    assert_eq!(fetch("/busy.json"), Err(DataSourceError::Status(503)));
    assert!(matches!(
        fetch("/page.json"),
        Err(DataSourceError::Malformed(_))
    ));
    assert_eq!(fetch("/object.json"), Err(DataSourceError::NotAnArray));
    assert_eq!(fetch("/missing.json"), Err(DataSourceError::Status(404)));
}

#[test]
fn dashboard_loads_over_http() {
    let base = feed();
    let mut dashboard = Dashboard::with_clock(&DashboardConfig::default(), ManualClock::new());

    let source = HttpSource::new(format!("{base}/users.json")).unwrap();
    assert_eq!(
        dashboard.load_from(&source).unwrap(),
        CycleOutcome::Applied { count: 2 }
    );
    assert_eq!(dashboard.views().unwrap().stats.total_languages, 2);

    let busy = HttpSource::new(format!("{base}/busy.json")).unwrap();
    let err = dashboard.load_from(&busy).unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 503");
    assert_eq!(dashboard.store().len(), 2);
}
