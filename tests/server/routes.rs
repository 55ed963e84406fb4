use serde_json::{json, Value};
use user_dashboard::server::Inbox;

use crate::support::{site, start_server};

#[tokio::test]
async fn health_check() {
    let base = start_server(&site("health"), Inbox::default()).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn assets_are_cached_for_a_year() {
    let base = start_server(&site("assets"), Inbox::default()).await;
    let resp = reqwest::get(format!("{base}/assets/app.js")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(headers["cache-control"], "public, max-age=31536000");
    assert_eq!(headers["vary"], "Accept-Encoding");
    assert_eq!(resp.text().await.unwrap(), "console.log('hi')");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let base = start_server(&site("spa"), Inbox::default()).await;

    for path in ["/", "/users/42", "/assets/missing.css"] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.status(), 200, "{path}");
        assert_eq!(resp.headers()["cache-control"], "public, max-age=3600");
        assert_eq!(resp.text().await.unwrap(), "<html>dashboard</html>");
    }
}

#[tokio::test]
async fn robots_is_plain_text_for_a_day() {
    let base = start_server(&site("robots"), Inbox::default()).await;
    let resp = reqwest::get(format!("{base}/robots.txt")).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["cache-control"], "public, max-age=86400");
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn analytics_batches_land_in_the_inbox() {
    let inbox = Inbox::default();
    let base = start_server(&site("track"), inbox.clone()).await;

    let batch = json!({
        "events": [
            { "type": "page_view", "page": "/", "timestamp": 1, "properties": {} },
            { "type": "custom", "eventName": "user_returned", "timestamp": 2 }
        ],
        "sessionId": "id_s",
        "userId": "id_u",
        "timestamp": 3
    });
    let resp = reqwest::Client::new()
        .post(format!("{base}/analytics/track"))
        .json(&batch)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "accepted": 2 }));

    let inbox = inbox.lock().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].session_id, "id_s");
}
