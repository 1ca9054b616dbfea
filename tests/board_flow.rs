//! Full board lifecycle over the wire: fill the current lane to its cap,
//! complete work to free a slot, and confirm the order sequence keeps
//! counting instead of reusing freed slots.

mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::TestApp;

#[tokio::test]
async fn wip_limit_cycle_end_to_end() {
    let app = TestApp::new();

    // Fill the "customer engagement" lane to its cap of 3.
    let mut ids = Vec::new();
    for n in 0..3 {
        let (status, body) = app
            .post(
                "/api/tasks",
                json!({
                    "title": format!("engagement {n}"),
                    "type": "customer engagement",
                    "status": "current"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"]["order"], json!(n));
        assert!(body["task"]["start_date"].as_str().is_some());
        ids.push(body["task"]["id"].as_str().unwrap().to_string());
    }

    // A fourth is rejected and leaves no trace.
    let (status, body) = app
        .post(
            "/api/tasks",
            json!({
                "title": "one too many",
                "type": "customer engagement",
                "status": "current"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Maximum 3"));

    let (_, listed) = app.get("/api/tasks").await;
    assert_eq!(listed["current"].as_array().unwrap().len(), 3);

    // Completing the first frees a slot.
    let (status, _) = app
        .post(
            &format!("/api/tasks/{}/complete", ids[0]),
            json!({"finish_date": "2024-04-01"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = app.get("/api/tasks").await;
    assert_eq!(listed["current"].as_array().unwrap().len(), 2);
    assert_eq!(listed["historical"].as_array().unwrap().len(), 1);

    // The next current task succeeds and the order sequence continues at 3.
    let (status, body) = app
        .post(
            "/api/tasks",
            json!({
                "title": "engagement 3",
                "type": "customer engagement",
                "status": "current"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["order"], json!(3));
}

#[tokio::test]
async fn backlog_to_done_walkthrough() {
    let app = TestApp::new();

    // Plan a task in the backlog with a checklist.
    let id = app
        .create_task(json!({
            "title": "Ship the quarterly report",
            "type": "content enablements",
            "time_estimate": "1d"
        }))
        .await;
    let (_, body) = app
        .post(&format!("/api/tasks/{id}/subtasks"), json!({"title": "draft"}))
        .await;
    let subtask_id = body["task"]["subtasks"][0]["id"].as_str().unwrap().to_string();

    // Start it.
    let (status, _) = app
        .post(&format!("/api/tasks/{id}/current"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, fetched) = app.get(&format!("/api/tasks/{id}")).await;
    assert_eq!(fetched["task"]["status"], json!("current"));
    assert!(fetched["task"]["start_date"].as_str().is_some());

    // Starting it twice is an invalid transition.
    let (status, body) = app
        .post(&format!("/api/tasks/{id}/current"), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Only backlog tasks can be moved to current")
    );

    // Check off the subtask and finish.
    app.post(
        &format!("/api/tasks/{id}/subtasks/{subtask_id}/toggle"),
        json!({}),
    )
    .await;
    let (status, _) = app
        .post(
            &format!("/api/tasks/{id}/complete"),
            json!({"finish_date": "2024-05-10"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = app.get("/api/tasks").await;
    let historical = listed["historical"].as_array().unwrap();
    assert_eq!(historical.len(), 1);
    assert_eq!(historical[0]["id"], json!(id));
    assert_eq!(historical[0]["subtasks"][0]["completed"], json!(true));
    assert!(listed["current"].as_array().unwrap().is_empty());
    assert!(listed["backlog"].as_array().unwrap().is_empty());
}
