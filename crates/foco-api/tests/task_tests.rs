use axum::http::StatusCode;
use chrono::{Days, NaiveDate};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::{TestClient, TestStateBuilder, db, test_data};

fn task_body(subject_id: Uuid, title: &str, due_date: NaiveDate, minutes: u32) -> Value {
    json!({
        "subject_id": subject_id,
        "title": title,
        "description": "Capítulo 3",
        "due_date": due_date,
        "duration_minutes": minutes,
    })
}

#[tokio::test]
async fn test_task_board_listing_and_filters() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let user_id = Uuid::new_v4();
    let client = TestClient::authenticated(&state, user_id);
    let today = state.today();

    let math = test_data::create_subject(&client, "Matemática").await;
    let history = test_data::create_subject(&client, "História").await;

    let later = today.checked_add_days(Days::new(3)).unwrap();
    let earlier = today.checked_sub_days(Days::new(2)).unwrap();

    client
        .post_json("/v1/tasks", &task_body(math, "Exercícios de função", later, 60))
        .await
        .assert_status(StatusCode::CREATED);
    let response = client
        .post_json("/v1/tasks", &task_body(history, "Revolução Francesa", earlier, 45))
        .await;
    response.assert_status(StatusCode::CREATED);
    let overdue: Value = response.json();
    assert_eq!(overdue["status"], "pending");
    assert_eq!(overdue["overdue"], true);

    // Ordered by due date
    let list: Vec<Value> = client.get("/v1/tasks").await.json();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "Revolução Francesa");
    assert_eq!(list[1]["title"], "Exercícios de função");
    assert_eq!(list[1]["overdue"], false);

    // Case and accent insensitive search
    let found: Vec<Value> = client.get("/v1/tasks?search=REVOLUCAO").await.json();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Revolução Francesa");

    let by_subject: Vec<Value> = client
        .get(&format!("/v1/tasks?subject_id={math}"))
        .await
        .json();
    assert_eq!(by_subject.len(), 1);
    assert_eq!(by_subject[0]["title"], "Exercícios de função");

    let done: Vec<Value> = client.get("/v1/tasks?status=done").await.json();
    assert!(done.is_empty());

    db::cleanup_user(&state.pool, user_id)
        .await
        .expect("Failed to cleanup database");
}

#[tokio::test]
async fn test_completion_stamp_follows_status() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let user_id = Uuid::new_v4();
    let client = TestClient::authenticated(&state, user_id);
    let yesterday = state.today().checked_sub_days(Days::new(1)).unwrap();

    let subject_id = test_data::create_subject(&client, "Química").await;
    let created: Value = client
        .post_json("/v1/tasks", &task_body(subject_id, "Estequiometria", yesterday, 30))
        .await
        .json();
    let task_id = test_data::id_of(&created);
    assert!(created["completed_at"].is_null());

    let uri = format!("/v1/tasks/{task_id}");

    let done: Value = client.patch_json(&uri, &json!({ "status": "done" })).await.json();
    assert_eq!(done["status"], "done");
    assert!(done["completed_at"].is_string());
    assert_eq!(done["overdue"], false);

    let reopened: Value = client
        .patch_json(&uri, &json!({ "status": "in_progress" }))
        .await
        .json();
    assert_eq!(reopened["status"], "in_progress");
    assert!(reopened["completed_at"].is_null());
    assert_eq!(reopened["overdue"], true);

    client.delete(&uri).await.assert_status(StatusCode::NO_CONTENT);
    client.get(&uri).await.assert_status(StatusCode::NOT_FOUND);

    db::cleanup_user(&state.pool, user_id)
        .await
        .expect("Failed to cleanup database");
}

#[tokio::test]
async fn test_task_validation() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let user_id = Uuid::new_v4();
    let client = TestClient::authenticated(&state, user_id);
    let today = state.today();

    let subject_id = test_data::create_subject(&client, "Biologia").await;

    client
        .post_json("/v1/tasks", &task_body(subject_id, "Genética", today, 0))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    client
        .post_json("/v1/tasks", &task_body(subject_id, "Genética", today, 1441))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    client
        .post_json("/v1/tasks", &task_body(subject_id, "", today, 30))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Unknown subject
    client
        .post_json("/v1/tasks", &task_body(Uuid::new_v4(), "Genética", today, 30))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let list: Vec<Value> = client.get("/v1/tasks").await.json();
    assert!(list.is_empty());

    db::cleanup_user(&state.pool, user_id)
        .await
        .expect("Failed to cleanup database");
}
