#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use prompt_curator_http::{AppState, serve};
use prompt_curator_service::PromptService;
use prompt_curator_storage::SqliteStorage;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Starts a server on an ephemeral port backed by in-memory SQLite.
async fn spawn_app() -> String {
    let storage = SqliteStorage::in_memory().await.unwrap();
    let state = Arc::new(AppState::new(PromptService::new(Arc::new(storage))));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, state, std::future::pending()));
    format!("http://{addr}")
}

async fn mutate(base: &str, procedure: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/rpc/{procedure}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    (resp.status().as_u16(), resp.json().await.unwrap())
}

async fn query(base: &str, procedure: &str, input: Option<Value>) -> (u16, Value) {
    let mut req = reqwest::Client::new().get(format!("{base}/rpc/{procedure}"));
    if let Some(input) = input {
        req = req.query(&[("input", input.to_string())]);
    }
    let resp = req.send().await.unwrap();
    (resp.status().as_u16(), resp.json().await.unwrap())
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let base = spawn_app().await;
    let (status, body) = query(&base, "healthcheck", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["data"]["status"], "ok");
    assert!(body["result"]["data"]["timestamp"].is_string());

    let plain = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
    assert_eq!(plain, "ok");
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let base = spawn_app().await;

    let (status, body) = mutate(
        &base,
        "createPrompt",
        json!({"text": "A red fox", "description": null, "tags": ["animal", "red"]}),
    )
    .await;
    assert_eq!(status, 200);
    let created = &body["result"]["data"];
    assert_eq!(created["text"], "A red fox");
    assert_eq!(created["description"], Value::Null);
    assert_eq!(created["tags"], json!(["animal", "red"]));
    assert_eq!(created["created_at"], created["updated_at"]);
    let id = created["id"].as_i64().unwrap();

    let (_, body) = query(&base, "getPrompt", Some(json!({"id": id}))).await;
    assert_eq!(body["result"]["data"]["id"], id);

    let (_, body) = query(&base, "getPrompts", None).await;
    assert_eq!(body["result"]["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_text_is_rejected_before_storage() {
    let base = spawn_app().await;

    let (status, body) =
        mutate(&base, "createPrompt", json!({"text": "", "description": null})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["procedure"], "createPrompt");

    let (_, body) = query(&base, "getPrompts", None).await;
    assert_eq!(body["result"]["data"], json!([]));
}

#[tokio::test]
async fn missing_description_key_is_rejected() {
    let base = spawn_app().await;
    let (status, body) = mutate(&base, "createPrompt", json!({"text": "x"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_targets_return_absent_markers() {
    let base = spawn_app().await;

    let (status, body) = query(&base, "getPrompt", Some(json!({"id": 999}))).await;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["data"], Value::Null);

    let (_, body) = mutate(&base, "updatePrompt", json!({"id": 999, "text": "y"})).await;
    assert_eq!(body["result"]["data"], Value::Null);

    let (_, body) = mutate(&base, "deletePrompt", json!({"id": 999})).await;
    assert_eq!(body["result"]["data"], false);
}

#[tokio::test]
async fn update_clears_description_and_keeps_other_fields() {
    let base = spawn_app().await;
    let (_, body) = mutate(
        &base,
        "createPrompt",
        json!({"text": "Misty forest", "description": "dawn", "tags": ["nature"]}),
    )
    .await;
    let id = body["result"]["data"]["id"].as_i64().unwrap();

    let (status, body) =
        mutate(&base, "updatePrompt", json!({"id": id, "description": null})).await;
    assert_eq!(status, 200);
    let updated = &body["result"]["data"];
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["text"], "Misty forest");
    assert_eq!(updated["tags"], json!(["nature"]));

    let (_, body) = mutate(&base, "deletePrompt", json!({"id": id})).await;
    assert_eq!(body["result"]["data"], true);
    let (_, body) = mutate(&base, "deletePrompt", json!({"id": id})).await;
    assert_eq!(body["result"]["data"], false);
}

#[tokio::test]
async fn unknown_procedure_and_wrong_method() {
    let base = spawn_app().await;

    let (status, body) = query(&base, "listEverything", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["procedure"], "listEverything");

    let (status, body) = mutate(&base, "getPrompts", json!({})).await;
    assert_eq!(status, 405);
    assert_eq!(body["error"]["code"], "METHOD_NOT_SUPPORTED");

    let (status, _) = query(&base, "createPrompt", None).await;
    assert_eq!(status, 405);
}

#[tokio::test]
async fn rejected_query_string_gets_error_envelope() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/rpc/getPrompt?input=%7B%22id%22%3A1%7D&input=x"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["procedure"], "getPrompt");
}
