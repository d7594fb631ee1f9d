mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use support::*;
use service::character::repository::mock::FailingCharacterStore;
use service::image::storage::mock::MemoryObjectStorage;

fn goku() -> serde_json::Value {
    json!({
        "name": "Goku",
        "age": 30,
        "desc": "Saiyan raised on Earth",
        "image": "https://example.com/goku.png",
        "powerLevel": 9001
    })
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());

    let res = send(&t.app, json_request("POST", "/api/character/create-character", goku())).await;
    assert_status(&res, StatusCode::CREATED);
    let body = body_json(res).await;
    assert_eq!(body, json!({"message": "Person created with ID 1", "method": "POST", "status": true}));

    let res = send(&t.app, empty_request("GET", "/api/character/1")).await;
    assert_status(&res, StatusCode::OK);
    let got = body_json(res).await;
    assert_eq!(got["id"], 1);
    assert_eq!(got["name"], "Goku");
    assert_eq!(got["desc"], "Saiyan raised on Earth");
    assert_eq!(got["powerLevel"], 9001);
}

#[tokio::test]
async fn create_ignores_id_in_body() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let mut body = goku();
    body["id"] = json!(77);
    let res = send(&t.app, json_request("POST", "/api/character/create-character", body)).await;
    assert_status(&res, StatusCode::CREATED);
    assert_eq!(body_json(res).await["message"], "Person created with ID 1");
    assert_eq!(t.store.len(), 1);
}

#[tokio::test]
async fn list_returns_every_character() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let res = send(&t.app, empty_request("GET", "/api/character/list")).await;
    assert_status(&res, StatusCode::OK);
    assert_eq!(body_json(res).await, json!([]));

    for name in ["Goku", "Vegeta"] {
        let res = send(&t.app, json_request("POST", "/api/character/create-character", json!({"name": name}))).await;
        assert_status(&res, StatusCode::CREATED);
    }
    let list = body_json(send(&t.app, empty_request("GET", "/api/character/list")).await).await;
    let names: Vec<_> = list.as_array().unwrap().iter().map(|c| c["name"].as_str().unwrap().to_string()).collect();
    assert_eq!(names, ["Goku", "Vegeta"]);
}

#[tokio::test]
async fn get_unknown_id_is_500_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let res = send(&t.app, empty_request("GET", "/api/character/42")).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(res).await;
    assert_eq!(body["method"], "GET");
    assert_eq!(body["status"], false);
    assert!(body["message"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn update_replaces_fields() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    send(&t.app, json_request("POST", "/api/character/create-character", goku())).await;

    let res = send(
        &t.app,
        json_request("PUT", "/api/character/update-character/1", json!({"name": "Goku SSJ", "powerLevel": 150000000})),
    )
    .await;
    assert_status(&res, StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"message": "Person updated with ID 1", "method": "PUT", "status": true}));

    let got = body_json(send(&t.app, empty_request("GET", "/api/character/1")).await).await;
    assert_eq!(got["name"], "Goku SSJ");
    assert_eq!(got["powerLevel"], 150000000);
    // omitted fields are cleared, not merged
    assert!(got["age"].is_null());
    assert!(got["desc"].is_null());
}

#[tokio::test]
async fn update_keeps_path_id_and_rejects_overflowing_id() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let res = send(&t.app, json_request("POST", "/api/character/create-character", goku())).await;
    assert_eq!(body_json(res).await["message"], "Person created with ID 1");

    let mut moved = goku();
    moved["id"] = json!(5);
    let res = send(&t.app, json_request("PUT", "/api/character/update-character/1", moved)).await;
    assert_status(&res, StatusCode::OK);

    let res = send(&t.app, empty_request("GET", "/api/character/1")).await;
    assert_status(&res, StatusCode::OK);
    assert_eq!(body_json(res).await["id"], 1);
    let res = send(&t.app, empty_request("GET", "/api/character/5")).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);

    let res = send(
        &t.app,
        json_request("PUT", "/api/character/update-character/99999999999999999999", goku()),
    )
    .await;
    assert_status(&res, StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["method"], "PUT");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid input: "));
    assert_eq!(t.store.len(), 1);
}

#[tokio::test]
async fn update_unknown_id_is_bare_500() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let res = send(&t.app, json_request("PUT", "/api/character/update-character/5", goku())).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(res).await.is_empty());
    assert!(t.store.is_empty());
}

#[tokio::test]
async fn update_rejects_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());

    let res = send(&t.app, json_request("PUT", "/api/character/update-character/abc", goku())).await;
    assert_status(&res, StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["status"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid input: "));

    let bad_body = axum::http::Request::builder()
        .method("PUT")
        .uri("/api/character/update-character/1")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let res = send(&t.app, bad_body).await;
    assert_status(&res, StatusCode::BAD_REQUEST);
    assert!(body_json(res).await["message"].as_str().unwrap().starts_with("Invalid input: "));
}

#[tokio::test]
async fn delete_existing_then_missing() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    send(&t.app, json_request("POST", "/api/character/create-character", goku())).await;

    let res = send(&t.app, empty_request("DELETE", "/api/character/delete-character/1")).await;
    assert_status(&res, StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"message": "Person deleted with ID 1", "method": "DELETE", "status": true}));

    let res = send(&t.app, empty_request("DELETE", "/api/character/delete-character/1")).await;
    assert_status(&res, StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["status"], false);
}

#[tokio::test]
async fn delete_unknown_id_message() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let res = send(&t.app, empty_request("DELETE", "/api/character/delete-character/999999")).await;
    assert_status(&res, StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(
        body["message"],
        "Person didnt delete with ID 999999 , because the person does not exist."
    );
    assert_eq!(body["method"], "DELETE");

    let res = send(&t.app, empty_request("DELETE", "/api/character/delete-character/x")).await;
    assert_status(&res, StatusCode::BAD_REQUEST);
    assert!(body_json(res).await["message"].as_str().unwrap().starts_with("Invalid input: "));
}

#[tokio::test]
async fn store_faults_map_to_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(Arc::new(FailingCharacterStore), Arc::new(MemoryObjectStorage::default()), dir.path());

    let res = send(&app, empty_request("GET", "/api/character/list")).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(res).await.is_empty());

    let res = send(&app, empty_request("GET", "/api/character/1")).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await["method"], "GET");

    let res = send(&app, json_request("POST", "/api/character/create-character", goku())).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(res).await;
    assert!(body["message"].as_str().unwrap().starts_with("Error: "));
    assert_eq!(body["status"], false);

    let res = send(&app, json_request("PUT", "/api/character/update-character/1", goku())).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);

    let res = send(&app, empty_request("DELETE", "/api/character/delete-character/1")).await;
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(res).await.is_empty());
}

#[tokio::test]
async fn health_metrics_and_docs() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());

    let res = send(&t.app, empty_request("GET", "/health")).await;
    assert_status(&res, StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"status": "ok"}));

    send(&t.app, empty_request("GET", "/api/character/list")).await;
    let res = send(&t.app, empty_request("GET", "/metrics")).await;
    assert_status(&res, StatusCode::OK);
    let text = String::from_utf8(body_bytes(res).await).unwrap();
    assert!(text.contains("dragonball_character_ops_total"));

    let res = send(&t.app, empty_request("GET", "/api-docs/openapi.json")).await;
    assert_status(&res, StatusCode::OK);
    let doc = body_json(res).await;
    assert!(doc["paths"]["/api/character/create-character"].is_object());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let dir = tempfile::tempdir().unwrap();
    let t = test_app(dir.path());
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/api/character/list")
        .header("origin", "https://frontend.example")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = send(&t.app, req).await;
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("https://frontend.example")
    );
}
