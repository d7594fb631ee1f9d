#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use tower::Service;
use tower_http::cors::CorsLayer;

use server::{routes, state::ServerState};
use service::character::repository::{mock::InMemoryCharacterStore, CharacterStore};
use service::character::CharacterService;
use service::image::storage::mock::MemoryObjectStorage;
use service::image::{ImageConfig, ImageService};

pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryCharacterStore>,
    pub storage: Arc<MemoryObjectStorage>,
}

pub fn app_with(store: Arc<dyn CharacterStore>, storage: Arc<MemoryObjectStorage>, staging: &Path) -> Router {
    let images = ImageService::new(
        storage,
        ImageConfig { bucket: "test-bucket".into(), staging_dir: staging.to_path_buf(), ..Default::default() },
    );
    let state = ServerState::new(CharacterService::new(store), images);
    routes::build_router(state, CorsLayer::very_permissive())
}

pub fn test_app(staging: &Path) -> TestApp {
    let store = Arc::new(InMemoryCharacterStore::default());
    let storage = Arc::new(MemoryObjectStorage::default());
    let app = app_with(store.clone(), storage.clone(), staging);
    TestApp { app, store, storage }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().call(req).await.unwrap()
}

pub async fn body_bytes(res: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(res).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("not json ({e}): {}", String::from_utf8_lossy(&bytes)))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn assert_status(res: &Response<Body>, expected: StatusCode) {
    assert_eq!(res.status(), expected, "unexpected status for response");
}
