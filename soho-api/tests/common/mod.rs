#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::CONTENT_TYPE},
};
use headers::{Authorization, HeaderMapExt};
use http_body_util::BodyExt;
use soho_api::server::{ServerState, app};
use soho_common::model::{
    auth::AdminCredentials,
    post::{PartialPost, PostContent},
};
use soho_db::{memory::MemoryStore, store::Store};
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "ccrsh";
pub const ADMIN_PASSWORD: &str = "secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let admin_credentials =
            AdminCredentials::new(ADMIN_USERNAME.to_owned(), ADMIN_PASSWORD.to_owned()).unwrap();

        let router = app(ServerState {
            store: store.clone(),
            admin_credentials: Arc::new(admin_credentials),
        });

        Self { router, store }
    }

    pub async fn create_post(&self) -> PartialPost {
        self.store
            .create_post(&PostContent {
                title: "Hello, world".to_owned(),
                body: "First post".to_owned(),
            })
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn json_request(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete_request(uri: &str, credentials: Option<(&str, &str)>) -> Request<Body> {
    let mut request = Request::delete(uri).body(Body::empty()).unwrap();

    if let Some((username, password)) = credentials {
        request
            .headers_mut()
            .typed_insert(Authorization::basic(username, password));
    }

    request
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
