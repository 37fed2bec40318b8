mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{TestApp, form_request, json_body};
use serde_json::json;

#[tokio::test]
async fn get_post_lists_comments() {
    let app = TestApp::new();
    let post = app.create_post().await;

    for (username, body) in [("alice", "hi"), ("bob", "hello")] {
        let response = app
            .send(form_request(
                &format!("/posts/{}/comments", post.id),
                &format!("comment[username]={username}&comment[body]={body}"),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = app
        .send(
            Request::get(format!("/posts/{}", post.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["title"], "Hello, world");
    assert_eq!(body["comments"][0]["username"], "alice");
    assert_eq!(body["comments"][0]["post_id"], json!(1));
    assert_eq!(body["comments"][1]["body"], "hello");
}

#[tokio::test]
async fn unknown_post_and_route() {
    let app = TestApp::new();

    for uri in ["/posts/1", "/posts/not-a-number", "/nothing/here"] {
        let response = app
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json_body(response).await, json!({"status": 404}));
    }
}
