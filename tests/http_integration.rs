use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use notebox::server::{self, request_id::REQUEST_ID_HEADER};
use notebox::shelf::{NoteStore, Shelf};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(tmpdir: &TempDir) -> Router {
    server::router(NoteStore::new(Shelf::open(tmpdir.path()).unwrap()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn write_form(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/write")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(Method::PUT).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn todo_scenario_over_http() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let (status, _) = send(&app, write_form("note_name=todo&note=buy+milk")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/notes/todo")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "buy milk");

    let (status, _) = send(
        &app,
        put("/notes/todo", Some("application/json"), r#"{"item": "bread"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/notes/todo")).await;
    assert_eq!(body, r#"{"item":"bread"}"#);

    let (status, _) = send(&app, delete("/notes/todo")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/notes/todo")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn write_rejects_missing_fields_and_occupied_names() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let (status, body) = send(&app, write_form("note=orphan")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("note_name"));

    let (status, _) = send(&app, write_form("note_name=lonely")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, write_form("note_name=dup&note=one")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, write_form("note_name=dup&note=two")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, get("/notes/dup")).await;
    assert_eq!(body, "one");
}

#[tokio::test]
async fn write_rejects_path_traversal() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let (status, _) = send(&app, write_form("note_name=..%2Fescape&note=x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!tmpdir.path().parent().unwrap().join("escape.txt").exists());
}

#[tokio::test]
async fn overlong_names_are_bad_requests() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);
    let name = "a".repeat(300);

    let (status, _) = send(&app, write_form(&format!("note_name={name}&note=x"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get(&format!("/notes/{name}"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, delete(&format!("/notes/{name}"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn write_rejects_bodies_that_are_not_forms() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/write")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"note_name":"a","note":"b"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid form body"));

    let (status, _) = send(&app, get("/notes/a")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replace_negotiates_content_type() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);
    send(&app, write_form("note_name=memo&note=old")).await;

    let (status, _) = send(&app, put("/notes/memo", Some("application/xml"), "<a/>")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, _) = send(&app, put("/notes/memo", None, "plain")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (_, body) = send(&app, get("/notes/memo")).await;
    assert_eq!(body, "old");

    let (status, _) = send(
        &app,
        put("/notes/memo", Some("text/plain; charset=utf-8"), "  new body\n"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/notes/memo")).await;
    assert_eq!(body, "  new body\n");

    let (status, _) = send(&app, put("/notes/memo", Some("application/json"), "{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn replace_and_delete_missing_note_is_not_found() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let (status, body) = send(&app, put("/notes/ghost", Some("text/plain"), "boo")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("ghost"));

    let (status, _) = send(&app, delete("/notes/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_name_and_text_objects() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let (status, body) = send(&app, get("/notes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));

    send(&app, write_form("note_name=a&note=1")).await;
    send(&app, write_form("note_name=b&note=2")).await;

    let (_, body) = send(&app, get("/notes")).await;
    let mut notes: Vec<Value> = serde_json::from_str(&body).unwrap();
    notes.sort_by_key(|n| n["name"].as_str().unwrap().to_owned());

    assert_eq!(
        notes,
        vec![json!({"name": "a", "text": "1"}), json!({"name": "b", "text": "2"})]
    );
}

#[tokio::test]
async fn upload_form_is_served_with_request_id() {
    let tmpdir = TempDir::new().unwrap();
    let app = app(&tmpdir);

    let response = app.oneshot(get("/UploadForm.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains(r#"action="/write""#));
    assert!(html.contains(r#"name="note_name""#));
}
