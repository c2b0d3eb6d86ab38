use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use axum_extra::extract::cookie::Key;
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use toolboard::config::StoreConfig;
use toolboard::db::{SqliteToolStore, StorageGateway, ToolStore};
use toolboard::server::{ToolboardState, toolboard_router};
use toolboard::service::{RetryPolicy, ToolRepository};
use tower::ServiceExt;

fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "toolboard-route-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));
    temp_path
}

fn remove_db(db_path: &PathBuf) {
    let _ = fs::remove_file(format!("{}-wal", db_path.display()));
    let _ = fs::remove_file(format!("{}-shm", db_path.display()));
    let _ = fs::remove_file(db_path);
}

struct TestApp {
    app: Router,
    store: SqliteToolStore,
    gateway: StorageGateway,
}

async fn spawn_app(db_path: &PathBuf, acquire_timeout_secs: u64) -> TestApp {
    let cfg = StoreConfig {
        acquire_timeout_secs,
        ..StoreConfig::with_database_url(format!("sqlite:{}", db_path.display()))
    };
    let gateway = StorageGateway::new(&cfg).expect("gateway");
    let _ = gateway.ensure_schema().await;

    let store = SqliteToolStore::new(gateway.clone());
    let repository = ToolRepository::new(
        Arc::new(store.clone()),
        RetryPolicy::new(3, Duration::from_millis(5)),
    );
    let state = ToolboardState::new(repository, Key::generate(), true).expect("state");

    TestApp {
        app: toolboard_router(state),
        store,
        gateway,
    }
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn get_index(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

/// `name=value` of the notice cookie set by a response, if any.
fn notice_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("toolboard_notices="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

/// Posts `form`, asserts the redirect, then renders `/` with the notice cookie.
async fn submit_and_follow(app: &Router, form: &str) -> String {
    let resp = app
        .clone()
        .oneshot(post_form(form))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let cookie = notice_cookie(&resp).expect("notice cookie set on redirect");
    let resp = app
        .clone()
        .oneshot(get_index(Some(&cookie)))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    body_string(resp).await
}

#[tokio::test]
async fn empty_index_renders() {
    let db_path = temp_db_path("empty");
    let t = spawn_app(&db_path, 15).await;

    let resp = t
        .app
        .clone()
        .oneshot(get_index(None))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let html = body_string(resp).await;
    assert!(html.contains("No tools yet"));

    t.gateway.close().await;
    remove_db(&db_path);
}

#[tokio::test]
async fn valid_submission_is_saved_and_notice_shown_once() {
    let db_path = temp_db_path("valid");
    let t = spawn_app(&db_path, 15).await;

    let html = submit_and_follow(
        &t.app,
        "tool_name=%20%20Anki%0A%0Aflashcards%20&description=Spaced%20%20repetition&link=%20https%3A%2F%2Fapps.ankiweb.net%20",
    )
    .await;
    assert!(html.contains("Tool added successfully."));
    assert!(html.contains(r#"class="notice success""#));
    assert!(html.contains("Anki flashcards"));

    let tools = t.store.fetch_all().await.unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].tool_name, "Anki flashcards");
    assert_eq!(tools[0].description, "Spaced repetition");
    assert_eq!(tools[0].link, "https://apps.ankiweb.net");

    // The render that showed the notice also cleared it.
    let resp = t
        .app
        .clone()
        .oneshot(post_form(
            "tool_name=Zotero&description=References&link=https%3A%2F%2Fwww.zotero.org",
        ))
        .await
        .expect("request failed");
    let cookie = notice_cookie(&resp).unwrap();
    let resp = t
        .app
        .clone()
        .oneshot(get_index(Some(&cookie)))
        .await
        .expect("request failed");
    let cleared = notice_cookie(&resp).expect("removal cookie");
    assert_eq!(cleared, "toolboard_notices=");

    let resp = t
        .app
        .clone()
        .oneshot(get_index(None))
        .await
        .expect("request failed");
    let html = body_string(resp).await;
    assert!(!html.contains("Tool added successfully."));
    let zotero = html.find("Zotero").unwrap();
    let anki = html.find("Anki flashcards").unwrap();
    assert!(zotero < anki, "newest tool should be listed first");

    t.gateway.close().await;
    remove_db(&db_path);
}

#[tokio::test]
async fn missing_fields_are_rejected_without_insert() {
    let db_path = temp_db_path("missing");
    let t = spawn_app(&db_path, 15).await;

    for form in [
        "tool_name=&description=d&link=https%3A%2F%2Fexample.com",
        "tool_name=n&description=%20%0A%09&link=https%3A%2F%2Fexample.com",
        "tool_name=n&description=d&link=%20%20",
        "tool_name=n&description=d",
        "",
    ] {
        let html = submit_and_follow(&t.app, form).await;
        assert!(html.contains("All fields are required."), "form: {form}");
        assert!(html.contains(r#"class="notice error""#));
    }

    assert!(t.store.fetch_all().await.unwrap().is_empty());

    t.gateway.close().await;
    remove_db(&db_path);
}

#[tokio::test]
async fn invalid_links_are_rejected_without_insert() {
    let db_path = temp_db_path("invalid-link");
    let t = spawn_app(&db_path, 15).await;

    for link in [
        "ftp%3A%2F%2Fexample.com",
        "example.com",
        "http%3A%2F%2F",
        "http%3A%2F%2F%2Fexample.com",
    ] {
        let form = format!("tool_name=n&description=d&link={link}");
        let html = submit_and_follow(&t.app, &form).await;
        assert!(
            html.contains("Invalid link. It must start with http:// or https://"),
            "link: {link}"
        );
    }

    assert!(t.store.fetch_all().await.unwrap().is_empty());

    t.gateway.close().await;
    remove_db(&db_path);
}

#[tokio::test]
async fn unreadable_notice_cookie_is_cleared() {
    let db_path = temp_db_path("stale-cookie");
    let t = spawn_app(&db_path, 15).await;

    let resp = t
        .app
        .clone()
        .oneshot(get_index(Some("toolboard_notices=garbage")))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(notice_cookie(&resp).as_deref(), Some("toolboard_notices="));
    let html = body_string(resp).await;
    assert!(!html.contains(r#"class="notice"#));

    t.gateway.close().await;
    remove_db(&db_path);
}

#[tokio::test]
async fn non_form_body_is_treated_as_empty_submission() {
    let db_path = temp_db_path("non-form");
    let t = spawn_app(&db_path, 15).await;

    let resp = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/add")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"tool_name":"x"}"#))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(notice_cookie(&resp).is_some());
    assert!(t.store.fetch_all().await.unwrap().is_empty());

    t.gateway.close().await;
    remove_db(&db_path);
}

#[tokio::test]
async fn unreachable_store_still_renders_with_notice() {
    let db_path = temp_db_path("unreachable")
        .join("nested")
        .join("tools.sqlite");
    let t = spawn_app(&db_path, 2).await;

    let resp = t
        .app
        .clone()
        .oneshot(get_index(None))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("An error occurred while loading tools. Please try again."));
    assert!(html.contains("No tools yet"));

    // Submissions degrade to a generic failure notice, with no internal detail.
    let html = submit_and_follow(
        &t.app,
        "tool_name=n&description=d&link=https%3A%2F%2Fexample.com",
    )
    .await;
    assert!(html.contains("Could not save the tool right now. Please try again."));
    assert!(!html.to_lowercase().contains("sqlite"));

    t.gateway.close().await;
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let db_path = temp_db_path("404");
    let t = spawn_app(&db_path, 15).await;

    let resp = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    t.gateway.close().await;
    remove_db(&db_path);
}
