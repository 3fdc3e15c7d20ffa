use hpcc_ui::{
    AppConfig, AppState, MockDatabase, PostgresDatabase,
    config::DbConfig,
    create_router,
    database::{self, DatabaseState},
};
use reqwest::header::COOKIE;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app(db: MockDatabase) -> TestApp {
    spawn_app_with(Arc::new(db) as DatabaseState).await
}

async fn spawn_app_with(db: DatabaseState) -> TestApp {
    let state = AppState {
        db,
        config: AppConfig::default(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

async fn get_home(app: &TestApp, cookie: Option<&str>) -> (reqwest::StatusCode, String, String) {
    let client = reqwest::Client::new();
    let mut request = client.get(&app.address);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    let response = request.send().await.expect("req fail");
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    (status, content_type, response.text().await.unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app(MockDatabase::new()).await;
    let response = reqwest::get(format!("{}/health", app.address))
        .await
        .expect("req fail");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_db_health_ok() {
    let app = spawn_app(MockDatabase::new()).await;
    let response = reqwest::get(format!("{}/health/db", app.address))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_db_health_reports_unavailable() {
    let app = spawn_app(MockDatabase::new_failing()).await;
    let response = reqwest::get(format!("{}/health/db", app.address))
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
    assert_eq!(response.text().await.unwrap(), "database unavailable");
}

#[tokio::test]
async fn test_db_health_unreachable_postgres_is_503() {
    let db_config = DbConfig {
        hostname: "127.0.0.1".to_string(),
        port: 1,
        acquire_timeout: Duration::from_secs(1),
        ..DbConfig::default()
    };
    let db = Arc::new(PostgresDatabase::new(database::lazy_pool(&db_config))) as DatabaseState;
    let app = spawn_app_with(db).await;

    let response = reqwest::get(format!("{}/health/db", app.address))
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
    assert_eq!(response.text().await.unwrap(), "database unavailable");
}

#[tokio::test]
async fn test_home_without_cookie_shows_login_form() {
    let app = spawn_app(MockDatabase::new()).await;
    let (status, content_type, body) = get_home(&app, None).await;

    assert_eq!(status, 200);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("You currently are not logged in."));
    assert!(body.contains(r#"action="/api/login""#));
}

#[tokio::test]
async fn test_home_with_matching_cookie_shows_dashboard() {
    let app = spawn_app(MockDatabase::new()).await;
    let (status, _, body) = get_home(&app, Some("auth=bar")).await;

    assert_eq!(status, 200);
    assert!(body.contains(r#"id="dashboard""#));
    assert!(!body.contains("<form"));
}

#[tokio::test]
async fn test_home_with_wrong_cookie_shows_login_form() {
    let app = spawn_app(MockDatabase::new()).await;
    let (status, _, body) = get_home(&app, Some("auth=baz")).await;

    assert_eq!(status, 200);
    assert!(body.contains("You currently are not logged in."));
}

#[tokio::test]
async fn test_home_does_not_depend_on_database() {
    let app = spawn_app(MockDatabase::new_failing()).await;
    let (status, _, body) = get_home(&app, Some("auth=bar")).await;

    assert_eq!(status, 200);
    assert!(body.contains(r#"id="dashboard""#));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = spawn_app(MockDatabase::new()).await;
    let response = reqwest::get(format!("{}/health", app.address))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_login_endpoint_is_not_served_here() {
    let app = spawn_app(MockDatabase::new()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/login", app.address))
        .form(&[("username", "user"), ("password", "pass")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}
