#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use server::{web::csrf::CsrfTokens, AppState};

pub const CSRF_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub csrf: CsrfTokens,
    _dir: TempDir,
}

/// Router backed by a freshly migrated SQLite file in a temporary directory.
pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let url = format!("sqlite://{}?mode=rwc", path.to_str().unwrap());
    let db = base::database::open_database(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let csrf = CsrfTokens::new(CSRF_SECRET);
    let router = server::router(AppState {
        db: db.clone(),
        csrf: csrf.clone(),
    });
    TestApp {
        router,
        db,
        csrf,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<axum::body::BoxBody> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.send(request).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    pub async fn form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<axum::body::BoxBody> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> Response<axum::body::BoxBody> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            b => format!("%{:02X}", b),
        })
        .collect()
}

pub async fn read_body(response: Response<axum::body::BoxBody>) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response<axum::body::BoxBody>) -> Value {
    let body = read_body(response).await;
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap()
    }
}
