#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rusqlite::params;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use biolink::config::Config;
use biolink::db;
use biolink::routes;
use biolink::state::AppState;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Fresh database with a bootstrapped admin account.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.database.path = Some(dir.path().join("test.db"));
        config.storage.path = Some(dir.path().join("uploads"));

        let pool = db::create_pool(&config.db_path()).expect("Failed to create test database");
        db::run_migrations(&pool).expect("Failed to run migrations");
        db::bootstrap_admin(&pool, ADMIN_USER, Some(ADMIN_PASSWORD)).unwrap();

        let state = AppState::new(pool, config).unwrap();
        let router = routes::router(state.clone());
        Self { dir, router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, body, headers)
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (status, body, _) = self.send(builder.body(Body::empty()).unwrap()).await;
        (status, body)
    }

    pub async fn get_json(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
        let (status, body) = self.get(uri, cookie).await;
        (status, parse(&body))
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (status, body, _) = self
            .send(builder.body(Body::from(body.to_string())).unwrap())
            .await;
        (status, parse(&body))
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await.0
    }

    /// Log in and return the `name=value` cookie pair.
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "username": username, "password": password }).to_string(),
            ))
            .unwrap();
        let (status, _, headers) = self.send(request).await;
        if status != StatusCode::OK {
            return None;
        }
        headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub async fn admin_cookie(&self) -> String {
        self.login(ADMIN_USER, ADMIN_PASSWORD)
            .await
            .expect("admin login should succeed")
    }

    /// Insert a non-admin account with the given password.
    pub fn add_user(&self, username: &str, password: &str) {
        let hash = bcrypt::hash(password, 4).unwrap();
        self.state
            .db
            .get()
            .unwrap()
            .execute(
                "INSERT INTO users (id, username, password_hash, is_admin) VALUES (?1, ?2, ?3, 0)",
                params![uuid::Uuid::now_v7().to_string(), username, hash],
            )
            .unwrap();
    }
}

fn parse(body: &[u8]) -> Value {
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body).unwrap_or(Value::Null)
    }
}
