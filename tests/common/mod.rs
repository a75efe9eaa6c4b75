#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tasking::api::{ACTOR_HEADER, router};
use tasking::clock::{Clock, FixedClock};
use tasking::db;
use tasking::state::AppState;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub clock: Arc<FixedClock>,
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub async fn spawn_app() -> TestApp {
    // one connection, never recycled: each in-memory connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");

    let clock = Arc::new(FixedClock::new(day("2025-03-10")));
    let state = AppState {
        db: pool.clone(),
        clock: clock.clone() as Arc<dyn Clock>,
    };

    TestApp {
        router: router(state),
        pool,
        clock,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        actor: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor) = actor {
            builder = builder.header(ACTOR_HEADER, actor);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    pub async fn sign_up(&self, username: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/users",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "sign up failed: {}", body);
        body["id"].as_str().expect("user id").to_string()
    }

    /// Creates a task and returns the stored tasks (source first).
    pub async fn create_task(&self, user_id: &str, task: Value) -> Vec<Value> {
        let (status, body) = self
            .send(Method::POST, "/tasks", Some(user_id), Some(task))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body.as_array().expect("task list").clone()
    }

    /// Creates and completes a hard task, earning 20 xp and 20 coins.
    pub async fn earn_hard_reward(&self, user_id: &str) -> Value {
        let tasks = self
            .create_task(
                user_id,
                serde_json::json!({ "name": "Deep clean", "date": "2025-03-10", "difficulty": "hard" }),
            )
            .await;
        let id = tasks[0]["id"].as_str().expect("task id").to_string();
        let (status, body) = self
            .send(Method::POST, &format!("/tasks/{}/complete", id), Some(user_id), None)
            .await;
        assert_eq!(status, StatusCode::OK, "complete failed: {}", body);
        body
    }
}
