//! In-process PostgREST stand-in for the `text_entries` table.
//!
//! Serves `GET`/`POST /rest/v1/text_entries` and `POST /rest/v1/rpc/{function}`
//! the way a Supabase project does, including the 404 error body for a
//! missing relation and the `apikey` check.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

pub const API_KEY: &str = "test-anon-key";
pub const SQL_FUNCTION: &str = "exec_sql";

#[derive(Debug, Default)]
pub struct MockState {
    pub table_exists: bool,
    pub rows: Vec<Value>,
    pub select_calls: usize,
    pub insert_calls: usize,
    pub sql_calls: Vec<String>,
    /// Let the SQL function succeed without creating the table.
    pub sql_is_noop: bool,
    /// Answer table reads with an unknown-role error, as for a bad JWT role.
    pub bad_role: bool,
    /// Refuse inserts with a row-level security violation.
    pub reject_inserts: bool,
    pub last_prefer: Option<String>,
    pub last_query: HashMap<String, String>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub url: String,
    pub state: Shared,
}

impl MockServer {
    pub async fn start(table_exists: bool) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            table_exists,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/rest/v1/text_entries", get(select_rows).post(insert_row))
            .route("/rest/v1/rpc/{function}", post(call_function))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Pre-populate rows with `created_at` one minute apart, oldest first.
    pub fn seed(&self, contents: &[&str]) {
        let mut state = self.state.lock().unwrap();
        for content in contents {
            let row = make_row(&state, content, None);
            state.rows.push(row);
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }
}

fn make_row(state: &MockState, content: &str, ip_address: Option<&str>) -> Value {
    let base = Utc.with_ymd_and_hms(2025, 3, 29, 12, 0, 0).unwrap();
    let created_at = base + Duration::minutes(state.rows.len() as i64);
    json!({
        "id": uuid::Uuid::new_v4(),
        "content": content,
        "created_at": created_at.to_rfc3339(),
        "ip_address": ip_address,
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    let bearer = format!("Bearer {API_KEY}");
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(API_KEY)
        && headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(bearer.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Invalid API key", "hint": "Double check your Supabase `anon` or `service_role` API key."})),
    )
        .into_response()
}

fn missing_relation() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": "42P01",
            "details": null,
            "hint": null,
            "message": "relation \"public.text_entries\" does not exist"
        })),
    )
        .into_response()
}

fn unknown_role() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "code": "22023",
            "details": null,
            "hint": null,
            "message": "role \"authenticated_x\" does not exist"
        })),
    )
        .into_response()
}

fn rls_violation() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "code": "42501",
            "details": null,
            "hint": null,
            "message": "new row violates row-level security policy for table \"text_entries\""
        })),
    )
        .into_response()
}

async fn select_rows(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.select_calls += 1;
    state.last_query = query.clone();
    if state.bad_role {
        return unknown_role();
    }
    if !state.table_exists {
        return missing_relation();
    }

    let mut rows = state.rows.clone();
    if query.get("order").map(String::as_str) == Some("created_at.desc") {
        rows.sort_by(|a, b| b["created_at"].as_str().cmp(&a["created_at"].as_str()));
    }
    if let Some(limit) = query.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        rows.truncate(limit);
    }
    Json(Value::Array(rows)).into_response()
}

async fn insert_row(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.insert_calls += 1;
    state.last_prefer = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if !state.table_exists {
        return missing_relation();
    }
    if state.reject_inserts {
        return rls_violation();
    }

    let Some(content) = body.get("content").and_then(Value::as_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": "23502", "message": "null value in column \"content\" violates not-null constraint"})),
        )
            .into_response();
    };
    let ip = body.get("ip_address").and_then(Value::as_str);
    let row = make_row(&state, content, ip);
    state.rows.push(row.clone());

    let wants_rows = state
        .last_prefer
        .as_deref()
        .is_some_and(|p| p.contains("return=representation"));
    if wants_rows {
        (StatusCode::CREATED, Json(json!([row]))).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn call_function(
    State(state): State<Shared>,
    Path(function): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if function != SQL_FUNCTION {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "code": "PGRST202",
                "message": format!("Could not find the function public.{function}(sql) in the schema cache")
            })),
        )
            .into_response();
    }

    let mut state = state.lock().unwrap();
    let sql = body.get("sql").and_then(Value::as_str).unwrap_or_default().to_string();
    state.sql_calls.push(sql.clone());
    if sql.contains("create table") && !state.sql_is_noop {
        state.table_exists = true;
    }
    // void functions answer with a JSON null
    Json(Value::Null).into_response()
}
