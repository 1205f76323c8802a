#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use fintrack_api_rust::auth::{issue_token, TokenKind};
use fintrack_api_rust::config;
use fintrack_api_rust::services::identity::{AdminUser, IdentityError, IdentityProvider};
use fintrack_api_rust::state::AppState;
use fintrack_api_rust::store::{StoreError, TableStore};

pub const TEST_USER: &str = "8f2b9a6e-1f6e-4f0a-9d3c-2b7f4a5e6c1d";

/// Pin the signing secret before the config singleton is first touched.
pub fn init() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
        let _ = config::config();
    });
}

/// In-memory stand-in for the remote store, mirroring its observable
/// behavior: integer ids assigned on insert, affected rows echoed back on
/// writes, empty row sets for misses.
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tables: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        })
    }

    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables.entry(table.to_string()).or_default();
        for mut row in rows {
            if row.get("id").is_none() {
                row["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
            }
            stored.push(row);
        }
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn insert(&self, table: &str, mut record: Value) -> Result<Vec<Value>, StoreError> {
        record["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut tables = self.tables.lock().unwrap();
        tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(vec![record])
    }

    async fn select_by_id(&self, table: &str, id: i64) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row["id"] == json!(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn select_by_user(&self, table: &str, user_id: Uuid) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row["user_id"] == json!(user_id.to_string()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, table: &str, id: i64, record: Value) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(vec![]);
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| row["id"] == json!(id)) {
            if let (Value::Object(target), Value::Object(patch)) = (&mut *row, &record) {
                for (key, value) in patch {
                    target.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, id: i64) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(vec![]);
        };

        let (removed, kept): (Vec<Value>, Vec<Value>) =
            rows.drain(..).partition(|row| row["id"] == json!(id));
        *rows = kept;
        Ok(removed)
    }
}

/// Identity provider returning a fixed audience, or an error when `aud`
/// is configured as a rejection.
pub struct StaticIdentity {
    pub response: Result<Option<String>, u16>,
}

impl StaticIdentity {
    pub fn authenticated() -> Arc<Self> {
        Arc::new(Self {
            response: Ok(Some("authenticated".to_string())),
        })
    }

    pub fn with_aud(aud: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(aud.map(str::to_string)),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            response: Err(status),
        })
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn fetch_user(&self, user_id: &str) -> Result<AdminUser, IdentityError> {
        match &self.response {
            Ok(aud) => Ok(AdminUser {
                id: Some(user_id.to_string()),
                aud: aud.clone(),
            }),
            Err(status) => Err(IdentityError::Rejected {
                status: *status,
                body: "user not found".to_string(),
            }),
        }
    }
}

pub fn test_app(store: Arc<MemoryStore>) -> Router {
    init();
    fintrack_api_rust::app(AppState {
        store,
        identity: StaticIdentity::authenticated(),
    })
}

pub fn test_app_with_identity(store: Arc<MemoryStore>, identity: Arc<StaticIdentity>) -> Router {
    init();
    fintrack_api_rust::app(AppState { store, identity })
}

pub fn access_token(subject: &str) -> String {
    issue_token(TokenKind::Access, subject, &config::config().security).unwrap()
}

pub fn refresh_token(subject: &str) -> String {
    issue_token(TokenKind::Refresh, subject, &config::config().security).unwrap()
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}
