use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::store::error::StoreError;

/// Table-parameterized operations against the remote entity store, at the
/// raw JSON level. One concrete adapter exists per store technology;
/// handlers and services only ever see this trait behind an `Arc`.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Value>, StoreError>;
    async fn select_by_id(&self, table: &str, id: i64) -> Result<Vec<Value>, StoreError>;
    async fn select_by_user(&self, table: &str, user_id: Uuid) -> Result<Vec<Value>, StoreError>;
    async fn update(&self, table: &str, id: i64, record: Value) -> Result<Vec<Value>, StoreError>;
    async fn delete(&self, table: &str, id: i64) -> Result<Vec<Value>, StoreError>;
}

/// Supabase/PostgREST adapter. All five operations go through
/// `{base}/rest/v1/{table}`; writes ask for `return=representation` so the
/// affected rows come back in the response body.
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(store: &StoreConfig) -> Result<Self, StoreError> {
        let base_url =
            Url::parse(&store.url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: store.anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl("store URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Issue a request and decode the row set, surfacing non-2xx statuses as
    /// [`StoreError::Rejected`] with the store's own error text.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<Value>, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Method::POST, self.table_url(table)?)
            .header("Prefer", "return=representation")
            .json(&record);
        self.execute(request).await
    }

    async fn select_by_id(&self, table: &str, id: i64) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Method::GET, self.table_url(table)?)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        self.execute(request).await
    }

    async fn select_by_user(&self, table: &str, user_id: Uuid) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Method::GET, self.table_url(table)?)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
            ]);
        self.execute(request).await
    }

    async fn update(&self, table: &str, id: i64, record: Value) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Method::PATCH, self.table_url(table)?)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))])
            .json(&record);
        self.execute(request).await
    }

    async fn delete(&self, table: &str, id: i64) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Method::DELETE, self.table_url(table)?)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))]);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PostgrestStore {
        PostgrestStore::new(&StoreConfig {
            url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            service_role_key: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn builds_table_urls() {
        let url = store().table_url("assets").unwrap();
        assert_eq!(url.as_str(), "https://example.supabase.co/rest/v1/assets");
    }

    #[test]
    fn rejects_unparseable_base_urls() {
        let result = PostgrestStore::new(&StoreConfig {
            url: "not a url".to_string(),
            anon_key: String::new(),
            service_role_key: String::new(),
        });
        assert!(matches!(result, Err(StoreError::InvalidUrl(_))));
    }
}
