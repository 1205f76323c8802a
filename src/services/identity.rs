use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::StoreConfig;

/// Account metadata returned by the identity provider's admin lookup.
/// Only the audience claim matters here; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid identity provider URL: {0}")]
    InvalidUrl(String),

    #[error("identity provider request failed with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Remote identity provider: resolves a user identifier to its account
/// metadata, including the audience claim.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn fetch_user(&self, user_id: &str) -> Result<AdminUser, IdentityError>;
}

/// GoTrue admin adapter. Lookups go through
/// `{base}/auth/v1/admin/users/{id}` and require the service-role key; this
/// client must never be handed the anon key.
pub struct SupabaseIdentity {
    http: reqwest::Client,
    base_url: Url,
    service_role_key: String,
}

impl SupabaseIdentity {
    pub fn new(store: &StoreConfig) -> Result<Self, IdentityError> {
        let base_url =
            Url::parse(&store.url).map_err(|e| IdentityError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            service_role_key: store.service_role_key.clone(),
        })
    }

    fn user_url(&self, user_id: &str) -> Result<Url, IdentityError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| IdentityError::InvalidUrl("identity URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["auth", "v1", "admin", "users", user_id]);
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn fetch_user(&self, user_id: &str) -> Result<AdminUser, IdentityError> {
        let response = self
            .http
            .get(self.user_url(user_id)?)
            .header("apikey", &self.service_role_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_admin_user_urls() {
        let identity = SupabaseIdentity::new(&StoreConfig {
            url: "https://example.supabase.co".to_string(),
            anon_key: String::new(),
            service_role_key: "service".to_string(),
        })
        .unwrap();

        let url = identity.user_url("abc-123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.supabase.co/auth/v1/admin/users/abc-123"
        );
    }
}
