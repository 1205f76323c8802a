use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Discriminator carried in every token. Only `access` tokens authorize API
/// calls; `refresh` tokens exist solely to mint new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    pub fn new(kind: TokenKind, subject: &str, security: &SecurityConfig) -> Self {
        let now = Utc::now();
        let lifetime = match kind {
            TokenKind::Access => Duration::minutes(security.access_token_minutes),
            TokenKind::Refresh => Duration::days(security.refresh_token_days),
        };

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("JWT verification error: {0}")]
    Verification(#[from] jsonwebtoken::errors::Error),

    #[error("token is not an access token")]
    WrongKind,

    #[error("token subject claim is missing")]
    MissingSubject,

    #[error("JWT secret is not configured")]
    MissingSecret,
}

fn algorithm(security: &SecurityConfig) -> Algorithm {
    security.jwt_algorithm.parse().unwrap_or(Algorithm::HS256)
}

/// Sign a new token of the given kind for `subject`. Pure in everything but
/// the clock: no persistence, no revocation list.
pub fn issue_token(
    kind: TokenKind,
    subject: &str,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(kind, subject, security);
    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    let header = Header::new(algorithm(security));

    encode(&header, &claims, &encoding_key).map_err(|e| TokenError::Generation(e.to_string()))
}

/// Decode a token, verifying signature and expiry together. Expiry has no
/// leeway: a token past its `exp` instant is rejected outright.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::new(algorithm(security));
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    Ok(token_data.claims)
}
