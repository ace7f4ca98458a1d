//! Bearer-token authentication boundary
//!
//! Verifies JWTs issued by the OIDC provider against its JWKS endpoint and
//! extracts the caller's identity. Token verification is a boundary concern:
//! the gateway trusts the provider's signature and claims and does no
//! authorization of its own beyond forwarding the username to the backends.

use axum::{
    Json, RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{TypedHeader, typed_header::TypedHeaderRejectionReason};
use chrono::{DateTime, Duration, Utc};
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{
    Algorithm, DecodingKey, Validation, decode, decode_header,
    jwk::{AlgorithmParameters, JwkSet},
};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token missing 'kid' header")]
    TokenMissingKid,

    #[error("No matching key found in JWKS")]
    NoMatchingKey,

    #[error("Unsupported algorithm")]
    UnsupportedAlgorithm,

    #[error("JWKS fetch error: {0}")]
    JwksFetchError(String),
}

impl AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::JwksFetchError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Authentication failure: {}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Claims the gateway reads from a verified token.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated caller, as extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Username with the configured suffix stripped
    pub username: String,
    /// Email claim, when the token carries one
    pub email: Option<String>,
}

#[derive(Clone)]
struct CachedJwks {
    jwks: JwkSet,
    expires_at: DateTime<Utc>,
}

/// Verifies bearer tokens against the provider's JWKS.
///
/// The key set is fetched lazily and cached for an hour; a key rotation
/// shows up on the next fetch after expiry.
pub struct TokenVerifier {
    jwks_url: String,
    issuer: Option<String>,
    user_suffix: String,
    cache: RwLock<Option<CachedJwks>>,
    cache_duration: Duration,
    client: reqwest::Client,
}

impl TokenVerifier {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            jwks_url: config.jwks_url.clone(),
            issuer: config.jwt_issuer.clone(),
            user_suffix: config.user_suffix.clone(),
            cache: RwLock::new(None),
            cache_duration: Duration::hours(1),
            client,
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::JwksFetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::JwksFetchError(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::JwksFetchError(e.to_string()))
    }

    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        let cache_read = self.cache.read().await;
        if let Some(cached) = &*cache_read
            && cached.expires_at > Utc::now()
        {
            return Ok(cached.jwks.clone());
        }
        drop(cache_read);

        let mut cache_write = self.cache.write().await;
        if let Some(cached) = &*cache_write
            && cached.expires_at > Utc::now()
        {
            return Ok(cached.jwks.clone());
        }

        let jwks = self.fetch_jwks().await?;
        *cache_write = Some(CachedJwks {
            jwks: jwks.clone(),
            expires_at: Utc::now() + self.cache_duration,
        });

        Ok(jwks)
    }

    /// Verify a bearer token and extract the caller's identity.
    pub async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header.kid.ok_or(AuthError::TokenMissingKid)?;

        let jwks = self.get_jwks().await?;
        let jwk = jwks.find(&kid).ok_or(AuthError::NoMatchingKey)?;

        let decoding_key = match &jwk.algorithm {
            AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            _ => return Err(AuthError::UnsupportedAlgorithm),
        };

        let mut validation = Validation::new(Algorithm::RS256);
        // Audience varies across the provider's clients; identity comes from
        // the subject and username claims.
        validation.validate_aud = false;
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let claims = data.claims;
        let raw_username = claims
            .preferred_username
            .unwrap_or_else(|| claims.sub.clone());

        Ok(AuthUser {
            username: strip_user_suffix(&raw_username, &self.user_suffix),
            email: claims.email,
        })
    }
}

/// Remove the configured suffix from a username if present.
pub fn strip_user_suffix(username: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return username.to_string();
    }
    username
        .strip_suffix(suffix)
        .unwrap_or(username)
        .to_string()
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|err| match err.reason() {
                TypedHeaderRejectionReason::Missing => AuthError::MissingAuthHeader,
                _ => AuthError::InvalidAuthHeaderFormat,
            })?;

        state.verifier.verify(bearer.token()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_user_suffix() {
        assert_eq!(strip_user_suffix("alice@example.org", "@example.org"), "alice");
        assert_eq!(strip_user_suffix("alice", "@example.org"), "alice");
        assert_eq!(strip_user_suffix("alice@other.org", "@example.org"), "alice@other.org");
        assert_eq!(strip_user_suffix("alice@example.org", ""), "alice@example.org");
    }

    #[test]
    fn test_claims_tolerate_missing_optional_fields() {
        let claims: Claims = serde_json::from_str(r#"{"sub": "u-123"}"#).unwrap();
        assert_eq!(claims.sub, "u-123");
        assert!(claims.preferred_username.is_none());
        assert!(claims.email.is_none());
    }
}
