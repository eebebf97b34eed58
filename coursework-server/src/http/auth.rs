//! Bearer token verification and permission checks
//!
//! Tokens are JWTs verified against a key from config: an HS256 shared
//! secret or an RS256 PEM public key. Guarded handlers take an
//! [`Authorized<P>`] argument, where `P` names the required permission.

use std::fs;
use std::marker::PhantomData;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use coursework_core::{AuthSection, JwtAlgorithm};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use super::error::ApiError;
use super::server::AppState;

/// Authentication failure: machine code, human description and HTTP status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: &'static str,
    pub description: &'static str,
    pub status: StatusCode,
}

impl AuthError {
    const fn new(code: &'static str, description: &'static str, status: StatusCode) -> Self {
        Self {
            code,
            description,
            status,
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            "authorization_header_missing",
            "Authorization header is expected.",
            StatusCode::UNAUTHORIZED,
        )
    }

    pub fn invalid_header(description: &'static str) -> Self {
        Self::new("invalid_header", description, StatusCode::UNAUTHORIZED)
    }

    pub fn token_expired() -> Self {
        Self::new("token_expired", "Token expired.", StatusCode::UNAUTHORIZED)
    }

    pub fn unauthorized() -> Self {
        Self::new("unauthorized", "Permission not found.", StatusCode::FORBIDDEN)
    }

    pub fn not_configured() -> Self {
        Self::new(
            "auth_not_configured",
            "Token verification is not configured.",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }
}

/// Why a verifier could not be built from config
#[derive(Debug, thiserror::Error)]
pub enum AuthSetupError {
    #[error("failed to read public key {path}: {source}")]
    ReadKey {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),
}

/// Claims read from a verified token
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub exp: i64,
    #[serde(default)]
    pub aud: Option<Audience>,
    #[serde(default)]
    pub iss: Option<String>,
}

/// The `aud` claim, which may be a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

impl Claims {
    /// Require `permission` among the token's permissions.
    pub fn check_permission(&self, permission: &str) -> Result<(), AuthError> {
        let permissions = self.permissions.as_ref().ok_or(AuthError::new(
            "invalid_claims",
            "Permissions not included in JWT.",
            StatusCode::BAD_REQUEST,
        ))?;

        if !permissions.iter().any(|p| p == permission) {
            return Err(AuthError::unauthorized());
        }
        Ok(())
    }
}

/// Verifies bearer tokens with one configured key
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Build from the `[auth]` config section; `None` when no key is set.
    pub fn from_config(auth: &AuthSection) -> Result<Option<Self>, AuthSetupError> {
        if !auth.is_configured() {
            return Ok(None);
        }

        let (key, algorithm) = match auth.algorithm {
            JwtAlgorithm::Hs256 => {
                let secret = auth.secret.as_deref().unwrap_or_default();
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            JwtAlgorithm::Rs256 => {
                let path = auth.public_key_path.clone().unwrap_or_default();
                let pem = fs::read(&path).map_err(|source| AuthSetupError::ReadKey {
                    path: path.display().to_string(),
                    source,
                })?;
                (DecodingKey::from_rsa_pem(&pem)?, Algorithm::RS256)
            }
        };

        Ok(Some(Self::new(
            key,
            algorithm,
            auth.audience.as_deref(),
            auth.issuer.as_deref(),
        )))
    }

    /// HS256 verifier without audience or issuer checks.
    pub fn hs256(secret: &[u8]) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256, None, None)
    }

    pub fn new(
        key: DecodingKey,
        algorithm: Algorithm,
        audience: Option<&str>,
        issuer: Option<&str>,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        Self { key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::token_expired(),
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::new(
                    "invalid_claims",
                    "Incorrect claims. Please, check the audience and issuer.",
                    StatusCode::UNAUTHORIZED,
                ),
                _ => AuthError::new(
                    "invalid_header",
                    "Unable to parse authentication token.",
                    StatusCode::BAD_REQUEST,
                ),
            })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::header_missing)?
        .to_str()
        .map_err(|_| AuthError::invalid_header("Authorization header is not valid text."))?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(AuthError::header_missing()),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::invalid_header("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// A permission string a route requires
pub trait Permission {
    const NAME: &'static str;
}

/// Extractor that succeeds only for a valid token carrying permission `P`
pub struct Authorized<P> {
    pub claims: Claims,
    _permission: PhantomData<P>,
}

impl<P> FromRequestParts<Arc<AppState>> for Authorized<P>
where
    P: Permission + Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let Some(verifier) = state.verifier.as_ref() else {
            tracing::error!(permission = P::NAME, "Guarded route hit but no JWT key is configured");
            return Err(AuthError::not_configured().into());
        };

        let claims = verifier.verify(token)?;
        claims.check_permission(P::NAME)?;

        tracing::debug!(sub = ?claims.sub, permission = P::NAME, "Authorized");
        Ok(Self {
            claims,
            _permission: PhantomData,
        })
    }
}
