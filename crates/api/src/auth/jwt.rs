//! Identity tokens issued by the external identity provider.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. The server only
//! verifies them; users are never created or stored here.

use ideaboard_core::identity::Identity;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{parse_or, ConfigError};

/// Claims embedded in every identity token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's stable user id.
    pub sub: String,
    pub name: String,
    pub email: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity::new(claims.sub, claims.name, claims.email)
    }
}

/// Configuration for identity token verification.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Lifetime of tokens issued by [`generate_identity_token`] (default: 60).
    pub token_expiry_mins: i64,
}

const DEFAULT_TOKEN_EXPIRY_MINS: i64 = 60;

impl IdentityConfig {
    /// Read as part of [`ServerConfig`](crate::config::ServerConfig).
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `IDENTITY_JWT_SECRET`        | **yes**  | --      |
    /// | `IDENTITY_TOKEN_EXPIRY_MINS` | no       | `60`    |
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("IDENTITY_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("IDENTITY_JWT_SECRET"))?;
        let token_expiry_mins = parse_or(
            lookup,
            "IDENTITY_TOKEN_EXPIRY_MINS",
            DEFAULT_TOKEN_EXPIRY_MINS,
        )?;
        Ok(Self {
            secret,
            token_expiry_mins,
        })
    }
}

/// Issue a token for `identity`. Production tokens come from the identity
/// provider; this exists for tests and local tooling.
pub fn generate_identity_token(
    identity: &Identity,
    config: &IdentityConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: identity.id.clone(),
        name: identity.name.clone(),
        email: identity.email.clone(),
        exp: now + config.token_expiry_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an identity token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &IdentityConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
