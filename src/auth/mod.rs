pub mod identity;
pub mod policy;
pub mod roles;
pub mod validator;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtConfig;

pub use identity::{Caller, Identity};
pub use policy::{authorize, Operation, Policy};
pub use roles::{ROLE_ADMIN, ROLE_CLAIM_URI, ROLE_USER};
pub use validator::{RoleClaim, TokenError, TokenRejected, TokenValidator, ValidationParams};

/// Claims carried by tokens this service accepts.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: RoleClaim,
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(config: &JwtConfig, subject: impl Into<String>, roles: &[&str]) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::minutes(config.expire_minutes)).timestamp();

        Self {
            sub: subject.into(),
            role: RoleClaim::from_roles(roles),
            jti: Uuid::new_v4().to_string(),
            iss: config.issuer.clone(),
            aud: config.expected_audience().to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Sign an HS256 token for `subject` that [`TokenValidator`] accepts under the same config.
pub fn generate_jwt(config: &JwtConfig, subject: &str, roles: &[&str]) -> Result<String, JwtError> {
    if config.key.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(config.key.as_bytes());
    let claims = Claims::new(config, subject, roles);

    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
