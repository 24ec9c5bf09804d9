use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::identity::Identity;
use crate::config::JwtConfig;

/// Everything a token is checked against.
#[derive(Debug, Clone)]
pub struct ValidationParams {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Allowed clock skew, in seconds, when checking `exp` and `nbf`.
    pub leeway_seconds: u64,
}

impl ValidationParams {
    /// Zero clock-skew parameters built from the `Jwt` settings.
    pub fn from_config(config: &JwtConfig) -> Self {
        Self {
            secret: config.key.clone(),
            issuer: config.issuer.clone(),
            audience: config.expected_audience().to_string(),
            leeway_seconds: 0,
        }
    }
}

/// Why a token was refused. Only ever logged; callers see [`TokenRejected`].
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),

    #[error("token verification failed: {0}")]
    Verification(#[from] jsonwebtoken::errors::Error),
}

/// Uniform rejection handed to callers regardless of the underlying cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid or expired token")]
pub struct TokenRejected;

/// Role claim as issued: a single role or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    pub fn from_roles(roles: &[&str]) -> Self {
        match roles {
            [single] => RoleClaim::One((*single).to_string()),
            many => RoleClaim::Many(many.iter().map(|r| r.to_string()).collect()),
        }
    }

    fn into_vec(self) -> Vec<String> {
        match self {
            RoleClaim::One(role) => vec![role],
            RoleClaim::Many(roles) => roles,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    #[serde(default)]
    sub: String,
    #[serde(
        default,
        alias = "roles",
        alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    role: Option<RoleClaim>,
    #[serde(default)]
    jti: Option<String>,
}

impl From<ClaimsRepr> for Identity {
    fn from(value: ClaimsRepr) -> Self {
        Self {
            subject: value.sub,
            roles: value.role.map(RoleClaim::into_vec).unwrap_or_default(),
            token_id: value.jti,
        }
    }
}

/// Verifies HS256 bearer tokens: signature, issuer, audience and lifetime.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(params: &ValidationParams) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[params.issuer.as_str()]);
        validation.set_audience(&[params.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = params.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            key: DecodingKey::from_secret(params.secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&ValidationParams::from_config(config))
    }

    /// Validate a token, logging the cause of any failure.
    pub fn validate(&self, token: &str) -> Result<Identity, TokenRejected> {
        match self.decode(token) {
            Ok(identity) => {
                debug!(subject = %identity.subject, roles = ?identity.roles, "Token validated");
                Ok(identity)
            }
            Err(err) => {
                warn!(error = %err, "Token validation failed.");
                Err(TokenRejected)
            }
        }
    }

    /// Validate a token and report the precise failure.
    pub fn decode(&self, token: &str) -> Result<Identity, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Malformed("empty token"));
        }
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed("expected three dot-separated segments"));
        }

        let data = decode::<ClaimsRepr>(token, &self.key, &self.validation)?;
        Ok(Identity::from(data.claims))
    }
}
