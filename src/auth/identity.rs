use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Authenticated caller derived from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub roles: Vec<String>,
    /// The token's `jti` claim, when present.
    pub token_id: Option<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|value| value == role)
    }

    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        allowed.iter().any(|role| self.has_role(role))
    }
}

/// The identity resolved by the auth gate for one request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller(Option<Identity>);

impl Caller {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self(Some(identity))
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_none()
    }
}

// Requests that never passed through the gate are treated as anonymous.
#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}
