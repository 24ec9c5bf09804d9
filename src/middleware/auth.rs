use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{Caller, TokenValidator};
use crate::error::ApiError;

pub const INVALID_TOKEN_MESSAGE: &str = "Unauthorized: Invalid or expired token.";

/// Resolve the caller for every request before it reaches a handler.
///
/// No `Authorization` header: the request continues anonymously and the
/// per-operation policy decides. A header whose token fails validation stops
/// the request here with 401. Either way a [`Caller`] is inserted into the
/// request extensions.
pub async fn auth_gate(
    State(validator): State<Arc<TokenValidator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = match bearer_token(request.headers()) {
        None => Caller::anonymous(),
        Some(token) => {
            let identity = validator
                .validate(token)
                .map_err(|_| ApiError::unauthorized(INVALID_TOKEN_MESSAGE))?;
            Caller::authenticated(identity)
        }
    };

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

/// Token part of the `Authorization` header: its last space-separated segment.
/// Unreadable header values yield an empty token, which never validates.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).map(|value| {
        value
            .to_str()
            .ok()
            .and_then(|raw| raw.rsplit(' ').next())
            .unwrap_or("")
    })
}
