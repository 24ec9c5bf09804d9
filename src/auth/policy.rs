use tracing::debug;

use crate::auth::identity::Caller;
use crate::auth::roles::{ROLE_ADMIN, ROLE_USER};
use crate::error::ApiError;

/// Banner operations exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBanners,
    GetBanner,
    CreateBanner,
    UpdateBanner,
    DeleteBanner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Anonymous,
    /// Caller must hold at least one of these roles.
    AnyRole(&'static [&'static str]),
}

const READERS: &[&str] = &[ROLE_USER, ROLE_ADMIN];
const ADMINS: &[&str] = &[ROLE_ADMIN];

impl Operation {
    pub fn policy(self) -> Policy {
        match self {
            Operation::ListBanners => Policy::Anonymous,
            Operation::GetBanner => Policy::AnyRole(READERS),
            Operation::CreateBanner | Operation::UpdateBanner | Operation::DeleteBanner => {
                Policy::AnyRole(ADMINS)
            }
        }
    }
}

/// Check `caller` against the policy for `operation`.
///
/// Anonymous callers on a role-protected operation get 401; authenticated
/// callers without a required role get 403.
pub fn authorize(operation: Operation, caller: &Caller) -> Result<(), ApiError> {
    let required = match operation.policy() {
        Policy::Anonymous => return Ok(()),
        Policy::AnyRole(roles) => roles,
    };

    match caller.identity() {
        None => {
            debug!(?operation, "Rejecting anonymous caller");
            Err(ApiError::unauthorized("Authentication is required."))
        }
        Some(identity) if identity.has_any_role(required) => Ok(()),
        Some(identity) => {
            debug!(?operation, subject = %identity.subject, roles = ?identity.roles, "Caller lacks required role");
            Err(ApiError::forbidden(format!(
                "Insufficient role. Required one of: {}",
                required.join(", ")
            )))
        }
    }
}
