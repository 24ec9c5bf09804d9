// handlers/banner/delete.rs - DELETE /banner/:banner_id handler

use axum::extract::{Path, State};
use tracing::info;

use crate::app::AppState;
use crate::auth::{authorize, Caller, Operation};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// DELETE /banner/:banner_id - Admin only.
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(banner_id): Path<String>,
) -> ApiResult<()> {
    authorize(Operation::DeleteBanner, &caller)?;

    let deleted = state
        .repository
        .delete(&banner_id)
        .await
        .map_err(|e| ApiError::from_store(e, "An error occurred while deleting the banner."))?;

    if !deleted {
        return Err(ApiError::not_found(format!("Banner with ID {} not found.", banner_id)));
    }

    info!(%banner_id, "Banner deleted");
    Ok(ApiResponse::no_content())
}
