// handlers/banner/update.rs - PUT /banner handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use super::require_payload;
use crate::app::AppState;
use crate::auth::{authorize, Caller, Operation};
use crate::database::Banner;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// PUT /banner - replace every field of the banner named by `banner_id`. Admin only.
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<Option<Banner>>, JsonRejection>,
) -> ApiResult<()> {
    authorize(Operation::UpdateBanner, &caller)?;
    let banner = require_payload(payload, "Banner ID is required for updating.")?;

    let updated = state
        .repository
        .update(&banner)
        .await
        .map_err(|e| ApiError::from_store(e, "An error occurred while updating the banner."))?;

    if !updated {
        return Err(ApiError::not_found(format!("Banner with ID {} not found.", banner.id)));
    }

    info!(banner_id = %banner.id, "Banner updated");
    Ok(ApiResponse::no_content())
}
