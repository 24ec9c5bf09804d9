// handlers/banner/list.rs - GET /banner handler

use axum::extract::State;

use crate::app::AppState;
use crate::auth::{authorize, Caller, Operation};
use crate::database::Banner;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /banner - every banner flagged as available. Open to anonymous callers.
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<Banner>> {
    authorize(Operation::ListBanners, &caller)?;

    let banners = state
        .repository
        .list_available()
        .await
        .map_err(|e| ApiError::from_store(e, "An error occurred while retrieving the banners."))?;

    if banners.is_empty() {
        return Err(ApiError::not_found("No available banners found."));
    }

    Ok(ApiResponse::success(banners))
}
