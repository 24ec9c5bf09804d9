// handlers/banner/show.rs - GET /banner/:banner_id handler

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::auth::{authorize, Caller, Operation};
use crate::database::Banner;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /banner/:banner_id - a single banner. Requires role User or Admin.
pub async fn show(
    State(state): State<AppState>,
    caller: Caller,
    Path(banner_id): Path<String>,
) -> ApiResult<Banner> {
    authorize(Operation::GetBanner, &caller)?;

    let banner = state
        .repository
        .get_by_id(&banner_id)
        .await
        .map_err(|e| ApiError::from_store(e, "An error occurred while retrieving the banner."))?;

    match banner {
        Some(banner) => Ok(ApiResponse::success(banner)),
        None => Err(ApiError::not_found(format!("Banner with ID {} not found.", banner_id))),
    }
}
