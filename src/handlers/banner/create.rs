// handlers/banner/create.rs - POST /banner handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use super::{banner_location, require_payload};
use crate::app::AppState;
use crate::auth::{authorize, Caller, Operation};
use crate::database::Banner;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /banner - store a new banner and echo it back with its location. Admin only.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<Option<Banner>>, JsonRejection>,
) -> ApiResult<Banner> {
    authorize(Operation::CreateBanner, &caller)?;
    let banner = require_payload(payload, "Banner data is required.")?;

    let added = state
        .repository
        .add(banner)
        .await
        .map_err(|e| ApiError::from_store(e, "An error occurred while adding the banner."))?;

    info!(banner_id = %added.id, "Banner created");
    let location = banner_location(&added.id);
    Ok(ApiResponse::created(added, location))
}
