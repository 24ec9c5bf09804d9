mod create;
mod delete;
mod list;
mod show;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use show::show;
pub use update::update;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::database::Banner;
use crate::error::ApiError;

/// Everything outside the RFC 3986 unreserved set, `/` included, so an id
/// always stays a single path segment.
const SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Location of a single banner, as served by `GET /banner/:banner_id`.
pub fn banner_location(banner_id: &str) -> String {
    format!("/banner/{}", utf8_percent_encode(banner_id, SEGMENT_SET))
}

/// Unwrap a banner request body. An explicit JSON `null` or a body sent
/// without a JSON content type is reported with `missing`.
fn require_payload(
    payload: Result<Json<Option<Banner>>, JsonRejection>,
    missing: &str,
) -> Result<Banner, ApiError> {
    match payload {
        Ok(Json(Some(banner))) => Ok(banner),
        Ok(Json(None)) | Err(JsonRejection::MissingJsonContentType(_)) => {
            Err(ApiError::bad_request(missing))
        }
        Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
    }
}
