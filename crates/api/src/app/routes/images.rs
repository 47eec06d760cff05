use axum::Json;
use serde_json::Value;

use fieldcheck_catalog::Image;

use crate::app::dto::{self, JsonBody};
use crate::app::errors::ApiError;
use crate::app::extract::Valid;

/// `POST /images/multiple/`; an empty list is valid.
pub async fn create_multiple_images(
    Valid(JsonBody(images)): Valid<JsonBody<Vec<Image>>>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(dto::images_to_json(&images)?))
}
