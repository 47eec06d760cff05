use axum::Json;
use serde_json::Value;

use fieldcheck_catalog::Offer;

use crate::app::dto::{self, JsonBody};
use crate::app::errors::ApiError;
use crate::app::extract::Valid;

/// `POST /offers/`
pub async fn create_offer(Valid(JsonBody(offer)): Valid<JsonBody<Offer>>) -> Result<Json<Value>, ApiError> {
    tracing::debug!(name = %offer.name, products = offer.items.len(), "creating offer");
    Ok(Json(dto::offer_to_json(&offer)?))
}
