use axum::Json;
use serde_json::{json, Value};

use fieldcheck_catalog::{listing, Product};

use crate::app::dto::{self, JsonBody, ListItemsQuery, NeedyItemQuery, ProductUpdate};
use crate::app::errors::ApiError;
use crate::app::extract::Valid;

/// `GET /items/?skip=&limit=`: a window over the static listing.
pub async fn list_items(Valid(query): Valid<ListItemsQuery>) -> Json<Value> {
    Json(json!(listing::page(query.skip, query.limit)))
}

/// `GET /items/{item_id}?needy=`
pub async fn read_item(Valid(query): Valid<NeedyItemQuery>) -> Json<Value> {
    Json(json!({
        "item_id": query.item_id,
        "needy": query.needy,
        "skip": query.skip,
        "limit": query.limit,
    }))
}

/// `POST /items/`
pub async fn create_item(Valid(JsonBody(item)): Valid<JsonBody<Product>>) -> Result<Json<Value>, ApiError> {
    tracing::debug!(name = %item.name, taxed = item.tax.is_some(), "creating item");
    Ok(Json(dto::product_with_tax(&item)?))
}

/// `PUT /items/{item_id}`
pub async fn update_item(Valid(update): Valid<ProductUpdate>) -> Result<Json<Value>, ApiError> {
    let mut result = dto::product_with_id(update.item_id, &update.item)?;
    if let Some(q) = dto::non_empty(update.q) {
        result.insert("q".to_string(), json!(q));
    }
    Ok(Json(Value::Object(result)))
}
