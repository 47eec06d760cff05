//! Alternative request contracts for the same resources, each mounted on
//! its own path so none of them shadows a canonical route.

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Map, Value};

use fieldcheck_catalog::{Item, Product};

use crate::app::dto::{
    self, BoundedItemUpdate, BoundedLengthSearch, EchoItemQuery, EmbeddedItem, FilesWithToken,
    FixedDefaultSearch, IdWithBody, ItemWithImportance, ItemWithUser, JsonBody, ListDefaultSearch,
    ListSearch, MaxLengthSearch, NeedyOnlyQuery, ShortItemQuery,
};
use crate::app::errors::ApiError;
use crate::app::extract::Valid;

pub fn router() -> Router {
    Router::new()
        .route("/items/echo/:item_id", get(echo_item))
        .route("/items/short/:item_id", get(short_item))
        .route("/items/needy/:item_id", get(needy_item))
        .route("/search/max-length", get(search_max_length))
        .route("/search/bounded-length", get(search_bounded_length))
        .route("/search/fixed-default", get(search_fixed_default))
        .route("/search/list", get(search_list))
        .route("/search/list-default", get(search_list_default))
        .route("/items/rename/:item_id", put(rename_item))
        .route("/items/bounded/:item_id", put(bounded_item))
        .route("/items/with-user/:item_id", put(item_with_user))
        .route("/items/importance/:item_id", put(item_with_importance))
        .route("/items/embedded/:item_id", put(embedded_item))
        .route("/items/nested/:item_id", put(nested_item))
        .route("/items/plain", post(plain_item))
        .route("/files/with-token", post(files_with_token))
}

pub async fn echo_item(Valid(query): Valid<EchoItemQuery>) -> Json<Value> {
    Json(json!({ "item_id": query.item_id, "q": query.q }))
}

pub async fn short_item(Valid(query): Valid<ShortItemQuery>) -> Json<Value> {
    let mut item = Map::new();
    item.insert("item_id".to_string(), json!(query.item_id));
    Json(dto::shape_item(item, query.q, query.short))
}

pub async fn needy_item(Valid(query): Valid<NeedyOnlyQuery>) -> Json<Value> {
    Json(json!({ "item_id": query.item_id, "needy": query.needy }))
}

fn search_response(q: Option<String>) -> Json<Value> {
    let mut results = Map::new();
    results.insert("items".to_string(), dto::search_results());
    if let Some(q) = dto::non_empty(q) {
        results.insert("q".to_string(), json!(q));
    }
    Json(Value::Object(results))
}

pub async fn search_max_length(Valid(search): Valid<MaxLengthSearch>) -> Json<Value> {
    search_response(search.q)
}

pub async fn search_bounded_length(Valid(search): Valid<BoundedLengthSearch>) -> Json<Value> {
    search_response(search.q)
}

pub async fn search_fixed_default(Valid(search): Valid<FixedDefaultSearch>) -> Json<Value> {
    search_response(Some(search.q))
}

pub async fn search_list(Valid(search): Valid<ListSearch>) -> Json<Value> {
    Json(json!({ "q": search.q }))
}

pub async fn search_list_default(Valid(search): Valid<ListDefaultSearch>) -> Json<Value> {
    Json(json!({ "q": search.q }))
}

pub async fn rename_item(Valid(update): Valid<IdWithBody<Item>>) -> Json<Value> {
    Json(json!({ "item_name": update.item.name, "item_id": update.item_id }))
}

pub async fn bounded_item(Valid(update): Valid<BoundedItemUpdate>) -> Json<Value> {
    let mut result = Map::new();
    result.insert("item_id".to_string(), json!(update.item_id));
    if let Some(q) = dto::non_empty(update.q) {
        result.insert("q".to_string(), json!(q));
    }
    if let Some(item) = update.item {
        result.insert("item".to_string(), json!(item));
    }
    Json(Value::Object(result))
}

pub async fn item_with_user(Valid(update): Valid<ItemWithUser>) -> Json<Value> {
    Json(json!({
        "item_id": update.item_id,
        "item": update.item,
        "user": update.user,
    }))
}

pub async fn item_with_importance(Valid(update): Valid<ItemWithImportance>) -> Json<Value> {
    let ItemWithImportance { base, importance } = update;
    Json(json!({
        "item_id": base.item_id,
        "item": base.item,
        "user": base.user,
        "importance": importance,
    }))
}

pub async fn embedded_item(Valid(update): Valid<EmbeddedItem>) -> Json<Value> {
    Json(json!({ "item_id": update.item_id, "item": update.item }))
}

pub async fn nested_item(Valid(update): Valid<IdWithBody<Product>>) -> Json<Value> {
    Json(json!({ "item_id": update.item_id, "item": update.item }))
}

/// Echoes the validated product without any derived fields.
pub async fn plain_item(Valid(JsonBody(item)): Valid<JsonBody<Product>>) -> Result<Json<Value>, ApiError> {
    Ok(Json(serde_json::to_value(&item)?))
}

pub async fn files_with_token(Valid(upload): Valid<FilesWithToken>) -> Json<Value> {
    Json(json!({
        "file_size": upload.file_size,
        "token": upload.token,
        "fileb_content_type": upload.fileb.content_type,
    }))
}
