use axum::Json;
use serde_json::{json, Map, Value};

use crate::app::dto::{self, UserItemQuery};
use crate::app::extract::Valid;

/// `GET /users/{user_id}/items/{item_id}`
pub async fn read_user_item(Valid(query): Valid<UserItemQuery>) -> Json<Value> {
    let mut item = Map::new();
    item.insert("item_id".to_string(), json!(query.item.item_id));
    item.insert("owner_id".to_string(), json!(query.user_id));
    Json(dto::shape_item(item, query.item.q, query.item.short))
}
