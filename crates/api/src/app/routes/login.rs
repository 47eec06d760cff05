use axum::Json;
use serde_json::{json, Value};

use crate::app::dto::LoginForm;
use crate::app::extract::Valid;

/// `POST /login/` (urlencoded or multipart form).
///
/// The password is required but never echoed or logged.
pub async fn login(Valid(form): Valid<LoginForm>) -> Json<Value> {
    let LoginForm { username, password: _ } = form;
    Json(json!({ "username": username }))
}
