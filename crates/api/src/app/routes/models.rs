use axum::Json;
use serde_json::{json, Value};

use crate::app::dto::ModelPath;
use crate::app::extract::Valid;

/// `GET /models/{model_name}`
pub async fn get_model(Valid(path): Valid<ModelPath>) -> Json<Value> {
    Json(json!({
        "model_name": path.model_name,
        "message": path.model_name.message(),
    }))
}
