use axum::Json;
use serde_json::{json, Value};

use crate::app::dto::FilePath;
use crate::app::extract::Valid;

/// `GET /files/{file_path:path}`; the path keeps its inner slashes.
pub async fn read_file(Valid(path): Valid<FilePath>) -> Json<Value> {
    Json(json!({ "file_path": path.file_path }))
}
