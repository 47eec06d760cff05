use axum::Json;
use serde_json::{json, Value};

use crate::app::dto::{FileBytes, FileUpload};
use crate::app::extract::Valid;

/// `POST /files/`: size of the `file` field in bytes.
pub async fn create_file(Valid(upload): Valid<FileBytes>) -> Json<Value> {
    Json(json!({ "file_size": upload.size }))
}

/// `POST /uploadfile/`: declared name of the uploaded `file`.
pub async fn create_upload_file(Valid(upload): Valid<FileUpload>) -> Json<Value> {
    tracing::debug!(
        filename = %upload.file.filename,
        size = upload.file.size,
        "received upload"
    );
    Json(json!({ "filename": upload.file.filename }))
}
