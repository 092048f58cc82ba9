use axum::http::{StatusCode, Uri};
use axum::Json;

use serde::Serialize;

pub async fn handler404(path: Uri) -> (StatusCode, Json<Error>) {
    (
        StatusCode::NOT_FOUND,
        Json(Error::NotFound {
            message: format!("Invalid path: {}", path),
        }),
    )
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "error")]
pub enum Error {
    NotFound { message: String },
}
