// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

// endregion: --- Imports

// region:    --- App Error
/// API 핸들러 에러. 모든 에러는 400 과 `{ "error": ... }` 본문으로 응답한다.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing fields")]
    MissingFields,

    #[error("Invalid section")]
    InvalidSection,

    #[error("Please provide name, email and password")]
    MissingSignupFields,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields
            | AppError::InvalidSection
            | AppError::MissingSignupFields
            | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
// endregion: --- App Error
