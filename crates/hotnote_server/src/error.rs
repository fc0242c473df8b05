//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use hotnote_error::{HotnoteError, HotnoteErrorKind};
use serde_json::json;

/// Error shape every handler returns: `{"error": "..."}` with a
/// non-2xx status.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(HotnoteError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(e) => match e.kind() {
                HotnoteErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
                HotnoteErrorKind::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                HotnoteErrorKind::Generation(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<HotnoteError> for ApiError {
    fn from(e: HotnoteError) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::NotFound(m) | Self::BadRequest(m) => m.clone(),
            Self::Internal(e) => format!("{}", e),
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotnote_error::{DataUnavailableError, GenerationError};

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);

        let unavailable: HotnoteError = DataUnavailableError::new("no data").into();
        assert_eq!(
            ApiError::from(unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let generation: HotnoteError =
            GenerationError::new(vec!["m".to_string()], "exhausted").into();
        assert_eq!(ApiError::from(generation).status(), StatusCode::BAD_GATEWAY);
    }
}
