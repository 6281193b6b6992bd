use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::embed::EmbedError;
use marquee_core::error::{ApiError, ErrorEnvelope};
use marquee_metadata::MetadataError;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<MetadataError> for AppError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound => Self(ApiError::NotFound("title not found".into())),
            other => Self(ApiError::Upstream(other.to_string())),
        }
    }
}

impl From<EmbedError> for AppError {
    fn from(e: EmbedError) -> Self {
        match e {
            EmbedError::UnknownProvider { .. } => Self(ApiError::NotFound(e.to_string())),
            other => Self(ApiError::Internal(other.to_string())),
        }
    }
}
