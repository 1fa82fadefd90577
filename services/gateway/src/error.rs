use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use numbers_types::errors::ProviderError;
use numbers_types::wire::ErrorBody;
use thiserror::Error;

/// Central error type for the numbers gateway
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(ProviderError),

    #[error("Provider decode error: {0}")]
    ProviderDecodeError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UnknownCategory { category } => AppError::UnknownCategory(category),
            ProviderError::Decode { reason } => AppError::ProviderDecodeError(reason),
            other => AppError::ProviderUnavailable(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            // The provider answered, but not with a success status
            AppError::ProviderUnavailable(err) if err.is_response_error() => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ProviderDecodeError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            AppError::ProviderUnavailable(_) => "PROVIDER_UNAVAILABLE",
            AppError::ProviderDecodeError(_) => "PROVIDER_DECODE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
