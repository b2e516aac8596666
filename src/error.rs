use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::envelope::Envelope;

/// Failures of the HTTP API layer. Each variant maps to one status code and
/// renders as a `success: false` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client input failed a required-field or shape check.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The persistence collaborator raised or returned malformed data.
    /// `detail` is the raw backend text, present only when configured to
    /// expose it.
    #[error("{message}")]
    Persistence {
        message: String,
        detail: Option<String>,
    },

    /// Any failure no handler mapped itself. `detail` follows the same
    /// exposure rule as persistence failures.
    #[error("Internal server error")]
    Internal { detail: Option<String> },
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound("Service not found".to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Persistence { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            ApiError::Persistence { detail, .. } | ApiError::Internal { detail } => detail.clone(),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(Envelope::failure(self.to_string(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Persistence {
                message: "Failed to add service".into(),
                detail: None
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal { detail: None }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
