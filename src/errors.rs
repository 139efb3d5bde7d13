use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A handler failed; `message` is what the caller sees.
    #[error("{message}: {source}")]
    Handler {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn handler(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Handler {
            message,
            source: source.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Handler { message, source } => {
                tracing::error!(error = ?source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, (*message).to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        if status.is_server_error() {
            metrics::counter!("api_errors_total").increment(1);
        }

        (
            status,
            Json(ErrorBody {
                error: message,
                status: status.as_u16(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;
    use crate::source::DataSourceError;

    #[tokio::test]
    async fn test_handler_error_hides_source() {
        let err = AppError::handler(
            "Failed to fetch alerts",
            DataSourceError::Unexpected("secret detail".into()),
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to fetch alerts");
        assert_eq!(json["status"], 500);
        assert!(!body.windows(6).any(|w| w == b"secret"));
    }

    #[tokio::test]
    async fn test_validation_error_is_internal() {
        let source = DataSourceError::from(ValidationError::OutOfRange {
            field: "winRate",
            value: 120.0,
            min: 0.0,
            max: 100.0,
        });
        let resp = AppError::handler("Failed to fetch top opportunities", source).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_not_found() {
        let resp = AppError::NotFound("no such wallet".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
