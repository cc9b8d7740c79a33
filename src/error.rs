use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors of the rewrite endpoint, rendered as `{ "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("Failed to fetch external URL. Reason: {0}")]
    UpstreamUnreachable(String),

    #[error("External URL returned status: {0}. (URL might be restricted or require authentication).")]
    UpstreamRejected(u16),

    #[error("{0}")]
    Generative(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Request timed out after {0} seconds.")]
    TimedOut(u64),

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnreachable(_) | ApiError::UpstreamRejected(_) => StatusCode::BAD_GATEWAY,
            ApiError::Generative(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors of the draft publishing endpoint, rendered as
/// `{ "success": false, "message": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("WordPress URL is required.")]
    MissingUrl,

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Proxy connection failed: {0}")]
    Connection(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl PublishError {
    pub fn status(&self) -> StatusCode {
        match self {
            PublishError::MissingUrl => StatusCode::BAD_REQUEST,
            PublishError::Rejected { status, .. } => *status,
            PublishError::Connection(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PublishError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for PublishError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingField("URL").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UpstreamRejected(404).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::UpstreamUnreachable("dns error".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Generative("quota exceeded".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::TimedOut(30).status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::MissingField("URL").to_string(), "URL is required.");
        assert!(ApiError::UpstreamRejected(404).to_string().contains("404"));
        assert_eq!(ApiError::Generative("quota exceeded".into()).to_string(), "quota exceeded");
    }

    #[test]
    fn test_publish_rejection_keeps_upstream_status() {
        let err = PublishError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: "Sorry, you are not allowed to create posts as this user.".into(),
        };
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.to_string(),
            "Sorry, you are not allowed to create posts as this user."
        );
    }
}
