use crate::models::responses::{INVALID_JSON, INVALID_PARAMETERS, UPSTREAM_ERROR};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("no recognized single-valued search parameter")]
    InvalidParameters,
    #[error("upstream answered with status {status}")]
    Upstream { status: u16 },
    #[error("upstream body failed re-serialization: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidParameters => StatusCode::BAD_REQUEST,
            // Statuses that can't travel on the wire (e.g. 0) are reported as a gateway failure.
            ProxyError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::InvalidJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ProxyError::InvalidParameters => INVALID_PARAMETERS,
            ProxyError::Upstream { .. } => UPSTREAM_ERROR,
            ProxyError::InvalidJson(_) => INVALID_JSON,
        }
    }
}

/// Error bodies are plain text, unlike the JSON success body.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}
