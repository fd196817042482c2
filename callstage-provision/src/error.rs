//! Error types for the provisioning service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Errors raised while provisioning rooms and meeting tokens
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Upstream rooms API answered with a non-success status
    #[error("Upstream API returned {status} for {url}")]
    Upstream {
        /// HTTP status the upstream returned
        status: u16,
        /// URL of the failed request
        url: String,
    },

    /// Request to the upstream rooms API failed before a response arrived
    #[error("Upstream request failed: {reason}")]
    Network {
        /// Underlying transport error
        reason: String,
    },

    /// Upstream response body could not be decoded
    #[error("Upstream response could not be decoded: {reason}")]
    Decode {
        /// Underlying decode error
        reason: String,
    },

    /// No upstream API key configured
    #[error("Missing upstream API key")]
    MissingApiKey,
}

impl From<reqwest::Error> for ProvisionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ProvisionError::Decode {
                reason: error.to_string(),
            }
        } else {
            ProvisionError::Network {
                reason: error.to_string(),
            }
        }
    }
}

/// JSON body returned for failed requests
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ProvisionError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProvisionError::Upstream { .. }
            | ProvisionError::Network { .. }
            | ProvisionError::Decode { .. } => StatusCode::BAD_GATEWAY,
            ProvisionError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("request failed: {}", self);
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let error = ProvisionError::Upstream {
            status: 500,
            url: "https://api.example.com/rooms".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Upstream API returned 500 for https://api.example.com/rooms"
        );
    }

    #[test]
    fn test_upstream_error_maps_to_bad_gateway() {
        let response = ProvisionError::Upstream {
            status: 500,
            url: "https://api.example.com/rooms".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
