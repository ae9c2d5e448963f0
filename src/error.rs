use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;

pub const MISSING_PROMPT: &str = "Please provide a prompt";
pub const UPSTREAM_FAILED: &str = "Err: Request to OpenAI failed.";

/// Failure of a single chat completion call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to send completion request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("completion request failed ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("completion response contained no choices")]
    NoChoices,
    #[error("completion request timed out after {0} ms")]
    Timeout(u64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid value for {name}: {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("question is not defined")]
    MissingQuestion,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream detail stays in the logs.
        let (status, message) = match self {
            Self::MissingQuestion => (StatusCode::BAD_REQUEST, MISSING_PROMPT),
            Self::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILED),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
