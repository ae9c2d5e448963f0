use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    error::{AppError, Result},
    openai::ChatCompletionRequest,
    AppState,
};

use super::models::{AskRequest, AskResponse, ErrorResponse};

pub async fn ask(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    info!("{}", "-".repeat(40));

    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(%rejection, "Received incoming request without a parsable JSON body");
            return Err(AppError::MissingQuestion);
        }
    };
    info!(%body, "Received incoming request");

    let payload = AskRequest::from_body(&body);
    info!(question = ?payload.question, "Question");

    let Some(question) = payload.into_question() else {
        warn!("question is not defined");
        return Err(AppError::MissingQuestion);
    };

    info!("Sending request...");
    let answer = state
        .completions
        .create(&ChatCompletionRequest::for_question(&question))
        .await
        .and_then(|completion| {
            info!(?completion, "Completion received");
            completion.into_answer()
        })
        .map_err(|e| {
            error!(error = %e, "request to OpenAI failed");
            e
        })?;
    info!(%answer, "Mapped response");

    Ok(Json(AskResponse { answer }))
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
