use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use brainbytes_core::error::ClientCode;
use brainbytes_core::protocol::chat::{ChatReply, ChatRequest};
use brainbytes_core::BrainBytesError;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::obs::AiOutcome;

fn outcome_of(e: &BrainBytesError) -> AiOutcome {
    match e.client_code() {
        ClientCode::Config => AiOutcome::ConfigError,
        ClientCode::Timeout => AiOutcome::Timeout,
        _ => AiOutcome::UpstreamError,
    }
}

/// `POST /api/chat`: forward one prompt to the provider and relay the text.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(req) = body.map_err(|e| BrainBytesError::BadRequest(e.body_text()))?;
    req.validate()?;

    let provider = state.provider();
    let metrics = state.metrics();

    let started = Instant::now();
    let result = {
        let _in_flight = metrics.in_flight();
        provider.complete(&req).await
    };
    let elapsed = started.elapsed();

    match result {
        Ok(done) => {
            metrics.record_ai(AiOutcome::Success, elapsed);
            if let Some(tokens) = done.total_tokens {
                metrics.record_tokens(provider.model(), tokens);
            }
            tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                tokens = ?done.total_tokens,
                "chat completion relayed"
            );
            Ok(Json(ChatReply { response: done.text }))
        }
        Err(e) => {
            let outcome = outcome_of(&e);
            metrics.record_ai(outcome, elapsed);
            tracing::warn!(
                code = e.client_code().as_str(),
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "chat completion failed"
            );
            Err(e.into())
        }
    }
}
