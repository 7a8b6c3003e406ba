//! Memory stress endpoint.

use std::sync::Arc;

use axum::extract::State;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::stress::StressOutcome;

/// Response body once the buffer has been claimed by an earlier call
pub const ALREADY_RUNNING_MESSAGE: &str = "RAM stress test is already running.";

pub fn started_message(pod: &str) -> String {
    format!("RAM stress test initiated on Pod: {}", pod)
}

/// Allocates and randomizes the stress buffer on the first call only.
///
/// The fill is CPU bound, so it runs on the blocking pool.
#[instrument(name = "stress::trigger", skip(state))]
pub async fn trigger(State(state): State<AppState>) -> Result<String, AppError> {
    let stress = Arc::clone(&state.stress);
    let size = stress.size();

    let outcome = tokio::task::spawn_blocking(move || stress.trigger())
        .await
        .map_err(|e| AppError::Internal(format!("Stress task failed: {}", e)))??;

    match outcome {
        StressOutcome::Started => {
            tracing::info!(bytes = size, "Stress buffer allocated and filled");
            Ok(started_message(&state.pod.pod))
        }
        StressOutcome::AlreadyRunning => {
            tracing::debug!("Stress buffer already claimed");
            Ok(ALREADY_RUNNING_MESSAGE.to_string())
        }
    }
}
