//! Kill endpoint: answers, then exits the process after a short delay.

use axum::extract::State;
use tracing::instrument;

use crate::state::AppState;

pub fn kill_message(pod: &str) -> String {
    format!("Server in Pod: {} will be terminated.", pod)
}

/// Kill handler.
///
/// The exit runs on a detached task, so this returns right away and the
/// response has the termination delay to reach the client.
#[instrument(name = "kill::kill", skip(state))]
pub async fn kill(State(state): State<AppState>) -> String {
    state.terminator.schedule();
    tracing::info!(
        delay_ms = state.terminator.delay().as_millis() as u64,
        "Process termination scheduled"
    );
    kill_message(&state.pod.pod)
}
