//! Info page handler.
//!
//! Serves every path not claimed by another route with the placement
//! metadata read at startup and the current UTC time.

use axum::{extract::State, response::Html};
use chrono::Utc;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::templates::render_info;

/// Info page handler.
#[instrument(name = "info::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = render_info(&state.tera, &state.pod, Utc::now())?;
    Ok(Html(html))
}
