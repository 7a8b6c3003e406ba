//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::PodInfo;
use crate::stress::StressBuffer;
use crate::terminator::Terminator;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the placement metadata read at startup, the Tera template engine,
/// the process-wide stress buffer, and the terminator used by the kill route.
#[derive(Clone)]
pub struct AppState {
    pub pod: Arc<PodInfo>,
    pub tera: Arc<Tera>,
    pub stress: Arc<StressBuffer>,
    pub terminator: Terminator,
}

impl AppState {
    /// Creates a new application state from the given parts.
    pub fn new(pod: PodInfo, tera: Tera, stress: StressBuffer, terminator: Terminator) -> Self {
        Self {
            pod: Arc::new(pod),
            tera: Arc::new(tera),
            stress: Arc::new(stress),
            terminator,
        }
    }
}
