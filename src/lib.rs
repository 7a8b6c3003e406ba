//! Container Info - a diagnostic web service for orchestrated containers.
//!
//! Reports where the container runs (address, pod, node, namespace) and
//! exposes two operational test endpoints: a one-shot memory stress and a
//! delayed self-termination.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod stress;
pub mod templates;
pub mod terminator;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
