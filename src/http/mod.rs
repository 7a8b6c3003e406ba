//! HTTP server module.
//!
//! Plain HTTP only. There is no TLS, no redirect listener, and no graceful
//! shutdown: the process ends either on a signal or through the kill route.

mod server;

pub use server::{bind, serve, start_server, ServerError};
