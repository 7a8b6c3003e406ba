//! HTTP route handlers.
//!
//! `/stress` and `/kill` are matched before the wildcard, so every other
//! path (including `/`) renders the info page. Only GET is routed; axum
//! would otherwise answer HEAD with the GET handler, so every route carries
//! an explicit HEAD rejection.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod info;
pub mod kill;
pub mod stress;

use axum::{
    handler::Handler,
    http::{
        header::{HeaderValue, ALLOW, CACHE_CONTROL},
        StatusCode,
    },
    middleware,
    response::IntoResponse,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_INFO;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Path of the memory stress endpoint
pub const STRESS_PATH: &str = "/stress";

/// Path of the kill endpoint
pub const KILL_PATH: &str = "/kill";

/// Answer for HEAD requests.
async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET")])
}

/// GET-only method router: HEAD gets 405 instead of reaching the GET handler.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).head(method_not_allowed)
}

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Info page - timestamp changes on every request, never cache
    let info_routes = Router::new()
        .route("/", get_only(info::index))
        .route("/{*path}", get_only(info::index))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_INFO),
        ));

    // Operational test endpoints
    let ops_routes = Router::new()
        .route(STRESS_PATH, get_only(stress::trigger))
        .route(KILL_PATH, get_only(kill::kill));

    Router::new()
        .merge(info_routes)
        .merge(ops_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
