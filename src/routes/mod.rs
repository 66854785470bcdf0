pub mod admin;
pub mod api;
pub mod assets;
pub mod auth;
pub mod lol;
pub mod page;
pub mod uploads;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router with state attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/healthz", get(healthz))
        .route("/assets/{*path}", get(assets::serve))
        .merge(api::router())
        .merge(lol::router())
        .merge(auth::router())
        .merge(admin::router())
        .merge(uploads::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
