pub mod admin;
pub mod api;
pub mod catalog;
pub mod web;

use axum::{
    http::header::{ACCEPT, CONTENT_TYPE},
    Router,
};
use sea_orm::DbConn;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use web::csrf::CsrfTokens;

/// Dependencies handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub csrf: CsrfTokens,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(AllowOrigin::mirror_request())
        .allow_headers([ACCEPT, CONTENT_TYPE]);
    let tracing = TraceLayer::new_for_http();
    Router::new()
        .nest("/api", api::router())
        .merge(web::router())
        .layer(cors)
        .layer(tracing)
        .with_state(state)
}
