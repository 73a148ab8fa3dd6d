use std::sync::Arc;

use axum::{
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::services::activity_directory::ActivityDirectory;

pub mod routes;

use routes::{activities, health};

/// Full application router. The directory is injected rather than global so
/// tests can boot the exact production surface against a fresh seed.
pub fn app(directory: Arc<ActivityDirectory>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/activities") }))
        .route("/health", get(health::health_handler))
        .route("/activities", get(activities::list_activities_handler))
        .route(
            "/activities/:name/signup",
            post(activities::signup_handler),
        )
        .route(
            "/activities/:name/participants",
            delete(activities::unregister_handler),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(directory)
}
