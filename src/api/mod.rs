mod handlers;

use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::TranslationService;

/// State carried by every handler: the service plus the configured grace
/// period applied when a session is interrupted.
#[derive(Clone)]
pub struct ApiState {
    pub service: TranslationService,
    pub interrupt_timeout: Duration,
}

pub fn create_router(service: TranslationService, interrupt_timeout: Duration) -> Router {
    let api = Router::new()
        // Translations
        .route("/translations", post(handlers::create_translation))
        .route("/translations", get(handlers::list_translations))
        .route("/translations/{id}", get(handlers::get_translation))
        .route("/translations/{id}", delete(handlers::delete_translation))
        .route(
            "/translations/{id}/activate",
            post(handlers::activate_translation),
        )
        .route(
            "/translations/{id}/interrupt",
            post(handlers::interrupt_translation),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ApiState {
            service,
            interrupt_timeout,
        })
}
