use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::disclosure::DisclosureService;
use crate::registry::DocumentRegistry;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DocumentRegistry>,
    pub disclosures: Arc<DisclosureService>,
    pub service_token: String,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/documents",
            get(api::documents::list_documents_handler).post(api::documents::add_document_handler),
        )
        .route(
            "/api/v1/documents/personal",
            post(api::documents::upload_personal_handler),
        )
        .route(
            "/api/v1/documents/{id}",
            get(api::documents::get_document_handler),
        )
        .route(
            "/api/v1/disclosures",
            get(api::disclosures::list_pending_handler),
        )
        .route(
            "/api/v1/disclosures/session",
            get(api::disclosures::session_handler),
        )
        .route(
            "/api/v1/disclosures/session/toggle",
            post(api::disclosures::toggle_handler),
        )
        .route(
            "/api/v1/disclosures/session/duration",
            put(api::disclosures::duration_handler),
        )
        .route(
            "/api/v1/disclosures/session/back",
            post(api::disclosures::back_handler),
        )
        .route(
            "/api/v1/disclosures/session/deny",
            post(api::disclosures::deny_handler),
        )
        .route(
            "/api/v1/disclosures/session/grant",
            post(api::disclosures::grant_handler),
        )
        .route(
            "/api/v1/disclosures/session/acknowledge",
            post(api::disclosures::acknowledge_handler),
        )
        .route(
            "/api/v1/disclosures/{id}/review",
            post(api::disclosures::review_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
