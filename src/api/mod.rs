mod error;
mod handlers;

pub use error::ApiError;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::store::Store;

pub fn create_router(store: Store) -> Router {
    create_router_with_cors(store, None)
}

/// Build the router, restricting CORS to `cors_origins` when given.
pub fn create_router_with_cors(store: Store, cors_origins: Option<&[String]>) -> Router {
    let api = Router::new()
        // Navigation
        .route("/view", get(handlers::get_view).put(handlers::set_view))
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/dashboard/filters", get(handlers::get_dashboard_filters))
        // Roadmap
        .route("/roadmap", get(handlers::get_roadmap))
        .route("/roadmap/moves", post(handlers::move_card))
        // Prioritization
        .route("/prioritize", post(handlers::prioritize))
        .route("/prioritization", get(handlers::get_prioritization))
        .route("/prioritization/form", put(handlers::replace_form))
        .route("/prioritization/form/features", post(handlers::add_feature))
        .route(
            "/prioritization/form/features/{index}",
            delete(handlers::remove_feature),
        )
        .route("/prioritization/submissions", post(handlers::submit))
        .route("/prioritization/table", get(handlers::get_result_table))
        .route(
            "/prioritization/notification",
            delete(handlers::dismiss_notification),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(store)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
