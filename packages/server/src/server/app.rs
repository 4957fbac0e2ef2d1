//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    assignee_handler, create_customer_handler, create_installer_handler, get_customer_handler,
    get_installer_handler, health_handler, list_customers_handler, list_installers_handler,
    set_fallback_handler, update_installer_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: ServerDeps,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // No configured origins means any origin (development)
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

fn api_routes() -> Router {
    Router::new()
        .route(
            "/customers",
            post(create_customer_handler).get(list_customers_handler),
        )
        .route("/customers/:id", get(get_customer_handler))
        .route(
            "/installers",
            get(list_installers_handler).post(create_installer_handler),
        )
        .route(
            "/installers/:id",
            get(get_installer_handler).put(update_installer_handler),
        )
        .route("/installers/:id/fallback", post(set_fallback_handler))
        .route("/assignee", get(assignee_handler))
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let jwt_service = deps.jwt_service.clone();
    let app_state = AxumAppState { deps };

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api_routes())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
