use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{clinicas, especialidades, system, usuarios_admin};
use crate::middleware::resolve_tenant_middleware;
use crate::state::AppState;

/// Full router. CORS is added by the binary from configuration.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Platform administration, no tenant
        .merge(clinica_routes())
        // Tenant-scoped
        .merge(tenant_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn clinica_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clinicas",
            get(clinicas::clinica_list).post(clinicas::clinica_create),
        )
        .route("/clinicas/usuarios-admin", get(clinicas::usuarios_admin_search))
        .route("/clinicas/usuarios-admin/:id", get(clinicas::usuario_admin_show_any))
        .route(
            "/clinicas/:id",
            get(clinicas::clinica_show)
                .put(clinicas::clinica_update)
                .delete(clinicas::clinica_delete),
        )
        .route("/clinicas/:id/usuarios-admin", get(clinicas::clinica_usuarios_admin))
}

fn tenant_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/especialidades",
            get(especialidades::especialidade_list).post(especialidades::especialidade_create),
        )
        .route(
            "/especialidades/:id",
            get(especialidades::especialidade_show)
                .put(especialidades::especialidade_update)
                .delete(especialidades::especialidade_delete),
        )
        .route(
            "/usuarios-admin",
            get(usuarios_admin::usuario_admin_list).post(usuarios_admin::usuario_admin_create),
        )
        .route(
            "/usuarios-admin/:id",
            get(usuarios_admin::usuario_admin_show)
                .put(usuarios_admin::usuario_admin_update)
                .delete(usuarios_admin::usuario_admin_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, resolve_tenant_middleware))
}

/// `None` when CORS is disabled. An empty list or `*` allows any origin.
pub fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
