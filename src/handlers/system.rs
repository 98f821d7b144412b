// handlers/system.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Multiclínicas API",
            "version": version,
            "description": "Multi-tenant clinic management backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "clinicas": "/clinicas[/:id] (platform administration)",
                "usuarios_admin_search": "/clinicas/usuarios-admin[/:id][?nome=] (platform administration)",
                "especialidades": "/especialidades[/:id] (requires clinic)",
                "usuarios_admin": "/usuarios-admin[/:id] (requires clinic)",
            },
            "tenant": "X-Clinic-ID header or clinic subdomain"
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    let Some(database) = state.database.as_ref() else {
        return (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "in-memory" }
            })),
        );
    };

    match database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": { "status": "degraded", "timestamp": now }
                })),
            )
        }
    }
}
