use std::net::IpAddr;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::config::TenantConfig;
use crate::error::ApiError;
use crate::services::ServiceError;
use crate::state::AppState;
use crate::tenant::TenantContext;

/// Where the request says which clinic it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSource {
    ClinicaId(i64),
    Subdominio(String),
}

/// Reads the tenant header, falling back to the first label of `Host`
pub fn tenant_source(headers: &HeaderMap, config: &TenantConfig) -> Result<Option<TenantSource>, ApiError> {
    if let Some(value) = headers.get(config.header_name.as_str()) {
        let id = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                ApiError::bad_request(format!("Cabeçalho {} inválido", config.header_name))
            })?;
        return Ok(Some(TenantSource::ClinicaId(id)));
    }

    if !config.resolve_subdomain {
        return Ok(None);
    }

    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Ok(subdomain_of(host).map(TenantSource::Subdominio))
}

fn subdomain_of(host: &str) -> Option<String> {
    let host = host.rsplit_once(':').map_or(host, |(name, _port)| name);
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    match labels.as_slice() {
        [first, _, _, ..] if !first.is_empty() && *first != "www" => Some(first.to_lowercase()),
        _ => None,
    }
}

/// Binds a `TenantContext` to the request when it identifies a clinic.
/// The clinic must exist and be active.
pub async fn resolve_tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let source = tenant_source(request.headers(), &state.tenant)?;

    let clinica = match &source {
        Some(TenantSource::ClinicaId(id)) => match state.clinicas.find_by_id(*id).await {
            Ok(clinica) => Some(clinica),
            Err(ServiceError::NotFound(_)) => None,
            Err(other) => return Err(other.into()),
        },
        Some(TenantSource::Subdominio(subdominio)) => {
            state.clinicas.find_by_subdominio(subdominio).await?
        }
        None => {
            tracing::debug!("No tenant on {} {}", request.method(), request.uri().path());
            return Ok(next.run(request).await);
        }
    };

    let clinica = clinica.ok_or_else(|| {
        tracing::warn!("Tenant resolution failed: {:?} does not match a clinic", source);
        ApiError::not_found("Clínica não encontrada")
    })?;

    if !clinica.ativo {
        tracing::warn!("Rejected request for inactive clinic {}", clinica.id);
        return Err(ApiError::forbidden("Clínica inativa"));
    }

    let context = TenantContext::from_clinica(&clinica);
    tracing::debug!("Tenant resolved: {} ({})", context, clinica.subdominio);
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
