//! Per-request tenant context.
//!
//! The active clinic travels inside the request's extensions: the tenant
//! middleware inserts it, handlers take it as an extractor and it is dropped
//! together with the request on every completion path. Nothing is kept in
//! process-global or thread-local storage.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::database::models::Clinica;
use crate::error::ApiError;

/// The clinic every tenant-scoped query and mutation of a request is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    clinica_id: i64,
    nome_fantasia: Option<String>,
}

impl TenantContext {
    pub fn new(clinica_id: i64) -> Self {
        Self {
            clinica_id,
            nome_fantasia: None,
        }
    }

    /// Context carrying the clinic's display name for response mapping
    pub fn from_clinica(clinica: &Clinica) -> Self {
        Self {
            clinica_id: clinica.id,
            nome_fantasia: Some(clinica.nome_fantasia.clone()),
        }
    }

    pub fn clinica_id(&self) -> i64 {
        self.clinica_id
    }

    pub fn nome_fantasia(&self) -> Option<&str> {
        self.nome_fantasia.as_deref()
    }
}

impl std::fmt::Display for TenantContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clinica:{}", self.clinica_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| ApiError::bad_request("Clínica não identificada na requisição"))
    }
}
