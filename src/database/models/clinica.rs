use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tenant root. `subdominio` is unique across every clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Clinica {
    pub id: i64,
    pub nome_fantasia: String,
    pub subdominio: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

/// Clinic data before persistence assigns an id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovaClinica {
    pub nome_fantasia: String,
    pub subdominio: String,
    pub ativo: bool,
}
