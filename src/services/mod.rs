pub mod clinica_service;
pub mod especialidade_service;
pub mod usuario_admin_service;

pub use clinica_service::ClinicaService;
pub use especialidade_service::{normalize_name, EspecialidadeService};
pub use usuario_admin_service::UsuarioAdminService;

use thiserror::Error;

use crate::database::DatabaseError;

/// Domain rule failures raised by the services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness invariant violated (duplicate subdomain, duplicate name)
    #[error("{0}")]
    Conflict(String),

    /// Malformed business input, e.g. an empty id set
    #[error("{0}")]
    Business(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Report a storage-level unique violation as the same conflict the
/// service-level check would have raised.
pub(crate) fn conflict_on_unique_violation(message: String) -> impl FnOnce(DatabaseError) -> ServiceError {
    move |err| match err {
        DatabaseError::UniqueViolation(_) => ServiceError::Conflict(message),
        other => ServiceError::Database(other),
    }
}

/// A clinic deleted between the existence check and the insert surfaces as a
/// foreign key violation; report it like the check would have.
pub(crate) fn clinic_missing_on_fk_violation(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::ForeignKeyViolation(_) => clinic_not_found(),
        other => ServiceError::Database(other),
    }
}

pub(crate) fn clinic_not_found() -> ServiceError {
    ServiceError::NotFound("Clínica não encontrada".to_string())
}
