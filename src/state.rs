use std::sync::Arc;

use crate::config::TenantConfig;
use crate::database::{
    ClinicaRepository, DatabaseManager, EspecialidadeRepository, InMemoryStore, PgStore,
    UsuarioAdminRepository,
};
use crate::services::{ClinicaService, EspecialidadeService, UsuarioAdminService};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub clinicas: ClinicaService,
    pub especialidades: EspecialidadeService,
    pub usuarios_admin: UsuarioAdminService,
    pub tenant: Arc<TenantConfig>,
    /// Present when running against PostgreSQL; used by `/health`
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn with_store<S>(store: Arc<S>, tenant: TenantConfig) -> Self
    where
        S: ClinicaRepository + EspecialidadeRepository + UsuarioAdminRepository + 'static,
    {
        Self {
            clinicas: ClinicaService::new(store.clone()),
            especialidades: EspecialidadeService::new(store.clone(), store.clone()),
            usuarios_admin: UsuarioAdminService::new(store.clone(), store),
            tenant: Arc::new(tenant),
            database: None,
        }
    }

    pub fn in_memory(tenant: TenantConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), tenant)
    }

    pub fn postgres(manager: DatabaseManager, tenant: TenantConfig) -> Self {
        let store = Arc::new(PgStore::new(&manager));
        Self {
            database: Some(manager),
            ..Self::with_store(store, tenant)
        }
    }
}
