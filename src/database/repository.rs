// Repository seams between the services and the backing store.
//
// Every tenant-scoped method takes the clinic id explicitly; there is no
// variant of a point lookup, update or delete that ignores it.

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Clinica, Especialidade, NovaClinica, NovaEspecialidade, NovoUsuarioAdmin, UsuarioAdmin,
};

#[async_trait]
pub trait ClinicaRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Clinica>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Clinica>, DatabaseError>;

    async fn find_by_subdominio(&self, subdominio: &str) -> Result<Option<Clinica>, DatabaseError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn exists_by_subdominio(&self, subdominio: &str) -> Result<bool, DatabaseError>;

    /// Fails with `UniqueViolation` when the subdomain is taken
    async fn insert(&self, clinica: NovaClinica) -> Result<Clinica, DatabaseError>;

    async fn update(&self, clinica: &Clinica) -> Result<Clinica, DatabaseError>;

    /// Removes the clinic together with every row it owns
    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait EspecialidadeRepository: Send + Sync {
    async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<Especialidade>, DatabaseError>;

    async fn find_by_id_and_clinica_id(
        &self,
        id: i64,
        clinica_id: i64,
    ) -> Result<Option<Especialidade>, DatabaseError>;

    async fn exists_by_nome_ignore_case_and_clinica_id(
        &self,
        nome: &str,
        clinica_id: i64,
    ) -> Result<bool, DatabaseError>;

    async fn exists_by_nome_ignore_case_and_clinica_id_and_id_not(
        &self,
        nome: &str,
        clinica_id: i64,
        id: i64,
    ) -> Result<bool, DatabaseError>;

    /// Fails with `UniqueViolation` when the clinic already holds the name
    async fn insert(&self, especialidade: NovaEspecialidade) -> Result<Especialidade, DatabaseError>;

    async fn update(&self, especialidade: &Especialidade) -> Result<Especialidade, DatabaseError>;

    async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UsuarioAdminRepository: Send + Sync {
    async fn find_all_by_nome_contains_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<UsuarioAdmin>, DatabaseError>;

    async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<UsuarioAdmin>, DatabaseError>;

    async fn find_by_clinica_id_and_nome_contains_ignore_case(
        &self,
        clinica_id: i64,
        nome: &str,
    ) -> Result<Vec<UsuarioAdmin>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UsuarioAdmin>, DatabaseError>;

    async fn find_by_id_and_clinica_id(
        &self,
        id: i64,
        clinica_id: i64,
    ) -> Result<Option<UsuarioAdmin>, DatabaseError>;

    async fn insert(&self, usuario: NovoUsuarioAdmin) -> Result<UsuarioAdmin, DatabaseError>;

    async fn update(&self, usuario: &UsuarioAdmin) -> Result<UsuarioAdmin, DatabaseError>;

    async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError>;
}
