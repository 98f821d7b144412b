use std::sync::Arc;

use tracing::info;

use crate::database::models::{NovoUsuarioAdmin, UsuarioAdmin};
use crate::database::{ClinicaRepository, DatabaseError, UsuarioAdminRepository};

use super::{clinic_missing_on_fk_violation, clinic_not_found, ServiceError, ServiceResult};

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("Usuário administrador não encontrado com ID: {id}"))
}

#[derive(Clone)]
pub struct UsuarioAdminService {
    usuarios: Arc<dyn UsuarioAdminRepository>,
    clinicas: Arc<dyn ClinicaRepository>,
}

impl UsuarioAdminService {
    pub fn new(usuarios: Arc<dyn UsuarioAdminRepository>, clinicas: Arc<dyn ClinicaRepository>) -> Self {
        Self { usuarios, clinicas }
    }

    /// Searches every clinic; meant for platform administration only
    pub async fn find_all_by_nome_contains(&self, nome: &str) -> ServiceResult<Vec<UsuarioAdmin>> {
        Ok(self
            .usuarios
            .find_all_by_nome_contains_ignore_case(nome.trim())
            .await?)
    }

    pub async fn find_all_by_clinic(&self, clinica_id: i64) -> ServiceResult<Vec<UsuarioAdmin>> {
        Ok(self.usuarios.find_by_clinica_id(clinica_id).await?)
    }

    pub async fn find_all_by_clinic_and_nome_contains(
        &self,
        clinica_id: i64,
        nome: &str,
    ) -> ServiceResult<Vec<UsuarioAdmin>> {
        Ok(self
            .usuarios
            .find_by_clinica_id_and_nome_contains_ignore_case(clinica_id, nome.trim())
            .await?)
    }

    pub async fn find_by_id_and_clinic(&self, id: i64, clinica_id: i64) -> ServiceResult<UsuarioAdmin> {
        self.usuarios
            .find_by_id_and_clinica_id(id, clinica_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<UsuarioAdmin> {
        self.usuarios.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, clinica_id: i64, nome: &str) -> ServiceResult<UsuarioAdmin> {
        if !self.clinicas.exists_by_id(clinica_id).await? {
            return Err(clinic_not_found());
        }

        let saved = self
            .usuarios
            .insert(NovoUsuarioAdmin {
                nome: nome.trim().to_string(),
                clinica_id,
            })
            .await
            .map_err(clinic_missing_on_fk_violation)?;

        info!("Created admin user {} in clinic {}", saved.id, clinica_id);
        Ok(saved)
    }

    pub async fn update(&self, id: i64, clinica_id: i64, nome: &str) -> ServiceResult<UsuarioAdmin> {
        let mut existente = self.find_by_id_and_clinic(id, clinica_id).await?;
        existente.nome = nome.trim().to_string();

        let updated = self.usuarios.update(&existente).await.map_err(|err| match err {
            DatabaseError::NotFound(_) => not_found(id),
            other => other.into(),
        })?;

        info!("Updated admin user {} in clinic {}", id, clinica_id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, clinica_id: i64) -> ServiceResult<()> {
        self.find_by_id_and_clinic(id, clinica_id).await?;

        self.usuarios.delete(id, clinica_id).await.map_err(|err| match err {
            DatabaseError::NotFound(_) => not_found(id),
            other => other.into(),
        })?;

        info!("Deleted admin user {} from clinic {}", id, clinica_id);
        Ok(())
    }
}
