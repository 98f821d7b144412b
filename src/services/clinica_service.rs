use std::sync::Arc;

use tracing::{info, warn};

use crate::database::models::{Clinica, NovaClinica};
use crate::database::{ClinicaRepository, DatabaseError};

use super::{conflict_on_unique_violation, ServiceError, ServiceResult};

/// Manages the tenants themselves; no tenant filter applies here.
#[derive(Clone)]
pub struct ClinicaService {
    repository: Arc<dyn ClinicaRepository>,
}

impl ClinicaService {
    pub fn new(repository: Arc<dyn ClinicaRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Clinica>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Clinica> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Clínica não encontrada com ID: {id}")))
    }

    pub async fn find_by_subdominio(&self, subdominio: &str) -> ServiceResult<Option<Clinica>> {
        Ok(self.repository.find_by_subdominio(subdominio).await?)
    }

    /// Subdomain uniqueness is global across clinics
    pub async fn create(&self, clinica: NovaClinica) -> ServiceResult<Clinica> {
        let conflict = format!("Subdomínio já está em uso: {}", clinica.subdominio);
        if self.repository.exists_by_subdominio(&clinica.subdominio).await? {
            warn!("Rejected clinic with duplicate subdomain '{}'", clinica.subdominio);
            return Err(ServiceError::Conflict(conflict));
        }

        let saved = self
            .repository
            .insert(clinica)
            .await
            .map_err(conflict_on_unique_violation(conflict))?;

        info!("Created clinic {} ({})", saved.id, saved.subdominio);
        Ok(saved)
    }

    /// Re-checks the subdomain only when it changes
    pub async fn update(&self, id: i64, dados: NovaClinica) -> ServiceResult<Clinica> {
        let mut existente = self.find_by_id(id).await?;

        let conflict = format!("Novo subdomínio já está em uso: {}", dados.subdominio);
        if existente.subdominio != dados.subdominio
            && self.repository.exists_by_subdominio(&dados.subdominio).await?
        {
            warn!("Rejected subdomain change of clinic {} to '{}'", id, dados.subdominio);
            return Err(ServiceError::Conflict(conflict));
        }

        existente.nome_fantasia = dados.nome_fantasia;
        existente.subdominio = dados.subdominio;
        existente.ativo = dados.ativo;

        let updated = self
            .repository
            .update(&existente)
            .await
            .map_err(|err| match err {
                DatabaseError::NotFound(_) => {
                    ServiceError::NotFound(format!("Clínica não encontrada com ID: {id}"))
                }
                other => conflict_on_unique_violation(conflict)(other),
            })?;

        info!("Updated clinic {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let not_found = || {
            ServiceError::NotFound(format!("Clínica não encontrada para exclusão com ID: {id}"))
        };

        if !self.repository.exists_by_id(id).await? {
            return Err(not_found());
        }

        self.repository.delete_by_id(id).await.map_err(|err| match err {
            DatabaseError::NotFound(_) => not_found(),
            other => other.into(),
        })?;

        info!("Deleted clinic {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;

    fn service() -> ClinicaService {
        ClinicaService::new(Arc::new(InMemoryStore::new()))
    }

    fn clinica(nome: &str, subdominio: &str) -> NovaClinica {
        NovaClinica {
            nome_fantasia: nome.to_string(),
            subdominio: subdominio.to_string(),
            ativo: true,
        }
    }

    #[tokio::test]
    async fn duplicate_subdomain_conflicts_regardless_of_name() {
        let service = service();
        service.create(clinica("Clínica A", "clinica-a")).await.unwrap();

        let err = service
            .create(clinica("Outra Clínica", "clinica-a"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(ref msg) if msg == "Subdomínio já está em uso: clinica-a"));
    }

    #[tokio::test]
    async fn update_keeping_subdomain_skips_uniqueness_check() {
        let service = service();
        let saved = service.create(clinica("Clínica A", "clinica-a")).await.unwrap();

        let updated = service
            .update(
                saved.id,
                NovaClinica {
                    ativo: false,
                    ..clinica("Clínica A Renomeada", "clinica-a")
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.nome_fantasia, "Clínica A Renomeada");
        assert!(!updated.ativo);
        assert_eq!(updated.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn update_to_taken_subdomain_conflicts() {
        let service = service();
        service.create(clinica("Clínica A", "clinica-a")).await.unwrap();
        let b = service.create(clinica("Clínica B", "clinica-b")).await.unwrap();

        let err = service
            .update(b.id, clinica("Clínica B", "clinica-a"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(ref msg) if msg.starts_with("Novo subdomínio")));
    }

    #[tokio::test]
    async fn missing_clinic_is_not_found() {
        let service = service();

        assert!(matches!(service.find_by_id(42).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            service.update(42, clinica("X", "x")).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(service.delete(42).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_clinic() {
        let service = service();
        let saved = service.create(clinica("Clínica A", "clinica-a")).await.unwrap();

        service.delete(saved.id).await.unwrap();

        assert!(service.find_all().await.unwrap().is_empty());
        assert!(service.find_by_subdominio("clinica-a").await.unwrap().is_none());
    }
}
