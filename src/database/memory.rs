// In-memory repositories.
//
// Purpose
// - Run the service without PostgreSQL (local development, tests).
//
// Responsibilities
// - Mirror the storage-layer constraints: unique subdomain, unique
//   case-insensitive specialty name per clinic, cascade on clinic delete.
// - Check and write under the same write guard so the unique guard is atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Clinica, Especialidade, NovaClinica, NovaEspecialidade, NovoUsuarioAdmin, UsuarioAdmin,
};
use crate::database::repository::{ClinicaRepository, EspecialidadeRepository, UsuarioAdminRepository};

#[derive(Default)]
struct Tables {
    clinicas: BTreeMap<i64, Clinica>,
    especialidades: BTreeMap<i64, Especialidade>,
    usuarios_admin: BTreeMap<i64, UsuarioAdmin>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn subdominio_taken(&self, subdominio: &str, except: Option<i64>) -> bool {
        self.clinicas
            .values()
            .any(|c| c.subdominio == subdominio && Some(c.id) != except)
    }

    fn nome_taken(&self, nome: &str, clinica_id: i64, except: Option<i64>) -> bool {
        let nome = nome.to_lowercase();
        self.especialidades.values().any(|e| {
            e.clinica_id == clinica_id && e.nome.to_lowercase() == nome && Some(e.id) != except
        })
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl ClinicaRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Clinica>, DatabaseError> {
        Ok(self.tables.read().await.clinicas.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Clinica>, DatabaseError> {
        Ok(self.tables.read().await.clinicas.get(&id).cloned())
    }

    async fn find_by_subdominio(&self, subdominio: &str) -> Result<Option<Clinica>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .clinicas
            .values()
            .find(|c| c.subdominio == subdominio)
            .cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.tables.read().await.clinicas.contains_key(&id))
    }

    async fn exists_by_subdominio(&self, subdominio: &str) -> Result<bool, DatabaseError> {
        Ok(self.tables.read().await.subdominio_taken(subdominio, None))
    }

    async fn insert(&self, clinica: NovaClinica) -> Result<Clinica, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.subdominio_taken(&clinica.subdominio, None) {
            return Err(DatabaseError::UniqueViolation("uk_clinicas_subdominio".to_string()));
        }
        let saved = Clinica {
            id: tables.next_id(),
            nome_fantasia: clinica.nome_fantasia,
            subdominio: clinica.subdominio,
            ativo: clinica.ativo,
            created_at: Utc::now(),
        };
        tables.clinicas.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, clinica: &Clinica) -> Result<Clinica, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.subdominio_taken(&clinica.subdominio, Some(clinica.id)) {
            return Err(DatabaseError::UniqueViolation("uk_clinicas_subdominio".to_string()));
        }
        let stored = tables
            .clinicas
            .get_mut(&clinica.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("clinica {}", clinica.id)))?;
        stored.nome_fantasia = clinica.nome_fantasia.clone();
        stored.subdominio = clinica.subdominio.clone();
        stored.ativo = clinica.ativo;
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.clinicas.remove(&id).is_none() {
            return Err(DatabaseError::NotFound(format!("clinica {id}")));
        }
        tables.especialidades.retain(|_, e| e.clinica_id != id);
        tables.usuarios_admin.retain(|_, u| u.clinica_id != id);
        Ok(())
    }
}

#[async_trait]
impl EspecialidadeRepository for InMemoryStore {
    async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<Especialidade>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .especialidades
            .values()
            .filter(|e| e.clinica_id == clinica_id)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_clinica_id(
        &self,
        id: i64,
        clinica_id: i64,
    ) -> Result<Option<Especialidade>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .especialidades
            .get(&id)
            .filter(|e| e.clinica_id == clinica_id)
            .cloned())
    }

    async fn exists_by_nome_ignore_case_and_clinica_id(
        &self,
        nome: &str,
        clinica_id: i64,
    ) -> Result<bool, DatabaseError> {
        Ok(self.tables.read().await.nome_taken(nome, clinica_id, None))
    }

    async fn exists_by_nome_ignore_case_and_clinica_id_and_id_not(
        &self,
        nome: &str,
        clinica_id: i64,
        id: i64,
    ) -> Result<bool, DatabaseError> {
        Ok(self.tables.read().await.nome_taken(nome, clinica_id, Some(id)))
    }

    async fn insert(&self, especialidade: NovaEspecialidade) -> Result<Especialidade, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.clinicas.contains_key(&especialidade.clinica_id) {
            return Err(DatabaseError::ForeignKeyViolation("especialidades_clinica_id_fkey".to_string()));
        }
        if tables.nome_taken(&especialidade.nome, especialidade.clinica_id, None) {
            return Err(DatabaseError::UniqueViolation("uk_especialidades_clinica_nome".to_string()));
        }
        let saved = Especialidade {
            id: tables.next_id(),
            nome: especialidade.nome,
            clinica_id: especialidade.clinica_id,
        };
        tables.especialidades.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, especialidade: &Especialidade) -> Result<Especialidade, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.nome_taken(&especialidade.nome, especialidade.clinica_id, Some(especialidade.id)) {
            return Err(DatabaseError::UniqueViolation("uk_especialidades_clinica_nome".to_string()));
        }
        let stored = tables
            .especialidades
            .get_mut(&especialidade.id)
            .filter(|e| e.clinica_id == especialidade.clinica_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("especialidade {}", especialidade.id)))?;
        stored.nome = especialidade.nome.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .especialidades
            .get(&id)
            .is_some_and(|e| e.clinica_id == clinica_id);
        if !owned {
            return Err(DatabaseError::NotFound(format!("especialidade {id}")));
        }
        tables.especialidades.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UsuarioAdminRepository for InMemoryStore {
    async fn find_all_by_nome_contains_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<UsuarioAdmin>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .usuarios_admin
            .values()
            .filter(|u| contains_ignore_case(&u.nome, nome))
            .cloned()
            .collect())
    }

    async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<UsuarioAdmin>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .usuarios_admin
            .values()
            .filter(|u| u.clinica_id == clinica_id)
            .cloned()
            .collect())
    }

    async fn find_by_clinica_id_and_nome_contains_ignore_case(
        &self,
        clinica_id: i64,
        nome: &str,
    ) -> Result<Vec<UsuarioAdmin>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .usuarios_admin
            .values()
            .filter(|u| u.clinica_id == clinica_id && contains_ignore_case(&u.nome, nome))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UsuarioAdmin>, DatabaseError> {
        Ok(self.tables.read().await.usuarios_admin.get(&id).cloned())
    }

    async fn find_by_id_and_clinica_id(
        &self,
        id: i64,
        clinica_id: i64,
    ) -> Result<Option<UsuarioAdmin>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .usuarios_admin
            .get(&id)
            .filter(|u| u.clinica_id == clinica_id)
            .cloned())
    }

    async fn insert(&self, usuario: NovoUsuarioAdmin) -> Result<UsuarioAdmin, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.clinicas.contains_key(&usuario.clinica_id) {
            return Err(DatabaseError::ForeignKeyViolation("usuarios_admin_clinica_id_fkey".to_string()));
        }
        let saved = UsuarioAdmin {
            id: tables.next_id(),
            nome: usuario.nome,
            clinica_id: usuario.clinica_id,
        };
        tables.usuarios_admin.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, usuario: &UsuarioAdmin) -> Result<UsuarioAdmin, DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .usuarios_admin
            .get_mut(&usuario.id)
            .filter(|u| u.clinica_id == usuario.clinica_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("usuario_admin {}", usuario.id)))?;
        stored.nome = usuario.nome.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .usuarios_admin
            .get(&id)
            .is_some_and(|u| u.clinica_id == clinica_id);
        if !owned {
            return Err(DatabaseError::NotFound(format!("usuario_admin {id}")));
        }
        tables.usuarios_admin.remove(&id);
        Ok(())
    }
}
