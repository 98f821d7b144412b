use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Clinica, Especialidade, NovaClinica, NovaEspecialidade, NovoUsuarioAdmin, UsuarioAdmin,
};
use crate::database::repository::{ClinicaRepository, EspecialidadeRepository, UsuarioAdminRepository};

const CLINICA_COLUMNS: &str = "id, nome_fantasia, subdominio, ativo, created_at";

/// Repositories backed by PostgreSQL. Tenancy is row-level: every scoped
/// statement carries `clinica_id` in its WHERE clause.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(manager: &DatabaseManager) -> Self {
        Self {
            pool: manager.pool().clone(),
        }
    }
}

fn not_found_unless_affected(rows: u64, what: &str) -> Result<(), DatabaseError> {
    if rows == 0 {
        return Err(DatabaseError::NotFound(what.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ClinicaRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Clinica>, DatabaseError> {
        let rows = sqlx::query_as::<_, Clinica>(&format!(
            "SELECT {CLINICA_COLUMNS} FROM clinicas ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Clinica>, DatabaseError> {
        let row = sqlx::query_as::<_, Clinica>(&format!(
            "SELECT {CLINICA_COLUMNS} FROM clinicas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_subdominio(&self, subdominio: &str) -> Result<Option<Clinica>, DatabaseError> {
        let row = sqlx::query_as::<_, Clinica>(&format!(
            "SELECT {CLINICA_COLUMNS} FROM clinicas WHERE subdominio = $1"
        ))
        .bind(subdominio)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clinicas WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn exists_by_subdominio(&self, subdominio: &str) -> Result<bool, DatabaseError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clinicas WHERE subdominio = $1)")
                .bind(subdominio)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists.0)
    }

    async fn insert(&self, clinica: NovaClinica) -> Result<Clinica, DatabaseError> {
        let row = sqlx::query_as::<_, Clinica>(&format!(
            "INSERT INTO clinicas (nome_fantasia, subdominio, ativo) VALUES ($1, $2, $3) \
             RETURNING {CLINICA_COLUMNS}"
        ))
        .bind(&clinica.nome_fantasia)
        .bind(&clinica.subdominio)
        .bind(clinica.ativo)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, clinica: &Clinica) -> Result<Clinica, DatabaseError> {
        let row = sqlx::query_as::<_, Clinica>(&format!(
            "UPDATE clinicas SET nome_fantasia = $2, subdominio = $3, ativo = $4 \
             WHERE id = $1 RETURNING {CLINICA_COLUMNS}"
        ))
        .bind(clinica.id)
        .bind(&clinica.nome_fantasia)
        .bind(&clinica.subdominio)
        .bind(clinica.ativo)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| DatabaseError::NotFound(format!("clinica {}", clinica.id)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        // especialidades and usuarios_admin go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM clinicas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_unless_affected(result.rows_affected(), "clinica")
    }
}

#[async_trait]
impl EspecialidadeRepository for PgStore {
    async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<Especialidade>, DatabaseError> {
        let rows = sqlx::query_as::<_, Especialidade>(
            "SELECT id, nome, clinica_id FROM especialidades WHERE clinica_id = $1 ORDER BY id",
        )
        .bind(clinica_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id_and_clinica_id(
        &self,
        id: i64,
        clinica_id: i64,
    ) -> Result<Option<Especialidade>, DatabaseError> {
        let row = sqlx::query_as::<_, Especialidade>(
            "SELECT id, nome, clinica_id FROM especialidades WHERE id = $1 AND clinica_id = $2",
        )
        .bind(id)
        .bind(clinica_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn exists_by_nome_ignore_case_and_clinica_id(
        &self,
        nome: &str,
        clinica_id: i64,
    ) -> Result<bool, DatabaseError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM especialidades WHERE LOWER(nome) = LOWER($1) AND clinica_id = $2)",
        )
        .bind(nome)
        .bind(clinica_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    async fn exists_by_nome_ignore_case_and_clinica_id_and_id_not(
        &self,
        nome: &str,
        clinica_id: i64,
        id: i64,
    ) -> Result<bool, DatabaseError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM especialidades \
             WHERE LOWER(nome) = LOWER($1) AND clinica_id = $2 AND id <> $3)",
        )
        .bind(nome)
        .bind(clinica_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    async fn insert(&self, especialidade: NovaEspecialidade) -> Result<Especialidade, DatabaseError> {
        let row = sqlx::query_as::<_, Especialidade>(
            "INSERT INTO especialidades (nome, clinica_id) VALUES ($1, $2) RETURNING id, nome, clinica_id",
        )
        .bind(&especialidade.nome)
        .bind(especialidade.clinica_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, especialidade: &Especialidade) -> Result<Especialidade, DatabaseError> {
        let row = sqlx::query_as::<_, Especialidade>(
            "UPDATE especialidades SET nome = $3 WHERE id = $1 AND clinica_id = $2 \
             RETURNING id, nome, clinica_id",
        )
        .bind(especialidade.id)
        .bind(especialidade.clinica_id)
        .bind(&especialidade.nome)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| DatabaseError::NotFound(format!("especialidade {}", especialidade.id)))
    }

    async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM especialidades WHERE id = $1 AND clinica_id = $2")
            .bind(id)
            .bind(clinica_id)
            .execute(&self.pool)
            .await?;
        not_found_unless_affected(result.rows_affected(), "especialidade")
    }
}

#[async_trait]
impl UsuarioAdminRepository for PgStore {
    async fn find_all_by_nome_contains_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<UsuarioAdmin>, DatabaseError> {
        // POSITION keeps '%' and '_' in the search term literal
        let rows = sqlx::query_as::<_, UsuarioAdmin>(
            "SELECT id, nome, clinica_id FROM usuarios_admin \
             WHERE POSITION(LOWER($1) IN LOWER(nome)) > 0 ORDER BY id",
        )
        .bind(nome)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<UsuarioAdmin>, DatabaseError> {
        let rows = sqlx::query_as::<_, UsuarioAdmin>(
            "SELECT id, nome, clinica_id FROM usuarios_admin WHERE clinica_id = $1 ORDER BY id",
        )
        .bind(clinica_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_clinica_id_and_nome_contains_ignore_case(
        &self,
        clinica_id: i64,
        nome: &str,
    ) -> Result<Vec<UsuarioAdmin>, DatabaseError> {
        let rows = sqlx::query_as::<_, UsuarioAdmin>(
            "SELECT id, nome, clinica_id FROM usuarios_admin \
             WHERE clinica_id = $1 AND POSITION(LOWER($2) IN LOWER(nome)) > 0 ORDER BY id",
        )
        .bind(clinica_id)
        .bind(nome)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UsuarioAdmin>, DatabaseError> {
        let row = sqlx::query_as::<_, UsuarioAdmin>(
            "SELECT id, nome, clinica_id FROM usuarios_admin WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id_and_clinica_id(
        &self,
        id: i64,
        clinica_id: i64,
    ) -> Result<Option<UsuarioAdmin>, DatabaseError> {
        let row = sqlx::query_as::<_, UsuarioAdmin>(
            "SELECT id, nome, clinica_id FROM usuarios_admin WHERE id = $1 AND clinica_id = $2",
        )
        .bind(id)
        .bind(clinica_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, usuario: NovoUsuarioAdmin) -> Result<UsuarioAdmin, DatabaseError> {
        let row = sqlx::query_as::<_, UsuarioAdmin>(
            "INSERT INTO usuarios_admin (nome, clinica_id) VALUES ($1, $2) RETURNING id, nome, clinica_id",
        )
        .bind(&usuario.nome)
        .bind(usuario.clinica_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, usuario: &UsuarioAdmin) -> Result<UsuarioAdmin, DatabaseError> {
        let row = sqlx::query_as::<_, UsuarioAdmin>(
            "UPDATE usuarios_admin SET nome = $3 WHERE id = $1 AND clinica_id = $2 \
             RETURNING id, nome, clinica_id",
        )
        .bind(usuario.id)
        .bind(usuario.clinica_id)
        .bind(&usuario.nome)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| DatabaseError::NotFound(format!("usuario_admin {}", usuario.id)))
    }

    async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM usuarios_admin WHERE id = $1 AND clinica_id = $2")
            .bind(id)
            .bind(clinica_id)
            .execute(&self.pool)
            .await?;
        not_found_unless_affected(result.rows_affected(), "usuario_admin")
    }
}
