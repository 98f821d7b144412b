use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Referenced row is gone, e.g. the clinic was deleted mid-request
    #[error("Foreign key violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation(db_err.constraint().unwrap_or("unique").to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                DatabaseError::ForeignKeyViolation(db_err.constraint().unwrap_or("foreign key").to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionError(err.to_string())
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// Storage bootstrap. Each statement is idempotent; the unique index on
/// `(clinica_id, LOWER(nome))` is the authoritative per-clinic guard.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS clinicas (
        id BIGSERIAL PRIMARY KEY,
        nome_fantasia VARCHAR(255) NOT NULL,
        subdominio VARCHAR(63) NOT NULL,
        ativo BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT uk_clinicas_subdominio UNIQUE (subdominio)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS especialidades (
        id BIGSERIAL PRIMARY KEY,
        nome VARCHAR(100) NOT NULL,
        clinica_id BIGINT NOT NULL REFERENCES clinicas (id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uk_especialidades_clinica_nome
        ON especialidades (clinica_id, LOWER(nome))
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS usuarios_admin (
        id BIGSERIAL PRIMARY KEY,
        nome VARCHAR(100) NOT NULL,
        clinica_id BIGINT NOT NULL REFERENCES clinicas (id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_usuarios_admin_clinica
        ON usuarios_admin (clinica_id)
    "#,
];

/// Owns the PostgreSQL connection pool shared by all repositories
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Open the pool described by the configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Created database pool (max_connections={})",
            config.max_connections
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create tables and unique indexes when missing
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Database schema verified");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
