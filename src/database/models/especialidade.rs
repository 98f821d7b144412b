use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Especialidade {
    pub id: i64,
    pub nome: String,
    pub clinica_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovaEspecialidade {
    pub nome: String,
    pub clinica_id: i64,
}
