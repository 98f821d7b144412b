use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UsuarioAdmin {
    pub id: i64,
    pub nome: String,
    pub clinica_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovoUsuarioAdmin {
    pub nome: String,
    pub clinica_id: i64,
}
