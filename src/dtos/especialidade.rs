use serde::{Deserialize, Serialize};

use super::{check_text, into_result, FieldErrors, Validate};

pub const NOME_MIN: usize = 5;
pub const NOME_MAX: usize = 35;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EspecialidadeCreateDto {
    pub nome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspecialidadeDto {
    pub id: i64,
    pub nome: String,
    pub clinica_id: i64,
    pub clinica_nome_fantasia: Option<String>,
}

impl EspecialidadeCreateDto {
    /// Name as sent; empty when absent. Only meaningful after validation.
    pub fn nome(&self) -> &str {
        self.nome.as_deref().unwrap_or_default()
    }
}

impl Validate for EspecialidadeCreateDto {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_text(
            &mut errors,
            "nome",
            self.nome.as_deref(),
            NOME_MIN,
            NOME_MAX,
            "O nome da especialidade é obrigatório",
            "O nome deve ter entre 5 e 35 caracteres",
        );
        into_result(errors)
    }
}
