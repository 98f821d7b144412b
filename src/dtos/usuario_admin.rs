use serde::{Deserialize, Serialize};

use super::{check_text, into_result, FieldErrors, Validate};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsuarioAdminCreateDto {
    pub nome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioAdminDto {
    pub id: i64,
    pub nome: String,
    pub clinica_id: i64,
}

impl UsuarioAdminCreateDto {
    pub fn nome(&self) -> &str {
        self.nome.as_deref().unwrap_or_default()
    }
}

impl Validate for UsuarioAdminCreateDto {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_text(
            &mut errors,
            "nome",
            self.nome.as_deref(),
            3,
            100,
            "O nome é obrigatório",
            "O nome deve ter entre 3 e 100 caracteres",
        );
        into_result(errors)
    }
}
