use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{into_result, FieldErrors, Validate};

/// Column widths of `clinicas.nome_fantasia` and `clinicas.subdominio`
pub const NOME_FANTASIA_MAX: usize = 255;
pub const SUBDOMINIO_MAX: usize = 63;

/// Body of `POST /clinicas` and `PUT /clinicas/:id`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicaCreateDto {
    pub nome_fantasia: Option<String>,
    pub subdominio: Option<String>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicaDto {
    pub id: i64,
    pub nome_fantasia: String,
    pub subdominio: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

fn is_valid_subdominio(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

impl Validate for ClinicaCreateDto {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let nome_fantasia = self.nome_fantasia.as_deref().map(str::trim).unwrap_or_default();
        if nome_fantasia.is_empty() {
            errors.insert("nomeFantasia".into(), "O nome fantasia é obrigatório".into());
        } else if nome_fantasia.chars().count() > NOME_FANTASIA_MAX {
            errors.insert(
                "nomeFantasia".into(),
                "O nome fantasia deve ter no máximo 255 caracteres".into(),
            );
        }

        let subdominio = self.subdominio.as_deref().unwrap_or_default();
        if subdominio.trim().is_empty() {
            errors.insert("subdominio".into(), "O subdomínio é obrigatório".into());
        } else if !is_valid_subdominio(subdominio) {
            errors.insert(
                "subdominio".into(),
                "Subdomínio deve conter apenas letras minúsculas, números e hífens".into(),
            );
        } else if subdominio.chars().count() > SUBDOMINIO_MAX {
            errors.insert(
                "subdominio".into(),
                "O subdomínio deve ter no máximo 63 caracteres".into(),
            );
        }

        into_result(errors)
    }
}
