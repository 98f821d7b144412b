//! Request and response bodies.
//!
//! Request bodies implement [`Validate`] and are taken through [`ValidJson`],
//! which rejects malformed JSON and reports every violated field at once.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub mod clinica;
pub mod especialidade;
pub mod usuario_admin;

pub use clinica::{ClinicaCreateDto, ClinicaDto};
pub use especialidade::{EspecialidadeCreateDto, EspecialidadeDto};
pub use usuario_admin::{UsuarioAdminCreateDto, UsuarioAdminDto};

/// Field name (as it appears in the JSON body) to violation message
pub type FieldErrors = HashMap<String, String>;

pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Checks a required free-text field whose trimmed length must stay in `min..=max`.
/// An absent or `null` value counts as blank.
pub(crate) fn check_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
    required_message: &str,
    length_message: &str,
) {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.insert(field.to_string(), required_message.to_string());
        return;
    }

    let len = trimmed.chars().count();
    if len < min || len > max {
        errors.insert(field.to_string(), length_message.to_string());
    }
}

pub(crate) fn into_result(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// JSON body extractor that also runs [`Validate`]
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

        value.validate().map_err(|fields| {
            tracing::debug!("Request body rejected: {:?}", fields);
            ApiError::validation_error("Dados inválidos", fields)
        })?;

        Ok(ValidJson(value))
    }
}
