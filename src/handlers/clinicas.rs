// handlers/clinicas.rs - /clinicas handlers (platform administration, no tenant)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::dtos::{ClinicaCreateDto, ClinicaDto, UsuarioAdminDto, ValidJson};
use crate::error::ApiError;
use crate::mappers::{clinica_mapper, usuario_admin_mapper};
use crate::state::AppState;

use super::NomeQuery;

/// GET /clinicas
pub async fn clinica_list(State(state): State<AppState>) -> Result<Json<Vec<ClinicaDto>>, ApiError> {
    let clinicas = state.clinicas.find_all().await?;
    Ok(Json(clinicas.into_iter().map(clinica_mapper::to_dto).collect()))
}

/// GET /clinicas/:id
pub async fn clinica_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClinicaDto>, ApiError> {
    let clinica = state.clinicas.find_by_id(id).await?;
    Ok(Json(clinica_mapper::to_dto(clinica)))
}

/// POST /clinicas
pub async fn clinica_create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<ClinicaCreateDto>,
) -> Result<(StatusCode, Json<ClinicaDto>), ApiError> {
    let clinica = state.clinicas.create(clinica_mapper::to_entity(dto)).await?;
    Ok((StatusCode::CREATED, Json(clinica_mapper::to_dto(clinica))))
}

/// PUT /clinicas/:id
pub async fn clinica_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidJson(dto): ValidJson<ClinicaCreateDto>,
) -> Result<Json<ClinicaDto>, ApiError> {
    let clinica = state.clinicas.update(id, clinica_mapper::to_entity(dto)).await?;
    Ok(Json(clinica_mapper::to_dto(clinica)))
}

/// DELETE /clinicas/:id
pub async fn clinica_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.clinicas.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /clinicas/:id/usuarios-admin
pub async fn clinica_usuarios_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<UsuarioAdminDto>>, ApiError> {
    state.clinicas.find_by_id(id).await?;
    let usuarios = state.usuarios_admin.find_all_by_clinic(id).await?;
    Ok(Json(usuario_admin_mapper::to_dtos(usuarios)))
}

/// GET /clinicas/usuarios-admin?nome= - search across every clinic
pub async fn usuarios_admin_search(
    State(state): State<AppState>,
    Query(query): Query<NomeQuery>,
) -> Result<Json<Vec<UsuarioAdminDto>>, ApiError> {
    let nome = query.nome.unwrap_or_default();
    let usuarios = state.usuarios_admin.find_all_by_nome_contains(&nome).await?;
    Ok(Json(usuario_admin_mapper::to_dtos(usuarios)))
}

/// GET /clinicas/usuarios-admin/:id - point lookup without a clinic
pub async fn usuario_admin_show_any(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UsuarioAdminDto>, ApiError> {
    let usuario = state.usuarios_admin.find_by_id(id).await?;
    Ok(Json(usuario_admin_mapper::to_dto(usuario)))
}
