// handlers/usuarios_admin.rs - /usuarios-admin handlers, scoped to the request's clinic

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::dtos::{UsuarioAdminCreateDto, UsuarioAdminDto, ValidJson};
use crate::error::ApiError;
use crate::mappers::usuario_admin_mapper;
use crate::state::AppState;
use crate::tenant::TenantContext;

use super::NomeQuery;

/// GET /usuarios-admin[?nome=]
pub async fn usuario_admin_list(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<NomeQuery>,
) -> Result<Json<Vec<UsuarioAdminDto>>, ApiError> {
    let usuarios = match query.nome.as_deref().map(str::trim) {
        Some(nome) if !nome.is_empty() => {
            state
                .usuarios_admin
                .find_all_by_clinic_and_nome_contains(tenant.clinica_id(), nome)
                .await?
        }
        _ => state.usuarios_admin.find_all_by_clinic(tenant.clinica_id()).await?,
    };
    Ok(Json(usuario_admin_mapper::to_dtos(usuarios)))
}

/// GET /usuarios-admin/:id
pub async fn usuario_admin_show(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
) -> Result<Json<UsuarioAdminDto>, ApiError> {
    let usuario = state
        .usuarios_admin
        .find_by_id_and_clinic(id, tenant.clinica_id())
        .await?;
    Ok(Json(usuario_admin_mapper::to_dto(usuario)))
}

/// POST /usuarios-admin
pub async fn usuario_admin_create(
    State(state): State<AppState>,
    tenant: TenantContext,
    ValidJson(dto): ValidJson<UsuarioAdminCreateDto>,
) -> Result<(StatusCode, Json<UsuarioAdminDto>), ApiError> {
    let usuario = state
        .usuarios_admin
        .create(tenant.clinica_id(), dto.nome())
        .await?;
    Ok((StatusCode::CREATED, Json(usuario_admin_mapper::to_dto(usuario))))
}

/// PUT /usuarios-admin/:id
pub async fn usuario_admin_update(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
    ValidJson(dto): ValidJson<UsuarioAdminCreateDto>,
) -> Result<Json<UsuarioAdminDto>, ApiError> {
    let usuario = state
        .usuarios_admin
        .update(id, tenant.clinica_id(), dto.nome())
        .await?;
    Ok(Json(usuario_admin_mapper::to_dto(usuario)))
}

/// DELETE /usuarios-admin/:id
pub async fn usuario_admin_delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.usuarios_admin.delete(id, tenant.clinica_id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
