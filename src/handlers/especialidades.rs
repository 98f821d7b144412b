// handlers/especialidades.rs - /especialidades handlers, scoped to the request's clinic

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::dtos::{EspecialidadeCreateDto, EspecialidadeDto, ValidJson};
use crate::error::ApiError;
use crate::mappers::especialidade_mapper;
use crate::state::AppState;
use crate::tenant::TenantContext;

/// GET /especialidades
pub async fn especialidade_list(
    State(state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<EspecialidadeDto>>, ApiError> {
    let especialidades = state.especialidades.list_by_clinic(tenant.clinica_id()).await?;
    Ok(Json(
        especialidades
            .into_iter()
            .map(|e| especialidade_mapper::to_dto(e, &tenant))
            .collect(),
    ))
}

/// GET /especialidades/:id
pub async fn especialidade_show(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
) -> Result<Json<EspecialidadeDto>, ApiError> {
    let especialidade = state
        .especialidades
        .get_by_id_and_clinic(id, tenant.clinica_id())
        .await?;
    Ok(Json(especialidade_mapper::to_dto(especialidade, &tenant)))
}

/// POST /especialidades
pub async fn especialidade_create(
    State(state): State<AppState>,
    tenant: TenantContext,
    ValidJson(dto): ValidJson<EspecialidadeCreateDto>,
) -> Result<(StatusCode, Json<EspecialidadeDto>), ApiError> {
    let especialidade = state
        .especialidades
        .create(tenant.clinica_id(), dto.nome())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(especialidade_mapper::to_dto(especialidade, &tenant)),
    ))
}

/// PUT /especialidades/:id
pub async fn especialidade_update(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
    ValidJson(dto): ValidJson<EspecialidadeCreateDto>,
) -> Result<Json<EspecialidadeDto>, ApiError> {
    let especialidade = state
        .especialidades
        .update(id, tenant.clinica_id(), dto.nome())
        .await?;
    Ok(Json(especialidade_mapper::to_dto(especialidade, &tenant)))
}

/// DELETE /especialidades/:id
pub async fn especialidade_delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.especialidades.delete(id, tenant.clinica_id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
