use crate::database::models::{Clinica, NovaClinica};
use crate::dtos::{ClinicaCreateDto, ClinicaDto};

pub fn to_dto(clinica: Clinica) -> ClinicaDto {
    ClinicaDto {
        id: clinica.id,
        nome_fantasia: clinica.nome_fantasia,
        subdominio: clinica.subdominio,
        ativo: clinica.ativo,
        created_at: clinica.created_at,
    }
}

/// A clinic is active unless the body says otherwise. Expects a validated body.
pub fn to_entity(dto: ClinicaCreateDto) -> NovaClinica {
    NovaClinica {
        nome_fantasia: dto.nome_fantasia.as_deref().map(str::trim).unwrap_or_default().to_string(),
        subdominio: dto.subdominio.unwrap_or_default(),
        ativo: dto.ativo.unwrap_or(true),
    }
}
