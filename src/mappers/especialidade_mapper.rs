use crate::database::models::Especialidade;
use crate::dtos::EspecialidadeDto;
use crate::tenant::TenantContext;

/// The clinic name comes from the context resolved for this request
pub fn to_dto(especialidade: Especialidade, tenant: &TenantContext) -> EspecialidadeDto {
    let clinica_nome_fantasia = if especialidade.clinica_id == tenant.clinica_id() {
        tenant.nome_fantasia().map(str::to_string)
    } else {
        None
    };

    EspecialidadeDto {
        id: especialidade.id,
        nome: especialidade.nome,
        clinica_id: especialidade.clinica_id,
        clinica_nome_fantasia,
    }
}
