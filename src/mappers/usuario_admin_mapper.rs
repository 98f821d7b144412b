use crate::database::models::UsuarioAdmin;
use crate::dtos::UsuarioAdminDto;

pub fn to_dto(usuario: UsuarioAdmin) -> UsuarioAdminDto {
    UsuarioAdminDto {
        id: usuario.id,
        nome: usuario.nome,
        clinica_id: usuario.clinica_id,
    }
}

pub fn to_dtos(usuarios: Vec<UsuarioAdmin>) -> Vec<UsuarioAdminDto> {
    usuarios.into_iter().map(to_dto).collect()
}
