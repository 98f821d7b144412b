//! Entity and DTO conversion.

pub mod clinica_mapper;
pub mod especialidade_mapper;
pub mod usuario_admin_mapper;
