pub mod clinica;
pub mod especialidade;
pub mod usuario_admin;

pub use clinica::{Clinica, NovaClinica};
pub use especialidade::{Especialidade, NovaEspecialidade};
pub use usuario_admin::{NovoUsuarioAdmin, UsuarioAdmin};
