// handlers/mod.rs - HTTP handlers grouped by resource
//
// Clinic routes run without a tenant; specialty and admin user routes
// require the TenantContext bound by the tenant middleware.

pub mod clinicas;
pub mod especialidades;
pub mod system;
pub mod usuarios_admin;

use serde::Deserialize;

/// `?nome=` filter shared by the admin user searches
#[derive(Debug, Default, Deserialize)]
pub struct NomeQuery {
    pub nome: Option<String>,
}
