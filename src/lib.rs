pub mod app;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod mappers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod tenant;

pub use app::app;
pub use state::AppState;
