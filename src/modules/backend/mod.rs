//! Client side of the external REST backend (assets, reports, users, login)

pub mod api_client;
pub mod auth_client;
pub mod gateway;
pub mod models;

pub use gateway::{DashboardBackend, HttpBackend};
