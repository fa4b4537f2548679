//! Dashboard landing page.
//!
//! `GET /api/dashboard/summary` is open to every role.

pub mod derive;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;
