//! Filing item reports (Pelaporan Barang).
//!
//! | Method | Endpoint | Roles | Description |
//! |--------|----------|-------|-------------|
//! | POST | `/api/reports` | admin, pegawai | File a report |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ReportService;
