//! Asset register (Manajemen Aset).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Roles | Description |
//! |--------|----------|-------|-------------|
//! | GET | `/api/equipment` | admin, pegawai | List assets |
//! | GET | `/api/equipment/options` | admin, pegawai | Report form selectors |
//! | POST | `/api/equipment` | admin | Register asset |
//! | PUT | `/api/equipment/{id}` | admin | Edit asset |
//! | DELETE | `/api/equipment/{id}` | admin | Delete asset |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::EquipmentService;
