//! User management (Manajemen User), admin only.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users` | List users, `?q=` filters name or email |
//! | POST | `/api/users` | Create user |
//! | PUT | `/api/users/{id}` | Edit user |
//! | DELETE | `/api/users/{id}` | Delete user |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UserService;
