pub mod dtos;
pub mod gate;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;
pub mod session_store;

pub use session_store::SessionStore;
