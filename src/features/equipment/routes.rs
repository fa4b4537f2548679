use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::equipment::handlers;
use crate::features::equipment::services::EquipmentService;

/// Create routes for the asset register
///
/// Reading is open to admin and pegawai; writing is admin only.
pub fn routes(service: Arc<EquipmentService>) -> Router {
    Router::new()
        .route(
            "/api/equipment",
            get(handlers::list_equipment).post(handlers::create_equipment),
        )
        .route("/api/equipment/options", get(handlers::get_options))
        .route(
            "/api/equipment/{id}",
            put(handlers::update_equipment).delete(handlers::delete_equipment),
        )
        .with_state(service)
}
