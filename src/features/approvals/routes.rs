use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::approvals::handlers;
use crate::features::approvals::services::ApprovalService;

/// Create routes for the approval queue
pub fn routes(service: Arc<ApprovalService>) -> Router {
    Router::new()
        .route("/api/approvals", get(handlers::list_approvals))
        .route("/api/approvals/decision", post(handlers::decide_approvals))
        .route(
            "/api/approvals/{id}",
            get(handlers::get_approval).delete(handlers::delete_approval),
        )
        .route("/api/approvals/{id}/letter", get(handlers::download_letter))
        .with_state(service)
}
