//! Approval queue (Approval Pelaporan).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Roles | Description |
//! |--------|----------|-------|-------------|
//! | GET | `/api/approvals` | all | List rows, `?q=` filters name or submitter |
//! | POST | `/api/approvals/decision` | atasan | Approve or reject selected reports |
//! | GET | `/api/approvals/{id}` | all | Report detail |
//! | DELETE | `/api/approvals/{id}` | all | Delete report |
//! | GET | `/api/approvals/{id}/letter` | all | Approval request letter (PDF) |

pub mod aggregator;
pub mod dtos;
pub mod handlers;
pub mod letter;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ApprovalService;
