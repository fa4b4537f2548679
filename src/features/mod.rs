pub mod approvals;
pub mod auth;
pub mod dashboard;
pub mod equipment;
pub mod reports;
pub mod users;
