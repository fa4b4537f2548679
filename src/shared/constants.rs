/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size used when the report form or the dashboard loads equipment
pub const REPORT_FORM_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - manages assets and users, can file reports
pub const ROLE_ADMIN: &str = "admin";

/// Staff role - files damage/condition reports
pub const ROLE_PEGAWAI: &str = "pegawai";

/// Supervisor role - the only role allowed to approve or reject reports
pub const ROLE_ATASAN: &str = "atasan";

// =============================================================================
// PAGES
// =============================================================================

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const DASHBOARD_PATH: &str = "/dashboard";

// =============================================================================
// APPROVAL STATUS LABELS
// =============================================================================

/// Status given to every freshly submitted evidence entry
pub const STATUS_MENUNGGU_APPROVE: &str = "menunggu approve";

/// Display status for a report that has no evidence yet
pub const STATUS_DALAM_PROSES: &str = "Dalam Proses";

pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// Placeholder submitter name when a report has no evidence
pub const UNKNOWN_SUBMITTER: &str = "-";
