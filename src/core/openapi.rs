use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::approvals::{dtos as approvals_dtos, handlers as approvals_handlers};
use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::equipment::{dtos as equipment_dtos, handlers as equipment_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        auth::handlers::get_menu,
        auth::handlers::check_access,
        // Dashboard
        dashboard_handlers::get_summary,
        // Equipment
        equipment_handlers::list_equipment,
        equipment_handlers::get_options,
        equipment_handlers::create_equipment,
        equipment_handlers::update_equipment,
        equipment_handlers::delete_equipment,
        // Reports
        reports_handlers::create_report,
        // Approvals
        approvals_handlers::list_approvals,
        approvals_handlers::get_approval,
        approvals_handlers::delete_approval,
        approvals_handlers::decide_approvals,
        approvals_handlers::download_letter,
        // Users
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::Role,
            auth::gate::GateDecision,
            auth::gate::MenuItem,
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            auth::dtos::MeResponseDto,
            auth::dtos::AccessResponseDto,
            auth::dtos::MenuResponseDto,
            ApiResponse<auth::dtos::LoginResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            ApiResponse<auth::dtos::AccessResponseDto>,
            ApiResponse<auth::dtos::MenuResponseDto>,
            // Dashboard
            dashboard_dtos::StatCardDto,
            dashboard_dtos::ChartSeriesDto,
            dashboard_dtos::ApprovalChartDto,
            dashboard_dtos::RatioSource,
            dashboard_dtos::LayakRatioDto,
            dashboard_dtos::RecentActivityDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            // Equipment
            equipment_dtos::AssetDto,
            equipment_dtos::CreateAssetDto,
            equipment_dtos::UpdateAssetDto,
            equipment_dtos::ManufacturerItemsDto,
            equipment_dtos::EquipmentOptionsDto,
            ApiResponse<equipment_dtos::AssetDto>,
            ApiResponse<Vec<equipment_dtos::AssetDto>>,
            ApiResponse<equipment_dtos::EquipmentOptionsDto>,
            // Reports
            reports_dtos::EvidenceFileDto,
            reports_dtos::CreateReportDto,
            reports_dtos::ReportSubmittedDto,
            ApiResponse<reports_dtos::ReportSubmittedDto>,
            // Approvals
            approvals_dtos::ApprovalRowDto,
            approvals_dtos::EvidenceDto,
            approvals_dtos::ReportDetailDto,
            approvals_dtos::Verdict,
            approvals_dtos::DecisionRequestDto,
            approvals_dtos::DecisionFailureDto,
            approvals_dtos::DecisionOutcomeDto,
            ApiResponse<Vec<approvals_dtos::ApprovalRowDto>>,
            ApiResponse<approvals_dtos::ReportDetailDto>,
            ApiResponse<approvals_dtos::DecisionOutcomeDto>,
            // Users
            users_dtos::UserDto,
            users_dtos::UserFormDto,
            ApiResponse<Vec<users_dtos::UserDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Login, logout and page access"),
        (name = "dashboard", description = "Dashboard widgets"),
        (name = "equipment", description = "Asset management (Manajemen Aset)"),
        (name = "reports", description = "Filing item condition reports (Pelaporan Barang)"),
        (name = "approvals", description = "Approval queue and request letters (Approval Pelaporan)"),
        (name = "users", description = "User management (Manajemen User)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Dashboard Aset API",
        version = "0.1.0",
        description = "Backend-for-frontend of the asset reporting dashboard",
    )
)]
pub struct ApiDoc;

/// Adds the session bearer scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("Session ID")
                        .description(Some("Session token returned by /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
