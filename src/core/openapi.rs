use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::analysis::{dtos as analysis_dtos, handlers as analysis_handlers, models as analysis_models};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::chatbot::{dtos as chatbot_dtos, handlers as chatbot_handlers, models as chatbot_models};
use crate::features::map::{
    dtos as map_dtos, handlers as map_handlers, models as map_models, services as map_services,
};
use crate::features::pages::{handlers as pages_handlers, models as pages_models};
use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers, models as regions_models};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::simulation::{
    dtos as simulation_dtos, handlers as simulation_handlers, models as simulation_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::get_me,
        auth_handlers::get_session,
        auth_handlers::login,
        auth_handlers::register,
        auth_handlers::logout,
        auth_handlers::google_sign_in,
        auth_handlers::oauth_callback,
        // Regions
        regions_handlers::list_provinces,
        regions_handlers::list_regencies,
        regions_handlers::list_sub_districts,
        regions_handlers::list_facilities,
        regions_handlers::search_regions,
        // Map
        map_handlers::record_viewport,
        map_handlers::resolve_viewport,
        map_handlers::list_facilities,
        map_handlers::clear_map,
        // Analysis
        analysis_handlers::get_heatmap,
        analysis_handlers::get_priority_score,
        analysis_handlers::get_summary,
        analysis_handlers::get_sub_district_details,
        // Simulation
        simulation_handlers::run_simulation,
        simulation_handlers::get_latest_simulation,
        // Reports
        reports_handlers::export_report,
        // Chatbot
        chatbot_handlers::start_chat,
        chatbot_handlers::assist,
        // Pages (public)
        pages_handlers::get_error_page,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::SessionUser,
            auth_model::AuthStatus,
            auth_dtos::LoginRequestDto,
            auth_dtos::RegisterRequestDto,
            auth_dtos::AuthSessionDto,
            ApiResponse<auth_model::SessionUser>,
            ApiResponse<auth_dtos::AuthSessionDto>,
            // Regions
            regions_models::RegionKind,
            regions_models::RegionRef,
            regions_dtos::ProvinceResponseDto,
            regions_dtos::RegencyResponseDto,
            regions_dtos::SubDistrictResponseDto,
            regions_dtos::FacilityResponseDto,
            regions_dtos::RegionSearchResponseDto,
            ApiResponse<Vec<regions_dtos::ProvinceResponseDto>>,
            ApiResponse<Vec<regions_dtos::RegencyResponseDto>>,
            ApiResponse<Vec<regions_dtos::SubDistrictResponseDto>>,
            ApiResponse<Vec<regions_dtos::FacilityResponseDto>>,
            ApiResponse<regions_dtos::RegionSearchResponseDto>,
            // Map
            map_models::Coordinate,
            map_models::BoundingBox,
            map_models::FacilityType,
            map_services::LoadStatus,
            map_dtos::ViewportRequestDto,
            map_dtos::MapStateDto,
            map_dtos::LoadOutcomeDto,
            map_dtos::ResolveResponseDto,
            ApiResponse<map_dtos::MapStateDto>,
            ApiResponse<map_dtos::ResolveResponseDto>,
            // Analysis
            analysis_models::HeatmapPoint,
            analysis_models::HeatmapData,
            analysis_models::SubDistrictScore,
            analysis_models::PriorityData,
            analysis_models::FacilityOverview,
            analysis_models::ExistingFacility,
            analysis_models::SubDistrictDetails,
            analysis_dtos::CoverageCardDto,
            analysis_dtos::PriorityResponseDto,
            ApiResponse<analysis_models::HeatmapData>,
            ApiResponse<analysis_dtos::PriorityResponseDto>,
            ApiResponse<analysis_dtos::CoverageCardDto>,
            ApiResponse<analysis_models::SubDistrictDetails>,
            // Simulation
            simulation_dtos::RunSimulationRequestDto,
            simulation_models::OptimizedFacility,
            simulation_models::SimulationResult,
            ApiResponse<simulation_models::SimulationResult>,
            // Reports
            reports_dtos::ExportRequestDto,
            reports_dtos::ExportResponseDto,
            ApiResponse<reports_dtos::ExportResponseDto>,
            // Chatbot
            chatbot_models::SuggestedAction,
            chatbot_dtos::ChatMessageRequestDto,
            chatbot_dtos::ChatReplyDto,
            ApiResponse<chatbot_dtos::ChatReplyDto>,
            // Pages
            pages_models::ErrorPage,
            ApiResponse<pages_models::ErrorPage>,
        )
    ),
    tags(
        (name = "auth", description = "Sign-in, sign-up, Google OAuth and session state"),
        (name = "regions", description = "Provinces, regencies, sub-districts and their facilities"),
        (name = "map", description = "Viewport-driven facility loading for the map"),
        (name = "analysis", description = "Coverage heatmap, priority ranking and summaries"),
        (name = "simulation", description = "Facility placement simulation"),
        (name = "reports", description = "Report export"),
        (name = "chatbot", description = "Planning assistant"),
        (name = "pages", description = "Error page content (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Cliva API",
        version = "0.1.0",
        description = "Backend-for-frontend of the Cliva healthcare facility planning dashboard",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("cliva_session"))),
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
