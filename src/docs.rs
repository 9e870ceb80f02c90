// src/docs.rs

use utoipa::OpenApi;

use crate::{handlers, models, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SwitchON API",
        description = "Onboarding, AI-generated strategy and outreach, approvals and campaign analytics"
    ),
    paths(
        // --- Onboarding ---
        handlers::onboarding::create_company,
        handlers::onboarding::get_company,
        handlers::onboarding::update_company,
        handlers::onboarding::create_user,
        handlers::onboarding::list_company_users,
        handlers::onboarding::list_company_leads,

        // --- Strategy ---
        handlers::strategy::generate_strategy,
        handlers::strategy::get_strategy,
        handlers::strategy::list_company_strategies,
        handlers::strategy::update_strategy_status,
        handlers::strategy::update_strategy_content,

        // --- Content ---
        handlers::content::generate_content,
        handlers::content::get_campaign,
        handlers::content::list_company_campaigns,
        handlers::content::update_campaign_status,
        handlers::content::update_campaign_content,
        handlers::content::get_templates,

        // --- Actions ---
        handlers::actions::list_company_actions,
        handlers::actions::get_action,
        handlers::actions::create_action,
        handlers::actions::update_action_status,
        handlers::actions::assign_action,

        // --- Analytics ---
        handlers::analytics::get_dashboard,
        handlers::analytics::get_campaign_analytics,
        handlers::analytics::record_metrics,
        handlers::analytics::optimize_campaign,

        // --- Leads ---
        handlers::leads::create_lead,
        handlers::leads::get_lead,
        handlers::leads::qualify_lead,
    ),
    components(
        schemas(
            // --- Entities ---
            models::company::Company,
            models::company::IcpProfile,
            models::user::User,
            models::strategy::Strategy,
            models::strategy::StrategyStatus,
            models::lead::Lead,
            models::campaign::Campaign,
            models::campaign::CampaignStatus,
            models::campaign::CampaignMetric,
            models::campaign::CompanyMetricRow,
            models::action::Action,
            models::action::ActionStatus,
            models::meeting::Meeting,

            // --- KPIs ---
            services::kpi::Period,
            services::kpi::MetricTotals,
            services::kpi::DashboardKpis,
            services::kpi::DailyMetric,
            services::kpi::CampaignPerformance,
            services::templates::ContentTemplate,

            // --- Payloads ---
            handlers::StatusPayload,
            handlers::NotifyPayload,
            handlers::onboarding::OnboardCompanyPayload,
            handlers::onboarding::CompanySection,
            handlers::onboarding::FinancialSection,
            handlers::onboarding::MarketingSection,
            handlers::onboarding::UpdateCompanyPayload,
            handlers::onboarding::CreateUserPayload,
            handlers::strategy::GenerateStrategyPayload,
            handlers::strategy::UpdateStrategyContentPayload,
            handlers::content::GenerateContentPayload,
            handlers::content::UpdateCampaignContentPayload,
            handlers::actions::CreateActionPayload,
            handlers::actions::AssignActionPayload,
            handlers::analytics::RecordMetricsPayload,
            handlers::leads::CreateLeadPayload,

            // --- Responses ---
            handlers::analytics::Dashboard,
            handlers::analytics::DashboardRows,
            handlers::analytics::CampaignAnalytics,
            handlers::analytics::Optimization,
            handlers::leads::Qualification,
        )
    ),
    tags(
        (name = "Onboarding", description = "Company and user onboarding"),
        (name = "Strategy", description = "Go-to-market strategies"),
        (name = "Content", description = "Outreach campaigns and templates"),
        (name = "Actions", description = "Human approval of generated work"),
        (name = "Analytics", description = "KPIs, campaign metrics and optimization"),
        (name = "Leads", description = "Leads and qualification")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for prefix in [
            "/api/onboarding",
            "/api/strategy",
            "/api/content",
            "/api/actions",
            "/api/analytics",
            "/api/leads",
        ] {
            assert!(paths.iter().any(|p| p.starts_with(prefix)), "missing {prefix}");
        }
    }
}
