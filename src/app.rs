// src/app.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn router(app_state: AppState) -> Router {
    let onboarding_routes = Router::new()
        .route("/company", post(handlers::onboarding::create_company))
        .route(
            "/company/{id}",
            get(handlers::onboarding::get_company).put(handlers::onboarding::update_company),
        )
        .route("/company/{id}/users", get(handlers::onboarding::list_company_users))
        .route("/company/{id}/leads", get(handlers::onboarding::list_company_leads))
        .route("/user", post(handlers::onboarding::create_user));

    let strategy_routes = Router::new()
        .route("/generate", post(handlers::strategy::generate_strategy))
        .route("/company/{company_id}", get(handlers::strategy::list_company_strategies))
        .route("/{id}", get(handlers::strategy::get_strategy))
        .route("/{id}/status", put(handlers::strategy::update_strategy_status))
        .route("/{id}/content", put(handlers::strategy::update_strategy_content));

    let content_routes = Router::new()
        .route("/generate", post(handlers::content::generate_content))
        .route("/campaign/{id}", get(handlers::content::get_campaign))
        .route("/campaign/{id}/status", put(handlers::content::update_campaign_status))
        .route("/campaign/{id}/content", put(handlers::content::update_campaign_content))
        .route("/company/{company_id}", get(handlers::content::list_company_campaigns))
        .route("/templates/{channel}", get(handlers::content::get_templates));

    let action_routes = Router::new()
        .route("/", post(handlers::actions::create_action))
        .route("/company/{company_id}", get(handlers::actions::list_company_actions))
        .route("/{id}", get(handlers::actions::get_action))
        .route("/{id}/status", put(handlers::actions::update_action_status))
        .route("/{id}/assign", put(handlers::actions::assign_action));

    let analytics_routes = Router::new()
        .route("/dashboard/{company_id}", get(handlers::analytics::get_dashboard))
        .route("/campaign/{campaign_id}", get(handlers::analytics::get_campaign_analytics))
        .route("/metrics", post(handlers::analytics::record_metrics))
        .route("/optimize/{campaign_id}", post(handlers::analytics::optimize_campaign));

    let lead_routes = Router::new()
        .route("/", post(handlers::leads::create_lead))
        .route("/{id}", get(handlers::leads::get_lead))
        .route("/{id}/qualify", post(handlers::leads::qualify_lead));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/onboarding", onboarding_routes)
        .nest("/api/strategy", strategy_routes)
        .nest("/api/content", content_routes)
        .nest("/api/actions", action_routes)
        .nest("/api/analytics", analytics_routes)
        .nest("/api/leads", lead_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
