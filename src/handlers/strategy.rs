// src/handlers/strategy.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{non_empty, StatusPayload};
use crate::{
    common::{
        error::AppError,
        extract::ValidatedJson,
        response::{DataResponse, MutationResponse},
    },
    config::AppState,
    models::strategy::{NewStrategy, Strategy, StrategyStatus},
    services::SideEffect,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateStrategyPayload {
    pub company_id: Uuid,

    // Receives the approval request
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStrategyContentPayload {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub title: Option<String>,
}

// POST /api/strategy/generate
#[utoipa::path(
    post,
    path = "/api/strategy/generate",
    tag = "Strategy",
    request_body = GenerateStrategyPayload,
    responses(
        (status = 201, description = "Draft strategy generated", body = Strategy),
        (status = 404, description = "Company not found"),
        (status = 500, description = "Completion API failure")
    )
)]
pub async fn generate_strategy(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GenerateStrategyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .store
        .find_company(payload.company_id)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    let content = app_state.agents.strategy_architect.generate(&company).await?;

    let strategy = app_state
        .store
        .create_strategy(NewStrategy {
            company_id: company.id,
            title: format!("Go-To-Market Strategy for {}", company.name),
            content,
        })
        .await?;

    tracing::info!(strategy_id = %strategy.id, company_id = %company.id, "strategy generated");

    SideEffect::attempt(
        "strategy_approval",
        app_state
            .notifier
            .request_strategy_approval(&strategy, payload.user_id.as_deref()),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Strategy generated successfully", strategy)),
    ))
}

// GET /api/strategy/{id}
#[utoipa::path(
    get,
    path = "/api/strategy/{id}",
    tag = "Strategy",
    params(("id" = Uuid, Path, description = "Strategy id")),
    responses(
        (status = 200, description = "Strategy", body = Strategy),
        (status = 404, description = "Strategy not found")
    )
)]
pub async fn get_strategy(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let strategy = app_state
        .store
        .find_strategy(id)
        .await?
        .ok_or(AppError::NotFound("Strategy"))?;

    Ok(Json(DataResponse::new(strategy)))
}

// GET /api/strategy/company/{company_id}
#[utoipa::path(
    get,
    path = "/api/strategy/company/{company_id}",
    tag = "Strategy",
    params(("company_id" = Uuid, Path, description = "Company id")),
    responses((status = 200, description = "Strategies, newest first", body = Vec<Strategy>))
)]
pub async fn list_company_strategies(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let strategies = app_state.store.list_strategies_by_company(company_id).await?;
    Ok(Json(DataResponse::new(strategies)))
}

// PUT /api/strategy/{id}/status
#[utoipa::path(
    put,
    path = "/api/strategy/{id}/status",
    tag = "Strategy",
    params(("id" = Uuid, Path, description = "Strategy id")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Strategy),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Strategy not found")
    )
)]
pub async fn update_strategy_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status: StrategyStatus = payload.status.parse()?;

    let strategy = app_state
        .store
        .update_strategy_status(id, status)
        .await?
        .ok_or(AppError::NotFound("Strategy"))?;

    Ok(Json(MutationResponse::new(
        "Strategy status updated successfully",
        strategy,
    )))
}

// PUT /api/strategy/{id}/content
#[utoipa::path(
    put,
    path = "/api/strategy/{id}/content",
    tag = "Strategy",
    params(("id" = Uuid, Path, description = "Strategy id")),
    request_body = UpdateStrategyContentPayload,
    responses(
        (status = 200, description = "Content updated", body = Strategy),
        (status = 400, description = "Content is required"),
        (status = 404, description = "Strategy not found")
    )
)]
pub async fn update_strategy_content(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStrategyContentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let strategy = app_state
        .store
        .update_strategy_content(id, payload.content, non_empty(payload.title))
        .await?
        .ok_or(AppError::NotFound("Strategy"))?;

    Ok(Json(MutationResponse::new(
        "Strategy content updated successfully",
        strategy,
    )))
}
