// src/handlers/actions.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
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
    models::action::{Action, ActionFilter, ActionStatus, NewAction},
    services::{Notification, SideEffect},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActionQuery {
    /// pending, approved, rejected or completed
    pub status: Option<String>,

    /// Action type, e.g. email or optimization
    #[serde(rename = "type")]
    pub action_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActionPayload {
    pub company_id: Uuid,
    pub campaign_id: Option<Uuid>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    #[schema(example = "email")]
    pub action_type: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignActionPayload {
    #[validate(length(min = 1, message = "Assigned to is required"))]
    pub assigned_to: String,
}

// GET /api/actions/company/{company_id}
#[utoipa::path(
    get,
    path = "/api/actions/company/{company_id}",
    tag = "Actions",
    params(("company_id" = Uuid, Path, description = "Company id"), ActionQuery),
    responses(
        (status = 200, description = "Actions, newest first", body = Vec<Action>),
        (status = 400, description = "Invalid status value")
    )
)]
pub async fn list_company_actions(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<ActionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = non_empty(query.status)
        .map(|raw| raw.parse::<ActionStatus>())
        .transpose()?;

    let filter = ActionFilter {
        status,
        action_type: non_empty(query.action_type),
    };

    let actions = app_state.store.list_actions_by_company(company_id, filter).await?;
    Ok(Json(DataResponse::new(actions)))
}

// GET /api/actions/{id}
#[utoipa::path(
    get,
    path = "/api/actions/{id}",
    tag = "Actions",
    params(("id" = Uuid, Path, description = "Action id")),
    responses(
        (status = 200, description = "Action", body = Action),
        (status = 404, description = "Action not found")
    )
)]
pub async fn get_action(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let action = app_state
        .store
        .find_action(id)
        .await?
        .ok_or(AppError::NotFound("Action"))?;

    Ok(Json(DataResponse::new(action)))
}

// POST /api/actions
#[utoipa::path(
    post,
    path = "/api/actions",
    tag = "Actions",
    request_body = CreateActionPayload,
    responses(
        (status = 201, description = "Pending action created", body = Action),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_action(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateActionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let action = app_state
        .store
        .create_action(NewAction {
            company_id: payload.company_id,
            campaign_id: payload.campaign_id,
            action_type: payload.action_type,
            content: payload.content,
            assigned_to: non_empty(payload.assigned_to),
            due_date: payload.due_date,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Action created successfully", action)),
    ))
}

// PUT /api/actions/{id}/status
#[utoipa::path(
    put,
    path = "/api/actions/{id}/status",
    tag = "Actions",
    params(("id" = Uuid, Path, description = "Action id")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated; approval triggers the workflow", body = Action),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Action not found")
    )
)]
pub async fn update_action_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status: ActionStatus = payload.status.parse()?;

    let action = app_state
        .store
        .update_action_status(id, status)
        .await?
        .ok_or(AppError::NotFound("Action"))?;

    // The status is already stored; a failed webhook does not undo it.
    if action.status == ActionStatus::Approved {
        let triggered = SideEffect::attempt("workflow_trigger", app_state.workflows.trigger(&action))
            .await
            .is_delivered();
        tracing::info!(action_id = %action.id, action_type = %action.action_type, triggered, "action approved");
    }

    Ok(Json(MutationResponse::new(
        "Action status updated successfully",
        action,
    )))
}

// PUT /api/actions/{id}/assign
#[utoipa::path(
    put,
    path = "/api/actions/{id}/assign",
    tag = "Actions",
    params(("id" = Uuid, Path, description = "Action id")),
    request_body = AssignActionPayload,
    responses(
        (status = 200, description = "Action assigned", body = Action),
        (status = 400, description = "Assigned to is required"),
        (status = 404, description = "Action not found")
    )
)]
pub async fn assign_action(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AssignActionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let action = app_state
        .store
        .assign_action(id, payload.assigned_to.clone())
        .await?
        .ok_or(AppError::NotFound("Action"))?;

    let notification = Notification {
        user_id: payload.assigned_to,
        title: "Action Assigned".to_string(),
        message: format!("You have been assigned a new action: {}", action.content),
        link: Some(format!("/actions/{}", action.id)),
    };
    SideEffect::attempt(
        "assignment_notification",
        app_state.notifier.send_notification(&notification),
    )
    .await;

    Ok(Json(MutationResponse::new("Action assigned successfully", action)))
}
