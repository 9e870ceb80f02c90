// src/handlers/leads.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::non_empty;
use crate::{
    agents::lead_qualifier::{extract_score, QualificationRequest},
    common::{
        error::AppError,
        extract::ValidatedJson,
        response::{DataResponse, MutationResponse},
    },
    config::AppState,
    models::{
        action::{Action, NewAction},
        lead::{Lead, NewLead, LEAD_STATUS_DISQUALIFIED, LEAD_STATUS_QUALIFIED},
    },
    services::kpi::QUALIFIED_LEAD_THRESHOLD,
};

// Qualified leads get an outreach action due this many days out.
const OUTREACH_DUE_DAYS: i64 = 2;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLeadPayload {
    pub company_id: Uuid,

    #[validate(length(min = 1, message = "Lead name is required"))]
    #[schema(example = "Maria Souza")]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,

    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub budget: Option<String>,
    pub pain_points: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Qualification {
    pub lead: Lead,
    pub score: i32,
    pub assessment: String,
    // Present only when the lead qualified
    pub action: Option<Action>,
}

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead created", body = Lead),
        (status = 404, description = "Company not found")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state
        .store
        .create_lead(NewLead {
            company_id: payload.company_id,
            name: payload.name,
            email: non_empty(payload.email),
            company: payload.company,
            position: payload.position,
            industry: payload.industry,
            company_size: payload.company_size,
            budget: payload.budget,
            pain_points: payload.pain_points,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Lead created successfully", lead)),
    ))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state
        .store
        .find_lead(id)
        .await?
        .ok_or(AppError::NotFound("Lead"))?;

    Ok(Json(DataResponse::new(lead)))
}

// POST /api/leads/{id}/qualify
#[utoipa::path(
    post,
    path = "/api/leads/{id}/qualify",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead scored against the company ICP", body = Qualification),
        (status = 404, description = "Lead not found"),
        (status = 500, description = "Completion API failure or unreadable assessment")
    )
)]
pub async fn qualify_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state
        .store
        .find_lead(id)
        .await?
        .ok_or(AppError::NotFound("Lead"))?;

    let company_icp = app_state
        .store
        .find_company(lead.company_id)
        .await?
        .and_then(|company| company.icp);

    let request = QualificationRequest { lead, company_icp };
    let assessment = app_state.agents.lead_qualifier.generate(&request).await?;

    let score = extract_score(&assessment).ok_or_else(|| {
        AppError::InternalServerError(anyhow::anyhow!(
            "lead assessment did not contain a score"
        ))
    })?;

    let qualified = score >= QUALIFIED_LEAD_THRESHOLD;
    let status = if qualified {
        LEAD_STATUS_QUALIFIED
    } else {
        LEAD_STATUS_DISQUALIFIED
    };

    let lead = app_state
        .store
        .update_lead_qualification(id, score, status)
        .await?
        .ok_or(AppError::NotFound("Lead"))?;

    tracing::info!(lead_id = %lead.id, score, status, "lead qualified");

    let action = if qualified {
        let action = app_state
            .store
            .create_action(NewAction {
                company_id: lead.company_id,
                campaign_id: None,
                action_type: "outreach".to_string(),
                content: format!("Reach out to {} (qualification score {score})", lead.name),
                assigned_to: None,
                due_date: Some(Utc::now() + Duration::days(OUTREACH_DUE_DAYS)),
            })
            .await?;
        Some(action)
    } else {
        None
    };

    Ok(Json(MutationResponse::new(
        "Lead qualified successfully",
        Qualification {
            lead,
            score,
            assessment,
            action,
        },
    )))
}
