// src/handlers/content.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{non_empty, StatusPayload};
use crate::{
    agents::outreach_creator::OutreachRequest,
    common::{
        error::AppError,
        extract::ValidatedJson,
        response::{DataResponse, MutationResponse},
    },
    config::AppState,
    models::campaign::{Campaign, CampaignStatus, NewCampaign},
    services::{templates, templates::ContentTemplate, Notification, SideEffect},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateContentPayload {
    pub company_id: Uuid,
    pub lead_id: Uuid,

    #[validate(length(min = 1, message = "Channel is required"))]
    #[schema(example = "email")]
    pub channel: String,

    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCampaignContentPayload {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignQuery {
    /// Only campaigns on this channel
    pub channel: Option<String>,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// POST /api/content/generate
#[utoipa::path(
    post,
    path = "/api/content/generate",
    tag = "Content",
    request_body = GenerateContentPayload,
    responses(
        (status = 201, description = "Draft campaign with generated content", body = Campaign),
        (status = 404, description = "Lead not found, or the company has no active strategy"),
        (status = 500, description = "Completion API failure")
    )
)]
pub async fn generate_content(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GenerateContentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state
        .store
        .find_lead(payload.lead_id)
        .await?
        .filter(|lead| lead.company_id == payload.company_id)
        .ok_or(AppError::NotFound("Lead"))?;

    let strategy = app_state
        .store
        .find_active_strategy(payload.company_id)
        .await?
        .ok_or(AppError::NoActiveStrategy)?;

    let request = OutreachRequest {
        channel: payload.channel.clone(),
        lead,
        strategy: strategy.content,
    };
    let content = app_state.agents.outreach_creator.generate(&request).await?;
    let lead = request.lead;

    let campaign = app_state
        .store
        .create_campaign(NewCampaign {
            company_id: payload.company_id,
            strategy_id: Some(strategy.id),
            name: format!("{} outreach to {}", capitalize(&payload.channel), lead.name),
            channel: payload.channel.clone(),
            target_audience: Some(lead.name.clone()),
            content: Some(content),
        })
        .await?;

    tracing::info!(campaign_id = %campaign.id, lead_id = %lead.id, channel = %campaign.channel, "content generated");

    if let Some(user_id) = non_empty(payload.user_id) {
        let notification = Notification {
            user_id,
            title: "Content Generated".to_string(),
            message: format!(
                "New {} content has been generated for {}",
                payload.channel, lead.name
            ),
            link: Some(format!("/campaigns/{}", campaign.id)),
        };
        SideEffect::attempt(
            "content_notification",
            app_state.notifier.send_notification(&notification),
        )
        .await;
    }

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Content generated successfully", campaign)),
    ))
}

// GET /api/content/campaign/{id}
#[utoipa::path(
    get,
    path = "/api/content/campaign/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign", body = Campaign),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn get_campaign(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let campaign = app_state
        .store
        .find_campaign(id)
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    Ok(Json(DataResponse::new(campaign)))
}

// GET /api/content/company/{company_id}
#[utoipa::path(
    get,
    path = "/api/content/company/{company_id}",
    tag = "Content",
    params(("company_id" = Uuid, Path, description = "Company id"), CampaignQuery),
    responses((status = 200, description = "Campaigns, newest first", body = Vec<Campaign>))
)]
pub async fn list_company_campaigns(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<CampaignQuery>,
) -> Result<impl IntoResponse, AppError> {
    let channel = non_empty(query.channel);
    let campaigns = app_state
        .store
        .list_campaigns_by_company(company_id, channel.as_deref())
        .await?;

    Ok(Json(DataResponse::new(campaigns)))
}

// PUT /api/content/campaign/{id}/status
#[utoipa::path(
    put,
    path = "/api/content/campaign/{id}/status",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Campaign id")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Campaign),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_campaign_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status: CampaignStatus = payload.status.parse()?;

    let campaign = app_state
        .store
        .update_campaign_status(id, status)
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    Ok(Json(MutationResponse::new(
        "Campaign status updated successfully",
        campaign,
    )))
}

// PUT /api/content/campaign/{id}/content
#[utoipa::path(
    put,
    path = "/api/content/campaign/{id}/content",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Campaign id")),
    request_body = UpdateCampaignContentPayload,
    responses(
        (status = 200, description = "Content updated", body = Campaign),
        (status = 400, description = "Content is required"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_campaign_content(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCampaignContentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let campaign = app_state
        .store
        .update_campaign_content(id, payload.content, non_empty(payload.name))
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    Ok(Json(MutationResponse::new(
        "Campaign content updated successfully",
        campaign,
    )))
}

// GET /api/content/templates/{channel}
#[utoipa::path(
    get,
    path = "/api/content/templates/{channel}",
    tag = "Content",
    params(("channel" = String, Path, description = "email, linkedin or sms")),
    responses(
        (status = 200, description = "Templates for the channel", body = Vec<ContentTemplate>),
        (status = 404, description = "No templates for this channel")
    )
)]
pub async fn get_templates(Path(channel): Path<String>) -> Result<impl IntoResponse, AppError> {
    let templates = templates::templates_for(&channel).ok_or(AppError::NotFound("Templates"))?;
    Ok(Json(DataResponse::new(templates)))
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn campaign_names_capitalize_the_channel() {
        assert_eq!(capitalize("linkedin"), "Linkedin");
        assert_eq!(capitalize("sms"), "Sms");
        assert_eq!(capitalize(""), "");
    }
}
