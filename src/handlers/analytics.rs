// src/handlers/analytics.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{non_empty, NotifyPayload};
use crate::{
    agents::campaign_optimizer::OptimizationRequest,
    common::{
        error::AppError,
        extract::ValidatedJson,
        response::{DataResponse, MutationResponse},
    },
    config::AppState,
    models::{
        action::{Action, NewAction},
        campaign::{Campaign, CampaignMetric, CompanyMetricRow, NewCampaignMetric},
        lead::Lead,
        meeting::Meeting,
    },
    services::{
        kpi::{self, CampaignPerformance, DashboardKpis, Period},
        Notification, SideEffect,
    },
};

// Metrics window handed to the optimizer.
const OPTIMIZATION_WINDOW: i64 = 7;

// Upper bound for one day's cost, keeps campaign totals inside `Decimal`.
const MAX_DAILY_COST: i64 = 1_000_000_000_000;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// day, week, month, quarter or year (default month)
    pub period: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardRows {
    pub campaigns: Vec<CompanyMetricRow>,
    pub leads: Vec<Lead>,
    pub meetings: Vec<Meeting>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub time_frame: Period,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub kpis: DashboardKpis,
    pub metrics: DashboardRows,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignAnalytics {
    pub campaign: Campaign,
    pub metrics: Vec<CampaignMetric>,
    pub performance: CampaignPerformance,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordMetricsPayload {
    pub campaign_id: Uuid,

    #[validate(range(min = 0))]
    pub impressions: Option<i32>,
    #[validate(range(min = 0))]
    pub clicks: Option<i32>,
    #[validate(range(min = 0))]
    pub conversions: Option<i32>,

    #[schema(value_type = Option<f64>, example = 50.0)]
    pub cost: Option<Decimal>,

    // Defaults to today (UTC)
    #[schema(value_type = Option<String>, format = Date, example = "2025-03-01")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Optimization {
    pub campaign: Campaign,
    pub performance: CampaignPerformance,
    pub recommendations: String,
    pub action: Action,
}

// GET /api/analytics/dashboard/{company_id}
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard/{company_id}",
    tag = "Analytics",
    params(("company_id" = Uuid, Path, description = "Company id"), PeriodQuery),
    responses((status = 200, description = "KPIs and the rows behind them", body = Dashboard))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let period = Period::parse(query.period.as_deref());
    let end_date = Utc::now();
    let start_date = period.start_from(end_date);

    let campaigns = app_state
        .store
        .list_company_metrics_between(company_id, start_date.date_naive(), end_date.date_naive())
        .await?;
    let leads = app_state
        .store
        .list_leads_created_between(company_id, start_date, end_date)
        .await?;
    let meetings = app_state
        .store
        .list_meetings_created_between(company_id, start_date, end_date)
        .await?;

    let kpis = kpi::dashboard_kpis(&campaigns, &leads, &meetings)?;

    Ok(Json(DataResponse::new(Dashboard {
        time_frame: period,
        start_date,
        end_date,
        kpis,
        metrics: DashboardRows {
            campaigns,
            leads,
            meetings,
        },
    })))
}

// GET /api/analytics/campaign/{campaign_id}
#[utoipa::path(
    get,
    path = "/api/analytics/campaign/{campaign_id}",
    tag = "Analytics",
    params(("campaign_id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign with its metrics, newest day first", body = CampaignAnalytics),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn get_campaign_analytics(
    State(app_state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let campaign = app_state
        .store
        .find_campaign(campaign_id)
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    let metrics = app_state.store.list_metrics_by_campaign(campaign_id, None).await?;
    let performance = kpi::campaign_performance(&metrics)?;

    Ok(Json(DataResponse::new(CampaignAnalytics {
        campaign,
        metrics,
        performance,
    })))
}

// POST /api/analytics/metrics
#[utoipa::path(
    post,
    path = "/api/analytics/metrics",
    tag = "Analytics",
    request_body = RecordMetricsPayload,
    responses(
        (status = 201, description = "Metrics recorded (replaces the same campaign and day)", body = CampaignMetric),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn record_metrics(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RecordMetricsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let cost = payload.cost.unwrap_or_default();
    if cost < Decimal::ZERO {
        return Err(AppError::BadRequest("cost cannot be negative".into()));
    }
    if cost > Decimal::from(MAX_DAILY_COST) {
        return Err(AppError::BadRequest(format!(
            "cost cannot exceed {MAX_DAILY_COST}"
        )));
    }

    let metric = app_state
        .store
        .record_metric(NewCampaignMetric {
            campaign_id: payload.campaign_id,
            impressions: payload.impressions.unwrap_or(0),
            clicks: payload.clicks.unwrap_or(0),
            conversions: payload.conversions.unwrap_or(0),
            cost,
            date: payload.date.unwrap_or_else(|| Utc::now().date_naive()),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(
            "Campaign metrics recorded successfully",
            metric,
        )),
    ))
}

// POST /api/analytics/optimize/{campaign_id}
#[utoipa::path(
    post,
    path = "/api/analytics/optimize/{campaign_id}",
    tag = "Analytics",
    params(("campaign_id" = Uuid, Path, description = "Campaign id")),
    request_body(content = NotifyPayload, description = "Optional user to notify"),
    responses(
        (status = 200, description = "Recommendations plus a pending optimization action", body = Optimization),
        (status = 404, description = "Campaign not found"),
        (status = 500, description = "Completion API failure")
    )
)]
pub async fn optimize_campaign(
    State(app_state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    payload: Option<ValidatedJson<NotifyPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|ValidatedJson(p)| p).unwrap_or_default();

    let campaign = app_state
        .store
        .find_campaign(campaign_id)
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    let recent = app_state
        .store
        .list_metrics_by_campaign(campaign_id, Some(OPTIMIZATION_WINDOW))
        .await?;
    let performance = kpi::campaign_performance(&recent)?;

    let request = OptimizationRequest {
        campaign,
        performance: performance.totals.clone(),
    };
    let recommendations = app_state.agents.campaign_optimizer.generate(&request).await?;
    let campaign = request.campaign;

    let action = app_state
        .store
        .create_action(NewAction {
            company_id: campaign.company_id,
            campaign_id: Some(campaign.id),
            action_type: "optimization".to_string(),
            content: recommendations.clone(),
            assigned_to: None,
            due_date: None,
        })
        .await?;

    tracing::info!(campaign_id = %campaign.id, action_id = %action.id, "optimization recommended");

    if let Some(user_id) = non_empty(payload.user_id) {
        let notification = Notification {
            user_id,
            title: "Campaign Optimization".to_string(),
            message: format!(
                "New optimization recommendations are available for {}",
                campaign.name
            ),
            link: Some(format!("/actions/{}", action.id)),
        };
        SideEffect::attempt(
            "optimization_notification",
            app_state.notifier.send_notification(&notification),
        )
        .await;
    }

    Ok(Json(MutationResponse::new(
        "Optimization recommendations generated successfully",
        Optimization {
            campaign,
            performance,
            recommendations,
            action,
        },
    )))
}
