// src/handlers/onboarding.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::ValidatedJson,
        response::{DataResponse, MutationResponse},
    },
    config::AppState,
    models::{
        company::{Company, CompanyChanges, IcpProfile, NewCompany},
        lead::Lead,
        user::{NewUser, User},
    },
    services::SideEffect,
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompanySection {
    #[validate(length(min = 1, message = "Company name is required"))]
    #[schema(example = "Acme Analytics")]
    pub name: String,

    #[schema(example = "SaaS")]
    pub industry: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSection {
    #[schema(value_type = Option<f64>, example = 1200000)]
    pub arr: Option<Decimal>,

    #[schema(value_type = Option<f64>, example = 15000)]
    pub ticket_size: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MarketingSection {
    #[serde(default)]
    pub channels: Vec<String>,
}

/// The four steps of the onboarding form.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OnboardCompanyPayload {
    #[validate(nested)]
    pub company: CompanySection,

    #[serde(default)]
    pub financial: FinancialSection,

    #[serde(default)]
    pub icp: IcpProfile,

    #[serde(default)]
    pub marketing: MarketingSection,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[validate(email(message = "A valid email is required"))]
    #[schema(example = "founder@acme.io")]
    pub email: String,

    pub company_id: Uuid,

    #[schema(example = "admin")]
    pub role: Option<String>,
}

/// Partial update, field names as stored. Absent fields keep their value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1, message = "Company name cannot be empty"))]
    pub name: Option<String>,
    pub industry: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub arr: Option<Decimal>,
    pub icp: Option<IcpProfile>,
    #[schema(value_type = Option<f64>)]
    pub ticket_size: Option<Decimal>,
    pub channels: Option<Vec<String>>,
}

fn serialize_icp(icp: &IcpProfile) -> Result<String, AppError> {
    serde_json::to_string(icp).map_err(|e| AppError::InternalServerError(e.into()))
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/onboarding/company
#[utoipa::path(
    post,
    path = "/api/onboarding/company",
    tag = "Onboarding",
    request_body = OnboardCompanyPayload,
    responses(
        (status = 201, description = "Company onboarded", body = Company),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OnboardCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let new_company = NewCompany {
        name: payload.company.name,
        industry: payload.company.industry,
        arr: payload.financial.arr,
        icp: Some(serialize_icp(&payload.icp)?),
        ticket_size: payload.financial.ticket_size,
        channels: payload.marketing.channels,
    };

    let company = app_state.store.create_company(new_company).await?;

    tracing::info!(company_id = %company.id, "company onboarded");

    SideEffect::attempt("onboarding_flow", app_state.notifier.register_onboarding(&company)).await;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Company onboarded successfully", company)),
    ))
}

// GET /api/onboarding/company/{id}
#[utoipa::path(
    get,
    path = "/api/onboarding/company/{id}",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = Company),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .store
        .find_company(id)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    Ok(Json(DataResponse::new(company)))
}

// PUT /api/onboarding/company/{id}
#[utoipa::path(
    put,
    path = "/api/onboarding/company/{id}",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "Company id")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 404, description = "Company not found")
    )
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let icp = payload.icp.as_ref().map(serialize_icp).transpose()?;

    let changes = CompanyChanges {
        name: payload.name,
        industry: payload.industry,
        arr: payload.arr,
        icp,
        ticket_size: payload.ticket_size,
        channels: payload.channels,
    };

    let company = app_state
        .store
        .update_company(id, changes)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    Ok(Json(MutationResponse::new("Company updated successfully", company)))
}

// POST /api/onboarding/user
#[utoipa::path(
    post,
    path = "/api/onboarding/user",
    tag = "Onboarding",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .store
        .create_user(NewUser {
            email: payload.email,
            company_id: payload.company_id,
            role: payload.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("User created successfully", user)),
    ))
}

// GET /api/onboarding/company/{id}/users
#[utoipa::path(
    get,
    path = "/api/onboarding/company/{id}/users",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Users of the company", body = Vec<User>),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_company_users(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store
        .find_company(id)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    let users = app_state.store.list_users_by_company(id).await?;
    Ok(Json(DataResponse::new(users)))
}

// GET /api/onboarding/company/{id}/leads
#[utoipa::path(
    get,
    path = "/api/onboarding/company/{id}/leads",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Leads of the company, newest first", body = Vec<Lead>),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_company_leads(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store
        .find_company(id)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    let leads = app_state.store.list_leads_by_company(id).await?;
    Ok(Json(DataResponse::new(leads)))
}
