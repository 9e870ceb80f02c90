// src/models/company.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: Uuid,

    #[schema(example = "Acme Analytics")]
    pub name: String,

    #[schema(example = "SaaS")]
    pub industry: Option<String>,

    // Annual recurring revenue
    #[schema(value_type = Option<f64>, example = 1200000)]
    pub arr: Option<Decimal>,

    // Serialized IcpProfile
    #[schema(example = r#"{"industries":["Fintech"],"sizes":["51-200"],"decisionMakers":["CTO"]}"#)]
    pub icp: Option<String>,

    #[schema(value_type = Option<f64>, example = 15000)]
    pub ticket_size: Option<Decimal>,

    pub channels: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ideal customer profile as collected by the onboarding form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IcpProfile {
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub decision_makers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub industry: Option<String>,
    pub arr: Option<Decimal>,
    pub icp: Option<String>,
    pub ticket_size: Option<Decimal>,
    pub channels: Vec<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub arr: Option<Decimal>,
    pub icp: Option<String>,
    pub ticket_size: Option<Decimal>,
    pub channels: Option<Vec<String>>,
}
