// src/models/campaign.rs

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// Maps the campaign_status enum type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl FromStr for CampaignStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::InvalidStatus),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Campaign {
    pub id: Uuid,
    pub company_id: Uuid,
    pub strategy_id: Option<Uuid>,
    #[schema(example = "Email outreach to Maria Souza")]
    pub name: String,
    #[schema(example = "email")]
    pub channel: String,
    pub target_audience: Option<String>,
    pub content: Option<String>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub company_id: Uuid,
    pub strategy_id: Option<Uuid>,
    pub name: String,
    pub channel: String,
    pub target_audience: Option<String>,
    pub content: Option<String>,
}

// --- METRICS ---

/// One day of delivery numbers for a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CampaignMetric {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub impressions: i32,
    pub clicks: i32,
    pub conversions: i32,
    #[schema(value_type = f64, example = 50.0)]
    pub cost: Decimal,
    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Metric row joined with the owning campaign, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CompanyMetricRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub metric: CampaignMetric,
    pub campaign_name: String,
    pub campaign_channel: String,
}

#[derive(Debug, Clone)]
pub struct NewCampaignMetric {
    pub campaign_id: Uuid,
    pub impressions: i32,
    pub clicks: i32,
    pub conversions: i32,
    pub cost: Decimal,
    pub date: NaiveDate,
}
