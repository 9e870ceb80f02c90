// src/models/action.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// Maps the action_status enum type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "action_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl FromStr for ActionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::InvalidStatus),
        }
    }
}

/// A unit of generated or manual work awaiting human approval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Action {
    pub id: Uuid,
    pub company_id: Uuid,
    pub campaign_id: Option<Uuid>,

    // email | linkedin | sms | meeting | optimization | outreach | ...
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "email")]
    pub action_type: String,

    pub content: String,
    pub status: ActionStatus,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAction {
    pub company_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub action_type: String,
    pub content: String,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ActionFilter {
    pub status: Option<ActionStatus>,
    pub action_type: Option<String>,
}
