// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const LEAD_STATUS_NEW: &str = "new";
pub const LEAD_STATUS_QUALIFIED: &str = "qualified";
pub const LEAD_STATUS_DISQUALIFIED: &str = "disqualified";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lead {
    pub id: Uuid,
    pub company_id: Uuid,

    #[schema(example = "Maria Souza")]
    pub name: String,
    pub email: Option<String>,

    // The lead's employer
    #[schema(example = "Globex")]
    pub company: Option<String>,
    #[schema(example = "Head of Growth")]
    pub position: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub budget: Option<String>,
    pub pain_points: Option<String>,

    // 0-100, set by the lead qualifier
    pub qualification_score: Option<i32>,

    #[schema(example = "new")]
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub budget: Option<String>,
    pub pain_points: Option<String>,
}
