// src/handlers.rs

pub mod actions;
pub mod analytics;
pub mod content;
pub mod leads;
pub mod onboarding;
pub mod strategy;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Body of every `PUT .../status` endpoint. The value is checked against the
/// entity's status enum before anything is written.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StatusPayload {
    #[schema(example = "active")]
    pub status: String,
}

/// Optional body carrying the user to notify.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct NotifyPayload {
    pub user_id: Option<String>,
}

// Treats "" the same as an absent field.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
