// src/services/workflow.rs

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::action::Action;

/// Webhook path for an action type. Unknown types go to the generic flow.
pub fn webhook_path(action_type: &str) -> &'static str {
    match action_type {
        "email" => "/webhook/email-outreach",
        "linkedin" => "/webhook/linkedin-outreach",
        "sms" => "/webhook/sms-outreach",
        "meeting" => "/webhook/schedule-meeting",
        "optimization" => "/webhook/apply-optimization",
        _ => "/webhook/generic-action",
    }
}

/// Hands approved actions to the automation tool.
#[async_trait]
pub trait WorkflowTrigger: Send + Sync {
    async fn trigger(&self, action: &Action) -> Result<()>;
}

pub struct N8nClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl N8nClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl WorkflowTrigger for N8nClient {
    async fn trigger(&self, action: &Action) -> Result<()> {
        let path = webhook_path(&action.action_type);
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);

        tracing::info!(action_id = %action.id, action_type = %action.action_type, %url, "triggering workflow");

        let mut call = self.http.post(&url).json(action);
        if let Some(key) = &self.api_key {
            call = call.header("X-N8N-API-KEY", key);
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("workflow webhook {path} returned {status}");
        }
        Ok(())
    }
}
