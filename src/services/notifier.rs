// src/services/notifier.rs

use anyhow::{bail, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{company::Company, strategy::Strategy};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

/// User-facing notification and approval service.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_notification(&self, notification: &Notification) -> Result<()>;

    async fn request_strategy_approval(
        &self,
        strategy: &Strategy,
        user_id: Option<&str>,
    ) -> Result<()>;

    async fn register_onboarding(&self, company: &Company) -> Result<()>;
}

#[derive(Serialize)]
struct StrategyApprovalBody<'a> {
    user_id: Option<&'a str>,
    strategy_id: Uuid,
    strategy_title: &'a str,
    strategy_content: &'a str,
    company_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OnboardingBody<'a> {
    company_id: Uuid,
    company_name: &'a str,
    industry: Option<&'a str>,
    financial_data: FinancialData,
    icp: Value,
    channels: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    arr: Option<Decimal>,
    ticket_size: Option<Decimal>,
}

pub struct HttpNotifier {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpNotifier {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<()> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut call = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            call = call.header("x-api-key", key);
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("notification service returned {status} for {path}");
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_notification(&self, notification: &Notification) -> Result<()> {
        self.post("/notifications", notification).await
    }

    async fn request_strategy_approval(
        &self,
        strategy: &Strategy,
        user_id: Option<&str>,
    ) -> Result<()> {
        let body = StrategyApprovalBody {
            user_id,
            strategy_id: strategy.id,
            strategy_title: &strategy.title,
            strategy_content: &strategy.content,
            company_id: strategy.company_id,
        };
        self.post("/strategies/approval", &body).await
    }

    async fn register_onboarding(&self, company: &Company) -> Result<()> {
        let icp = company
            .icp
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(Value::Null);

        let body = OnboardingBody {
            company_id: company.id,
            company_name: &company.name,
            industry: company.industry.as_deref(),
            financial_data: FinancialData {
                arr: company.arr,
                ticket_size: company.ticket_size,
            },
            icp,
            channels: &company.channels,
        };
        self.post("/onboarding/create", &body).await
    }
}

/// Used when no notification service is configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_notification(&self, notification: &Notification) -> Result<()> {
        tracing::debug!(user_id = %notification.user_id, title = %notification.title, "notifications disabled, skipping");
        Ok(())
    }

    async fn request_strategy_approval(
        &self,
        strategy: &Strategy,
        _user_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(strategy_id = %strategy.id, "notifications disabled, skipping approval request");
        Ok(())
    }

    async fn register_onboarding(&self, company: &Company) -> Result<()> {
        tracing::debug!(company_id = %company.id, "notifications disabled, skipping onboarding registration");
        Ok(())
    }
}
