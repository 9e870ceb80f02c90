// src/db/memory.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ActionRepository, CampaignRepository, CompanyRepository, LeadRepository,
        MeetingRepository, MetricsRepository, StrategyRepository, UserRepository,
    },
    models::{
        action::{Action, ActionFilter, ActionStatus, NewAction},
        campaign::{
            Campaign, CampaignMetric, CampaignStatus, CompanyMetricRow, NewCampaign,
            NewCampaignMetric,
        },
        company::{Company, CompanyChanges, NewCompany},
        lead::{Lead, NewLead, LEAD_STATUS_NEW},
        meeting::Meeting,
        strategy::{NewStrategy, Strategy, StrategyStatus},
        user::{NewUser, User},
    },
};

#[derive(Default)]
struct Tables {
    companies: Vec<Company>,
    users: Vec<User>,
    strategies: Vec<Strategy>,
    leads: Vec<Lead>,
    campaigns: Vec<Campaign>,
    metrics: Vec<CampaignMetric>,
    actions: Vec<Action>,
    meetings: Vec<Meeting>,
}

/// Process-local store with the same contract as `PgStore`.
///
/// Backs `AppState::from_parts` in the integration tests.
/// Rows live in insertion order; "newest first" listings sort by
/// `created_at` and fall back to insertion order on ties.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meetings have no write endpoint; this seeds them for local runs and tests.
    pub async fn insert_meeting(
        &self,
        company_id: Uuid,
        lead_id: Option<Uuid>,
        title: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Meeting {
        let now = Utc::now();
        let meeting = Meeting {
            id: Uuid::new_v4(),
            company_id,
            lead_id,
            title: title.to_string(),
            description: None,
            scheduled_at,
            status: "scheduled".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().await.meetings.push(meeting.clone());
        meeting
    }

    /// Moves a seeded lead or meeting back in time so windowed reads can
    /// be exercised. Returns whether a row matched.
    pub async fn backdate(&self, id: Uuid, created_at: DateTime<Utc>) -> bool {
        let mut tables = self.tables.lock().await;
        if let Some(lead) = tables.leads.iter_mut().find(|l| l.id == id) {
            lead.created_at = created_at;
            return true;
        }
        if let Some(meeting) = tables.meetings.iter_mut().find(|m| m.id == id) {
            meeting.created_at = created_at;
            return true;
        }
        false
    }
}

fn newest_first<T: Clone>(rows: impl DoubleEndedIterator<Item = T>, created_at: fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn create_company(&self, company: NewCompany) -> Result<Company, AppError> {
        let now = Utc::now();
        let created = Company {
            id: Uuid::new_v4(),
            name: company.name,
            industry: company.industry,
            arr: company.arr,
            icp: company.icp,
            ticket_size: company.ticket_size,
            channels: company.channels,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().await.companies.push(created.clone());
        Ok(created)
    }

    async fn find_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn update_company(
        &self,
        id: Uuid,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, AppError> {
        let mut tables = self.tables.lock().await;
        let Some(company) = tables.companies.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            company.name = name;
        }
        if let Some(industry) = changes.industry {
            company.industry = Some(industry);
        }
        if let Some(arr) = changes.arr {
            company.arr = Some(arr);
        }
        if let Some(icp) = changes.icp {
            company.icp = Some(icp);
        }
        if let Some(ticket_size) = changes.ticket_size {
            company.ticket_size = Some(ticket_size);
        }
        if let Some(channels) = changes.channels {
            company.channels = channels;
        }
        company.updated_at = Utc::now();

        Ok(Some(company.clone()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        if !tables.companies.iter().any(|c| c.id == user.company_id) {
            return Err(AppError::NotFound("Company"));
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            company_id: Some(user.company_id),
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn list_users_by_company(&self, company_id: Uuid) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.company_id == Some(company_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StrategyRepository for MemoryStore {
    async fn create_strategy(&self, strategy: NewStrategy) -> Result<Strategy, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.companies.iter().any(|c| c.id == strategy.company_id) {
            return Err(AppError::NotFound("Company"));
        }

        let now = Utc::now();
        let created = Strategy {
            id: Uuid::new_v4(),
            company_id: strategy.company_id,
            title: strategy.title,
            content: strategy.content,
            status: StrategyStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        tables.strategies.push(created.clone());
        Ok(created)
    }

    async fn find_strategy(&self, id: Uuid) -> Result<Option<Strategy>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.strategies.iter().find(|s| s.id == id).cloned())
    }

    async fn list_strategies_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Strategy>, AppError> {
        let tables = self.tables.lock().await;
        let rows = tables
            .strategies
            .iter()
            .filter(|s| s.company_id == company_id)
            .cloned();
        Ok(newest_first(rows.collect::<Vec<_>>().into_iter(), |s| s.created_at))
    }

    async fn find_active_strategy(&self, company_id: Uuid) -> Result<Option<Strategy>, AppError> {
        let strategies = self.list_strategies_by_company(company_id).await?;
        Ok(strategies
            .into_iter()
            .find(|s| s.status == StrategyStatus::Active))
    }

    async fn update_strategy_status(
        &self,
        id: Uuid,
        status: StrategyStatus,
    ) -> Result<Option<Strategy>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.strategies.iter_mut().find(|s| s.id == id).map(|s| {
            s.status = status;
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn update_strategy_content(
        &self,
        id: Uuid,
        content: String,
        title: Option<String>,
    ) -> Result<Option<Strategy>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.strategies.iter_mut().find(|s| s.id == id).map(|s| {
            s.content = content;
            if let Some(title) = title {
                s.title = title;
            }
            s.updated_at = Utc::now();
            s.clone()
        }))
    }
}

#[async_trait]
impl LeadRepository for MemoryStore {
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.companies.iter().any(|c| c.id == lead.company_id) {
            return Err(AppError::NotFound("Company"));
        }

        let now = Utc::now();
        let created = Lead {
            id: Uuid::new_v4(),
            company_id: lead.company_id,
            name: lead.name,
            email: lead.email,
            company: lead.company,
            position: lead.position,
            industry: lead.industry,
            company_size: lead.company_size,
            budget: lead.budget,
            pain_points: lead.pain_points,
            qualification_score: None,
            status: LEAD_STATUS_NEW.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.leads.push(created.clone());
        Ok(created)
    }

    async fn find_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.leads.iter().find(|l| l.id == id).cloned())
    }

    async fn list_leads_by_company(&self, company_id: Uuid) -> Result<Vec<Lead>, AppError> {
        let tables = self.tables.lock().await;
        let rows: Vec<Lead> = tables
            .leads
            .iter()
            .filter(|l| l.company_id == company_id)
            .cloned()
            .collect();
        Ok(newest_first(rows.into_iter(), |l| l.created_at))
    }

    async fn list_leads_created_between(
        &self,
        company_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Lead>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .leads
            .iter()
            .filter(|l| l.company_id == company_id && l.created_at >= start && l.created_at <= end)
            .cloned()
            .collect())
    }

    async fn update_lead_qualification(
        &self,
        id: Uuid,
        score: i32,
        status: &str,
    ) -> Result<Option<Lead>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.leads.iter_mut().find(|l| l.id == id).map(|l| {
            l.qualification_score = Some(score);
            l.status = status.to_string();
            l.updated_at = Utc::now();
            l.clone()
        }))
    }
}

#[async_trait]
impl CampaignRepository for MemoryStore {
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.companies.iter().any(|c| c.id == campaign.company_id) {
            return Err(AppError::NotFound("Company"));
        }

        let now = Utc::now();
        let created = Campaign {
            id: Uuid::new_v4(),
            company_id: campaign.company_id,
            strategy_id: campaign.strategy_id,
            name: campaign.name,
            channel: campaign.channel,
            target_audience: campaign.target_audience,
            content: campaign.content,
            status: CampaignStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        tables.campaigns.push(created.clone());
        Ok(created)
    }

    async fn find_campaign(&self, id: Uuid) -> Result<Option<Campaign>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn list_campaigns_by_company(
        &self,
        company_id: Uuid,
        channel: Option<&str>,
    ) -> Result<Vec<Campaign>, AppError> {
        let tables = self.tables.lock().await;
        let rows: Vec<Campaign> = tables
            .campaigns
            .iter()
            .filter(|c| c.company_id == company_id)
            .filter(|c| channel.is_none_or(|wanted| c.channel == wanted))
            .cloned()
            .collect();
        Ok(newest_first(rows.into_iter(), |c| c.created_at))
    }

    async fn update_campaign_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<Option<Campaign>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.campaigns.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn update_campaign_content(
        &self,
        id: Uuid,
        content: String,
        name: Option<String>,
    ) -> Result<Option<Campaign>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.campaigns.iter_mut().find(|c| c.id == id).map(|c| {
            c.content = Some(content);
            if let Some(name) = name {
                c.name = name;
            }
            c.updated_at = Utc::now();
            c.clone()
        }))
    }
}

#[async_trait]
impl MetricsRepository for MemoryStore {
    async fn record_metric(&self, metric: NewCampaignMetric) -> Result<CampaignMetric, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.campaigns.iter().any(|c| c.id == metric.campaign_id) {
            return Err(AppError::NotFound("Campaign"));
        }

        if let Some(existing) = tables
            .metrics
            .iter_mut()
            .find(|m| m.campaign_id == metric.campaign_id && m.date == metric.date)
        {
            existing.impressions = metric.impressions;
            existing.clicks = metric.clicks;
            existing.conversions = metric.conversions;
            existing.cost = metric.cost;
            return Ok(existing.clone());
        }

        let created = CampaignMetric {
            id: Uuid::new_v4(),
            campaign_id: metric.campaign_id,
            impressions: metric.impressions,
            clicks: metric.clicks,
            conversions: metric.conversions,
            cost: metric.cost,
            date: metric.date,
            created_at: Utc::now(),
        };
        tables.metrics.push(created.clone());
        Ok(created)
    }

    async fn list_metrics_by_campaign(
        &self,
        campaign_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<CampaignMetric>, AppError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<CampaignMetric> = tables
            .metrics
            .iter()
            .filter(|m| m.campaign_id == campaign_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| std::cmp::Reverse(m.date));
        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(rows)
    }

    async fn list_company_metrics_between(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompanyMetricRow>, AppError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<CompanyMetricRow> = tables
            .metrics
            .iter()
            .filter(|m| m.date >= start && m.date <= end)
            .filter_map(|m| {
                let campaign = tables
                    .campaigns
                    .iter()
                    .find(|c| c.id == m.campaign_id && c.company_id == company_id)?;
                Some(CompanyMetricRow {
                    metric: m.clone(),
                    campaign_name: campaign.name.clone(),
                    campaign_channel: campaign.channel.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.metric.date));
        Ok(rows)
    }
}

#[async_trait]
impl ActionRepository for MemoryStore {
    async fn create_action(&self, action: NewAction) -> Result<Action, AppError> {
        let mut tables = self.tables.lock().await;
        let company_exists = tables.companies.iter().any(|c| c.id == action.company_id);
        let campaign_exists = action
            .campaign_id
            .is_none_or(|id| tables.campaigns.iter().any(|c| c.id == id));
        if !company_exists || !campaign_exists {
            return Err(AppError::BadRequest(
                "company_id or campaign_id does not reference an existing record".into(),
            ));
        }

        let now = Utc::now();
        let created = Action {
            id: Uuid::new_v4(),
            company_id: action.company_id,
            campaign_id: action.campaign_id,
            action_type: action.action_type,
            content: action.content,
            status: ActionStatus::Pending,
            assigned_to: action.assigned_to,
            due_date: action.due_date,
            created_at: now,
            updated_at: now,
        };
        tables.actions.push(created.clone());
        Ok(created)
    }

    async fn find_action(&self, id: Uuid) -> Result<Option<Action>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.actions.iter().find(|a| a.id == id).cloned())
    }

    async fn list_actions_by_company(
        &self,
        company_id: Uuid,
        filter: ActionFilter,
    ) -> Result<Vec<Action>, AppError> {
        let tables = self.tables.lock().await;
        let rows: Vec<Action> = tables
            .actions
            .iter()
            .filter(|a| a.company_id == company_id)
            .filter(|a| filter.status.is_none_or(|s| a.status == s))
            .filter(|a| {
                filter
                    .action_type
                    .as_deref()
                    .is_none_or(|t| a.action_type == t)
            })
            .cloned()
            .collect();
        Ok(newest_first(rows.into_iter(), |a| a.created_at))
    }

    async fn update_action_status(
        &self,
        id: Uuid,
        status: ActionStatus,
    ) -> Result<Option<Action>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.actions.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }

    async fn assign_action(
        &self,
        id: Uuid,
        assigned_to: String,
    ) -> Result<Option<Action>, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.actions.iter_mut().find(|a| a.id == id).map(|a| {
            a.assigned_to = Some(assigned_to);
            a.updated_at = Utc::now();
            a.clone()
        }))
    }
}

#[async_trait]
impl MeetingRepository for MemoryStore {
    async fn list_meetings_created_between(
        &self,
        company_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Meeting>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .meetings
            .iter()
            .filter(|m| m.company_id == company_id && m.created_at >= start && m.created_at <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    async fn store_with_company() -> (MemoryStore, Company) {
        let store = MemoryStore::new();
        let company = store
            .create_company(NewCompany {
                name: "Acme".into(),
                industry: None,
                arr: None,
                icp: None,
                ticket_size: None,
                channels: vec![],
            })
            .await
            .unwrap();
        (store, company)
    }

    #[tokio::test]
    async fn newest_active_strategy_wins() {
        let (store, company) = store_with_company().await;
        let mut ids = Vec::new();
        for title in ["first", "second", "third"] {
            let s = store
                .create_strategy(NewStrategy {
                    company_id: company.id,
                    title: title.into(),
                    content: "...".into(),
                })
                .await
                .unwrap();
            ids.push(s.id);
        }
        store.update_strategy_status(ids[0], StrategyStatus::Active).await.unwrap();
        store.update_strategy_status(ids[1], StrategyStatus::Active).await.unwrap();

        let active = store.find_active_strategy(company.id).await.unwrap().unwrap();
        assert_eq!(active.id, ids[1]);
    }

    #[tokio::test]
    async fn recording_the_same_day_twice_keeps_one_row() {
        let (store, company) = store_with_company().await;
        let campaign = store
            .create_campaign(NewCampaign {
                company_id: company.id,
                strategy_id: None,
                name: "Email outreach".into(),
                channel: "email".into(),
                target_audience: None,
                content: None,
            })
            .await
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        for impressions in [100, 250] {
            store
                .record_metric(NewCampaignMetric {
                    campaign_id: campaign.id,
                    impressions,
                    clicks: 10,
                    conversions: 1,
                    cost: Decimal::new(50, 0),
                    date,
                })
                .await
                .unwrap();
        }

        let rows = store.list_metrics_by_campaign(campaign.id, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].impressions, 250);
    }

    #[tokio::test]
    async fn campaign_needs_an_existing_company() {
        let (store, _) = store_with_company().await;
        let result = store
            .create_campaign(NewCampaign {
                company_id: Uuid::new_v4(),
                strategy_id: None,
                name: "Orphan".into(),
                channel: "sms".into(),
                target_audience: None,
                content: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound("Company"))));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (store, company) = store_with_company().await;
        let new_user = || NewUser {
            email: "founder@acme.io".into(),
            company_id: company.id,
            role: Some("admin".into()),
        };
        store.create_user(new_user()).await.unwrap();
        assert!(matches!(
            store.create_user(new_user()).await,
            Err(AppError::EmailAlreadyExists)
        ));
    }
}
