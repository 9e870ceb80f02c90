// src/db/campaign_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::campaign::{Campaign, CampaignStatus, NewCampaign},
};

#[async_trait]
pub trait CampaignRepository {
    /// Inserts a new campaign in `draft`.
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, AppError>;

    async fn find_campaign(&self, id: Uuid) -> Result<Option<Campaign>, AppError>;

    /// Newest first, optionally restricted to one channel.
    async fn list_campaigns_by_company(
        &self,
        company_id: Uuid,
        channel: Option<&str>,
    ) -> Result<Vec<Campaign>, AppError>;

    async fn update_campaign_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<Option<Campaign>, AppError>;

    async fn update_campaign_content(
        &self,
        id: Uuid,
        content: String,
        name: Option<String>,
    ) -> Result<Option<Campaign>, AppError>;
}

#[async_trait]
impl CampaignRepository for PgStore {
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, AppError> {
        let created = sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (
                company_id, strategy_id, name, channel, target_audience, content, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'draft')
            RETURNING *
            "#,
        )
        .bind(campaign.company_id)
        .bind(campaign.strategy_id)
        .bind(&campaign.name)
        .bind(&campaign.channel)
        .bind(&campaign.target_audience)
        .bind(&campaign.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Company");
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(created)
    }

    async fn find_campaign(&self, id: Uuid) -> Result<Option<Campaign>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(campaign)
    }

    async fn list_campaigns_by_company(
        &self,
        company_id: Uuid,
        channel: Option<&str>,
    ) -> Result<Vec<Campaign>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT * FROM campaigns
            WHERE company_id = $1
              AND ($2::text IS NULL OR channel = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(channel)
        .fetch_all(&self.pool)
        .await?;

        Ok(campaigns)
    }

    async fn update_campaign_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<Option<Campaign>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            "UPDATE campaigns SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campaign)
    }

    async fn update_campaign_content(
        &self,
        id: Uuid,
        content: String,
        name: Option<String>,
    ) -> Result<Option<Campaign>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE campaigns
            SET content = $2, name = COALESCE($3, name), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campaign)
    }
}
