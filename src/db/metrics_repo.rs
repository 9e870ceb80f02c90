// src/db/metrics_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::campaign::{CampaignMetric, CompanyMetricRow, NewCampaignMetric},
};

#[async_trait]
pub trait MetricsRepository {
    /// Upserts on `(campaign_id, date)`: recording a day twice keeps the
    /// latest numbers instead of adding a second row.
    async fn record_metric(&self, metric: NewCampaignMetric) -> Result<CampaignMetric, AppError>;

    /// Newest date first; `limit` of `None` returns every row.
    async fn list_metrics_by_campaign(
        &self,
        campaign_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<CampaignMetric>, AppError>;

    /// Metrics of every campaign owned by the company with `date` in `[start, end]`.
    async fn list_company_metrics_between(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompanyMetricRow>, AppError>;
}

#[async_trait]
impl MetricsRepository for PgStore {
    async fn record_metric(&self, metric: NewCampaignMetric) -> Result<CampaignMetric, AppError> {
        sqlx::query_as::<_, CampaignMetric>(
            r#"
            INSERT INTO campaign_metrics (campaign_id, impressions, clicks, conversions, cost, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (campaign_id, date)
            DO UPDATE SET
                impressions = EXCLUDED.impressions,
                clicks = EXCLUDED.clicks,
                conversions = EXCLUDED.conversions,
                cost = EXCLUDED.cost
            RETURNING *
            "#,
        )
        .bind(metric.campaign_id)
        .bind(metric.impressions)
        .bind(metric.clicks)
        .bind(metric.conversions)
        .bind(metric.cost)
        .bind(metric.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Campaign");
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn list_metrics_by_campaign(
        &self,
        campaign_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<CampaignMetric>, AppError> {
        let metrics = sqlx::query_as::<_, CampaignMetric>(
            r#"
            SELECT * FROM campaign_metrics
            WHERE campaign_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(campaign_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(metrics)
    }

    async fn list_company_metrics_between(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompanyMetricRow>, AppError> {
        let rows = sqlx::query_as::<_, CompanyMetricRow>(
            r#"
            SELECT
                m.*,
                c.name AS campaign_name,
                c.channel AS campaign_channel
            FROM campaign_metrics m
            JOIN campaigns c ON c.id = m.campaign_id
            WHERE c.company_id = $1
              AND m.date >= $2
              AND m.date <= $3
            ORDER BY m.date DESC
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
