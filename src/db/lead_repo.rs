// src/db/lead_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::lead::{Lead, NewLead},
};

#[async_trait]
pub trait LeadRepository {
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, AppError>;

    async fn find_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError>;

    async fn list_leads_by_company(&self, company_id: Uuid) -> Result<Vec<Lead>, AppError>;

    /// Leads created inside `[start, end]`.
    async fn list_leads_created_between(
        &self,
        company_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Lead>, AppError>;

    async fn update_lead_qualification(
        &self,
        id: Uuid,
        score: i32,
        status: &str,
    ) -> Result<Option<Lead>, AppError>;
}

#[async_trait]
impl LeadRepository for PgStore {
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                company_id, name, email, company, position,
                industry, company_size, budget, pain_points
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(lead.company_id)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.company)
        .bind(&lead.position)
        .bind(&lead.industry)
        .bind(&lead.company_size)
        .bind(&lead.budget)
        .bind(&lead.pain_points)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Company");
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn find_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    async fn list_leads_by_company(&self, company_id: Uuid) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    async fn list_leads_created_between(
        &self,
        company_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE company_id = $1 AND created_at >= $2 AND created_at <= $3
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    async fn update_lead_qualification(
        &self,
        id: Uuid,
        score: i32,
        status: &str,
    ) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET qualification_score = $2, status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(score)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }
}
