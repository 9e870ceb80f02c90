// src/db/meeting_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{common::error::AppError, db::PgStore, models::meeting::Meeting};

#[async_trait]
pub trait MeetingRepository {
    /// Meetings created inside `[start, end]`.
    async fn list_meetings_created_between(
        &self,
        company_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Meeting>, AppError>;
}

#[async_trait]
impl MeetingRepository for PgStore {
    async fn list_meetings_created_between(
        &self,
        company_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Meeting>, AppError> {
        let meetings = sqlx::query_as::<_, Meeting>(
            r#"
            SELECT * FROM meetings
            WHERE company_id = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(meetings)
    }
}
