// src/db/action_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::action::{Action, ActionFilter, ActionStatus, NewAction},
};

#[async_trait]
pub trait ActionRepository {
    /// Inserts a new action in `pending`.
    async fn create_action(&self, action: NewAction) -> Result<Action, AppError>;

    async fn find_action(&self, id: Uuid) -> Result<Option<Action>, AppError>;

    /// Newest first.
    async fn list_actions_by_company(
        &self,
        company_id: Uuid,
        filter: ActionFilter,
    ) -> Result<Vec<Action>, AppError>;

    async fn update_action_status(
        &self,
        id: Uuid,
        status: ActionStatus,
    ) -> Result<Option<Action>, AppError>;

    async fn assign_action(&self, id: Uuid, assigned_to: String)
        -> Result<Option<Action>, AppError>;
}

#[async_trait]
impl ActionRepository for PgStore {
    async fn create_action(&self, action: NewAction) -> Result<Action, AppError> {
        sqlx::query_as::<_, Action>(
            r#"
            INSERT INTO actions (company_id, campaign_id, type, content, status, assigned_to, due_date)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6)
            RETURNING *
            "#,
        )
        .bind(action.company_id)
        .bind(action.campaign_id)
        .bind(&action.action_type)
        .bind(&action.content)
        .bind(&action.assigned_to)
        .bind(action.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::BadRequest(
                        "company_id or campaign_id does not reference an existing record".into(),
                    );
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn find_action(&self, id: Uuid) -> Result<Option<Action>, AppError> {
        let action = sqlx::query_as::<_, Action>("SELECT * FROM actions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(action)
    }

    async fn list_actions_by_company(
        &self,
        company_id: Uuid,
        filter: ActionFilter,
    ) -> Result<Vec<Action>, AppError> {
        let actions = sqlx::query_as::<_, Action>(
            r#"
            SELECT * FROM actions
            WHERE company_id = $1
              AND ($2::action_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR type = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(filter.status)
        .bind(filter.action_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(actions)
    }

    async fn update_action_status(
        &self,
        id: Uuid,
        status: ActionStatus,
    ) -> Result<Option<Action>, AppError> {
        let action = sqlx::query_as::<_, Action>(
            "UPDATE actions SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(action)
    }

    async fn assign_action(
        &self,
        id: Uuid,
        assigned_to: String,
    ) -> Result<Option<Action>, AppError> {
        let action = sqlx::query_as::<_, Action>(
            "UPDATE actions SET assigned_to = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(assigned_to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(action)
    }
}
