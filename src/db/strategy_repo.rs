// src/db/strategy_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::strategy::{NewStrategy, Strategy, StrategyStatus},
};

#[async_trait]
pub trait StrategyRepository {
    /// Inserts a new strategy in `draft`.
    async fn create_strategy(&self, strategy: NewStrategy) -> Result<Strategy, AppError>;

    async fn find_strategy(&self, id: Uuid) -> Result<Option<Strategy>, AppError>;

    /// Newest first.
    async fn list_strategies_by_company(&self, company_id: Uuid)
        -> Result<Vec<Strategy>, AppError>;

    /// Most recently created `active` strategy. Several rows may be active
    /// at once; the newest one wins.
    async fn find_active_strategy(&self, company_id: Uuid) -> Result<Option<Strategy>, AppError>;

    async fn update_strategy_status(
        &self,
        id: Uuid,
        status: StrategyStatus,
    ) -> Result<Option<Strategy>, AppError>;

    async fn update_strategy_content(
        &self,
        id: Uuid,
        content: String,
        title: Option<String>,
    ) -> Result<Option<Strategy>, AppError>;
}

#[async_trait]
impl StrategyRepository for PgStore {
    async fn create_strategy(&self, strategy: NewStrategy) -> Result<Strategy, AppError> {
        sqlx::query_as::<_, Strategy>(
            r#"
            INSERT INTO strategies (company_id, title, content, status)
            VALUES ($1, $2, $3, 'draft')
            RETURNING *
            "#,
        )
        .bind(strategy.company_id)
        .bind(&strategy.title)
        .bind(&strategy.content)
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

    async fn find_strategy(&self, id: Uuid) -> Result<Option<Strategy>, AppError> {
        let strategy = sqlx::query_as::<_, Strategy>("SELECT * FROM strategies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(strategy)
    }

    async fn list_strategies_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Strategy>, AppError> {
        let strategies = sqlx::query_as::<_, Strategy>(
            "SELECT * FROM strategies WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(strategies)
    }

    async fn find_active_strategy(&self, company_id: Uuid) -> Result<Option<Strategy>, AppError> {
        let strategy = sqlx::query_as::<_, Strategy>(
            r#"
            SELECT * FROM strategies
            WHERE company_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(strategy)
    }

    async fn update_strategy_status(
        &self,
        id: Uuid,
        status: StrategyStatus,
    ) -> Result<Option<Strategy>, AppError> {
        let strategy = sqlx::query_as::<_, Strategy>(
            "UPDATE strategies SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(strategy)
    }

    async fn update_strategy_content(
        &self,
        id: Uuid,
        content: String,
        title: Option<String>,
    ) -> Result<Option<Strategy>, AppError> {
        let strategy = sqlx::query_as::<_, Strategy>(
            r#"
            UPDATE strategies
            SET content = $2, title = COALESCE($3, title), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(strategy)
    }
}
