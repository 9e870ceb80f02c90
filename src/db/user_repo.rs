// src/db/user_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::user::{NewUser, User},
};

#[async_trait]
pub trait UserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn list_users_by_company(&self, company_id: Uuid) -> Result<Vec<User>, AppError>;
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, company_id, role) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&user.email)
        .bind(user.company_id)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Company");
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn list_users_by_company(&self, company_id: Uuid) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE company_id = $1 ORDER BY created_at ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
