// src/db/company_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PgStore,
    models::company::{Company, CompanyChanges, NewCompany},
};

#[async_trait]
pub trait CompanyRepository {
    async fn create_company(&self, company: NewCompany) -> Result<Company, AppError>;

    async fn find_company(&self, id: Uuid) -> Result<Option<Company>, AppError>;

    /// Applies the non-empty fields of `changes`; `None` when the company does not exist.
    async fn update_company(
        &self,
        id: Uuid,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, AppError>;
}

#[async_trait]
impl CompanyRepository for PgStore {
    async fn create_company(&self, company: NewCompany) -> Result<Company, AppError> {
        let created = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, industry, arr, icp, ticket_size, channels)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&company.name)
        .bind(&company.industry)
        .bind(company.arr)
        .bind(&company.icp)
        .bind(company.ticket_size)
        .bind(&company.channels)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    async fn update_company(
        &self,
        id: Uuid,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, AppError> {
        let updated = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                industry = COALESCE($3, industry),
                arr = COALESCE($4, arr),
                icp = COALESCE($5, icp),
                ticket_size = COALESCE($6, ticket_size),
                channels = COALESCE($7, channels),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.industry)
        .bind(changes.arr)
        .bind(changes.icp)
        .bind(changes.ticket_size)
        .bind(changes.channels)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
