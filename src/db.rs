// src/db.rs

pub mod action_repo;
pub mod campaign_repo;
pub mod company_repo;
pub mod lead_repo;
pub mod meeting_repo;
pub mod memory;
pub mod metrics_repo;
pub mod strategy_repo;
pub mod user_repo;

pub use action_repo::ActionRepository;
pub use campaign_repo::CampaignRepository;
pub use company_repo::CompanyRepository;
pub use lead_repo::LeadRepository;
pub use meeting_repo::MeetingRepository;
pub use memory::MemoryStore;
pub use metrics_repo::MetricsRepository;
pub use strategy_repo::StrategyRepository;
pub use user_repo::UserRepository;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Everything the handlers need from persistence.
pub trait Store:
    CompanyRepository
    + UserRepository
    + StrategyRepository
    + LeadRepository
    + CampaignRepository
    + MetricsRepository
    + ActionRepository
    + MeetingRepository
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: CompanyRepository
        + UserRepository
        + StrategyRepository
        + LeadRepository
        + CampaignRepository
        + MetricsRepository
        + ActionRepository
        + MeetingRepository
        + Send
        + Sync
{
}

/// Postgres-backed store. Each repository trait is implemented in its own
/// `*_repo.rs` file.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        tracing::info!("✅ Database connection established");

        sqlx::migrate!().run(&pool).await?;

        tracing::info!("✅ Database migrations applied");

        Ok(Self::new(pool))
    }
}
