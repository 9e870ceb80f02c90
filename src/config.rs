// src/config.rs

use std::{env, str::FromStr, sync::Arc};

use anyhow::Context;

use crate::{
    agents::{completion::OpenAiClient, AgentConfig, Agents},
    db::{PgStore, Store},
    services::{DisabledNotifier, HttpNotifier, N8nClient, Notifier, WorkflowTrigger},
};

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub agent: AgentConfig,
    pub n8n_base_url: String,
    pub n8n_api_key: Option<String>,
    pub notify_api_url: Option<String>,
    pub notify_api_key: Option<String>,
}

/// Blank values count as unset.
struct Source<F>(F);

impl<F: Fn(&str) -> Option<String>> Source<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> anyhow::Result<String> {
        self.optional(key)
            .with_context(|| format!("{key} must be set"))
    }

    fn parsed<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.optional(key) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("{key} has an invalid value: {raw}")),
            None => Ok(default),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let source = Source(lookup);

        let defaults = AgentConfig::default();
        let agent = AgentConfig {
            model: source.optional("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: source.parsed("OPENAI_TEMPERATURE", defaults.temperature)?,
            max_tokens: source.parsed("OPENAI_MAX_TOKENS", defaults.max_tokens)?,
        };

        Ok(Self {
            database_url: source.required("DATABASE_URL")?,
            port: source.parsed("PORT", 3000)?,
            openai_api_key: source.optional("OPENAI_API_KEY"),
            openai_base_url: source
                .optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            agent,
            n8n_base_url: source
                .optional("N8N_BASE_URL")
                .unwrap_or_else(|| "http://localhost:5678".to_string()),
            n8n_api_key: source.optional("N8N_API_KEY"),
            notify_api_url: source.optional("NOTIFY_API_URL"),
            notify_api_key: source.optional("NOTIFY_API_KEY"),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub agents: Agents,
    pub notifier: Arc<dyn Notifier>,
    pub workflows: Arc<dyn WorkflowTrigger>,
}

impl AppState {
    /// Connects to Postgres and builds the outbound clients.
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn Store> = Arc::new(PgStore::connect(&settings.database_url).await?);

        if settings.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set, agent calls will be rejected upstream");
        }
        let completion = Arc::new(OpenAiClient::new(
            settings.openai_base_url.clone(),
            settings.openai_api_key.clone(),
        ));

        let notifier: Arc<dyn Notifier> = match &settings.notify_api_url {
            Some(url) => Arc::new(HttpNotifier::new(url.clone(), settings.notify_api_key.clone())),
            None => {
                tracing::info!("NOTIFY_API_URL not set, notifications disabled");
                Arc::new(DisabledNotifier)
            }
        };

        let workflows = Arc::new(N8nClient::new(
            settings.n8n_base_url.clone(),
            settings.n8n_api_key.clone(),
        ));

        Ok(Self::from_parts(
            store,
            Agents::new(completion, settings.agent.clone()),
            notifier,
            workflows,
        ))
    }

    pub fn from_parts(
        store: Arc<dyn Store>,
        agents: Agents,
        notifier: Arc<dyn Notifier>,
        workflows: Arc<dyn WorkflowTrigger>,
    ) -> Self {
        Self {
            store,
            agents,
            notifier,
            workflows,
        }
    }
}
