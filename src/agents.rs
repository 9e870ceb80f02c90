// src/agents.rs

pub mod campaign_optimizer;
pub mod completion;
pub mod lead_qualifier;
pub mod outreach_creator;
pub mod strategy_architect;

use std::{fmt::Display, marker::PhantomData, sync::Arc};

use campaign_optimizer::CampaignOptimizer;
use completion::{CompletionClient, CompletionRequest};
use lead_qualifier::LeadQualifier;
use outreach_creator::OutreachCreator;
use strategy_architect::StrategyArchitect;

/// A marketing task expressed as a prompt template.
///
/// Roles carry no state; `Agent<R>` owns the completion client and the
/// model parameters and is the only thing that talks to the API.
pub trait AgentRole: Send + Sync + 'static {
    type Input: Sync;

    fn name() -> &'static str;

    fn prompt(input: &Self::Input) -> String;
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

pub struct Agent<R> {
    client: Arc<dyn CompletionClient>,
    config: AgentConfig,
    _role: PhantomData<fn() -> R>,
}

impl<R> Clone for Agent<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
            _role: PhantomData,
        }
    }
}

impl<R: AgentRole> Agent<R> {
    pub fn new(client: Arc<dyn CompletionClient>, config: AgentConfig) -> Self {
        Self {
            client,
            config,
            _role: PhantomData,
        }
    }

    /// Renders the role's prompt and returns the model's answer, trimmed.
    /// Client errors are returned as-is.
    pub async fn generate(&self, input: &R::Input) -> anyhow::Result<String> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            prompt: R::prompt(input),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::info!(agent = R::name(), model = %request.model, "requesting completion");

        let text = self.client.complete(&request).await?;
        Ok(text.trim().to_string())
    }
}

/// The four agents, built once at start-up and shared through `AppState`.
#[derive(Clone)]
pub struct Agents {
    pub strategy_architect: Agent<StrategyArchitect>,
    pub lead_qualifier: Agent<LeadQualifier>,
    pub outreach_creator: Agent<OutreachCreator>,
    pub campaign_optimizer: Agent<CampaignOptimizer>,
}

impl Agents {
    pub fn new(client: Arc<dyn CompletionClient>, config: AgentConfig) -> Self {
        Self {
            strategy_architect: Agent::new(Arc::clone(&client), config.clone()),
            lead_qualifier: Agent::new(Arc::clone(&client), config.clone()),
            outreach_creator: Agent::new(Arc::clone(&client), config.clone()),
            campaign_optimizer: Agent::new(client, config),
        }
    }
}

const NOT_SPECIFIED: &str = "Not specified";

// Prompt rendering for optional fields.
fn field<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        values.join(", ")
    }
}
