#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use switchon::{
    agents::{
        completion::{CompletionClient, CompletionRequest},
        AgentConfig, Agents,
    },
    app,
    config::AppState,
    db::{MemoryStore, Store},
    models::{action::Action, company::Company, strategy::Strategy},
    services::{workflow::webhook_path, Notification, Notifier, WorkflowTrigger},
};

// =============================================================================
//  FAKES
// =============================================================================

/// Answers every prompt with the same text (or the same error).
pub struct ScriptedCompletion {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.reply.clone().map_err(anyhow::Error::msg)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub notifications: Mutex<Vec<Notification>>,
    pub approvals: Mutex<Vec<(Uuid, Option<String>)>>,
    pub onboardings: Mutex<Vec<Uuid>>,
}

impl RecordingNotifier {
    fn outcome(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("notification service unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_notification(&self, notification: &Notification) -> anyhow::Result<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        self.outcome()
    }

    async fn request_strategy_approval(
        &self,
        strategy: &Strategy,
        user_id: Option<&str>,
    ) -> anyhow::Result<()> {
        self.approvals
            .lock()
            .unwrap()
            .push((strategy.id, user_id.map(str::to_string)));
        self.outcome()
    }

    async fn register_onboarding(&self, company: &Company) -> anyhow::Result<()> {
        self.onboardings.lock().unwrap().push(company.id);
        self.outcome()
    }
}

/// Records the webhook path each triggered action would hit.
#[derive(Default)]
pub struct RecordingWorkflows {
    pub fail: bool,
    pub calls: Mutex<Vec<(&'static str, Uuid)>>,
}

#[async_trait]
impl WorkflowTrigger for RecordingWorkflows {
    async fn trigger(&self, action: &Action) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((webhook_path(&action.action_type), action.id));
        if self.fail {
            anyhow::bail!("n8n returned 502");
        }
        Ok(())
    }
}

// =============================================================================
//  APP
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub completion: Arc<ScriptedCompletion>,
    pub notifier: Arc<RecordingNotifier>,
    pub workflows: Arc<RecordingWorkflows>,
}

impl TestApp {
    pub fn new(reply: &str) -> Self {
        Self::build(ScriptedCompletion::replying(reply), false)
    }

    /// Notifications and webhooks both fail.
    pub fn with_failing_side_effects(reply: &str) -> Self {
        Self::build(ScriptedCompletion::replying(reply), true)
    }

    pub fn with_failing_completion(message: &str) -> Self {
        Self::build(ScriptedCompletion::failing(message), false)
    }

    fn build(completion: ScriptedCompletion, side_effects_fail: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let completion = Arc::new(completion);
        let notifier = Arc::new(RecordingNotifier {
            fail: side_effects_fail,
            ..Default::default()
        });
        let workflows = Arc::new(RecordingWorkflows {
            fail: side_effects_fail,
            ..Default::default()
        });

        let dyn_store: Arc<dyn Store> = store.clone();
        let state = AppState::from_parts(
            dyn_store,
            Agents::new(completion.clone(), AgentConfig::default()),
            notifier.clone(),
            workflows.clone(),
        );

        Self {
            router: app::router(state),
            store,
            completion,
            notifier,
            workflows,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    // --- Seeding through the public API ---

    pub async fn onboard_company(&self, name: &str) -> Value {
        let (status, body) = self.post("/api/onboarding/company", onboarding_payload(name)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    pub async fn create_lead(&self, company_id: &str, name: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/leads",
                json!({
                    "company_id": company_id,
                    "name": name,
                    "email": "maria@globex.com",
                    "company": "Globex",
                    "position": "Head of Growth",
                    "pain_points": "Manual reporting"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    /// Generates a strategy and marks it active.
    pub async fn active_strategy(&self, company_id: &str) -> Value {
        let (status, body) = self
            .post("/api/strategy/generate", json!({ "company_id": company_id }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = self
            .put(&format!("/api/strategy/{id}/status"), json!({ "status": "active" }))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"].clone()
    }

    pub async fn create_campaign(&self, company_id: &str) -> Value {
        self.active_strategy(company_id).await;
        let lead = self.create_lead(company_id, "Maria").await;
        let (status, body) = self
            .post(
                "/api/content/generate",
                json!({ "company_id": company_id, "lead_id": lead["id"], "channel": "email" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    pub async fn create_action(&self, company_id: &str, action_type: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/actions",
                json!({
                    "company_id": company_id,
                    "type": action_type,
                    "content": format!("{action_type} follow-up")
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }
}

pub fn onboarding_payload(name: &str) -> Value {
    json!({
        "company": { "name": name, "industry": "SaaS" },
        "financial": { "arr": 1200000, "ticketSize": 15000 },
        "icp": {
            "industries": ["Fintech"],
            "sizes": ["51-200"],
            "decisionMakers": ["CTO"]
        },
        "marketing": { "channels": ["email", "linkedin"] }
    })
}
