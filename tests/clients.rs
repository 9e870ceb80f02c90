use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::net::TcpListener;
use uuid::Uuid;

use switchon::{
    models::{
        action::{Action, ActionStatus},
        company::Company,
    },
    services::{HttpNotifier, N8nClient, Notification, Notifier, WorkflowTrigger},
};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(String, HeaderMap, Value)>>>,
}

/// Throwaway server that records every POST and answers with `status`.
async fn spawn_server(status: StatusCode) -> (String, Captured) {
    let captured = Captured::default();

    async fn record(
        State((captured, status)): State<(Captured, StatusCode)>,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> StatusCode {
        captured
            .requests
            .lock()
            .unwrap()
            .push((uri.path().to_string(), headers, body));
        status
    }

    let app = Router::new()
        .route("/{*path}", post(record))
        .with_state((captured.clone(), status));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn action(action_type: &str) -> Action {
    Action {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        campaign_id: None,
        action_type: action_type.to_string(),
        content: "Send the case study".into(),
        status: ActionStatus::Approved,
        assigned_to: None,
        due_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn n8n_client_posts_the_action_to_its_webhook() {
    let (base_url, captured) = spawn_server(StatusCode::OK).await;
    let client = N8nClient::new(base_url, Some("n8n-secret".into()));
    let action = action("linkedin");

    client.trigger(&action).await.unwrap();

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (path, headers, body) = &requests[0];
    assert_eq!(path, "/webhook/linkedin-outreach");
    assert_eq!(headers.get("x-n8n-api-key").unwrap(), "n8n-secret");
    assert_eq!(body["id"], action.id.to_string());
    assert_eq!(body["type"], "linkedin");
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn n8n_error_status_is_an_error() {
    let (base_url, _) = spawn_server(StatusCode::BAD_GATEWAY).await;
    let client = N8nClient::new(base_url, None);

    let err = client.trigger(&action("email")).await.unwrap_err();
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn notifier_sends_api_key_and_payloads() {
    let (base_url, captured) = spawn_server(StatusCode::CREATED).await;
    let notifier = HttpNotifier::new(base_url, Some("notify-secret".into()));

    notifier
        .send_notification(&Notification {
            user_id: "user-1".into(),
            title: "Action Assigned".into(),
            message: "You have been assigned a new action: call".into(),
            link: Some("/actions/1".into()),
        })
        .await
        .unwrap();

    let company = Company {
        id: Uuid::new_v4(),
        name: "Acme".into(),
        industry: Some("SaaS".into()),
        arr: Some(Decimal::new(1_000, 0)),
        icp: Some(r#"{"industries":["Fintech"],"sizes":[],"decisionMakers":[]}"#.into()),
        ticket_size: None,
        channels: vec!["email".into()],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    notifier.register_onboarding(&company).await.unwrap();

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);

    let (path, headers, body) = &requests[0];
    assert_eq!(path, "/notifications");
    assert_eq!(headers.get("x-api-key").unwrap(), "notify-secret");
    assert_eq!(body["user_id"], "user-1");
    assert_eq!(body["link"], "/actions/1");

    let (path, _, body) = &requests[1];
    assert_eq!(path, "/onboarding/create");
    assert_eq!(body["companyName"], "Acme");
    assert_eq!(body["financialData"]["arr"].as_f64(), Some(1000.0));
    assert_eq!(body["icp"]["industries"][0], "Fintech");
}
