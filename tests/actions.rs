mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn approving_an_email_action_hits_the_email_webhook_once() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "email").await;
    let id = action["id"].as_str().unwrap();

    let (status, body) = app
        .put(&format!("/api/actions/{id}/status"), json!({ "status": "approved" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    let calls = app.workflows.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/webhook/email-outreach");
    assert_eq!(calls[0].1.to_string(), id);
}

#[tokio::test]
async fn unknown_types_use_the_generic_webhook() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "webinar").await;

    app.put(
        &format!("/api/actions/{}/status", action["id"].as_str().unwrap()),
        json!({ "status": "approved" }),
    )
    .await;

    let calls = app.workflows.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/webhook/generic-action");
}

#[tokio::test]
async fn webhook_failure_keeps_the_approval() {
    let app = TestApp::with_failing_side_effects("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "sms").await;
    let id = action["id"].as_str().unwrap();

    let (status, body) = app
        .put(&format!("/api/actions/{id}/status"), json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = app.get(&format!("/api/actions/{id}")).await;
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(app.workflows.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn other_statuses_do_not_trigger_workflows() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "email").await;
    let id = action["id"].as_str().unwrap();

    for status in ["rejected", "completed", "pending"] {
        let (code, _) = app
            .put(&format!("/api/actions/{id}/status"), json!({ "status": status }))
            .await;
        assert_eq!(code, StatusCode::OK);
    }
    assert!(app.workflows.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_status_leaves_the_action_untouched() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "email").await;
    let id = action["id"].as_str().unwrap();

    let (status, body) = app
        .put(&format!("/api/actions/{id}/status"), json!({ "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status value");

    let (_, body) = app.get(&format!("/api/actions/{id}")).await;
    assert_eq!(body["data"]["status"], "pending");
    assert!(app.workflows.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn assignment_notifies_the_assignee() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "meeting").await;
    let id = action["id"].as_str().unwrap();

    let (status, body) = app
        .put(&format!("/api/actions/{id}/assign"), json!({ "assigned_to": "user-42" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Action assigned successfully");
    assert_eq!(body["data"]["assigned_to"], "user-42");

    let notifications = app.notifier.notifications.lock().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id, "user-42");
    assert_eq!(notifications[0].title, "Action Assigned");
    assert_eq!(
        notifications[0].message,
        "You have been assigned a new action: meeting follow-up"
    );
    assert_eq!(notifications[0].link.as_deref(), Some(format!("/actions/{id}").as_str()));
}

#[tokio::test]
async fn assignment_requires_an_assignee() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let action = app.create_action(company["id"].as_str().unwrap(), "email").await;

    let (status, body) = app
        .put(
            &format!("/api/actions/{}/assign", action["id"].as_str().unwrap()),
            json!({ "assigned_to": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["assigned_to"][0], "Assigned to is required");
    assert!(app.notifier.notifications.lock().unwrap().is_empty());

    let (status, _) = app
        .put(
            "/api/actions/00000000-0000-0000-0000-000000000000/assign",
            json!({ "assigned_to": "user-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn new_actions_start_pending() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;

    let (status, body) = app
        .post(
            "/api/actions",
            json!({
                "company_id": company["id"],
                "type": "email",
                "content": "Send the case study",
                "assigned_to": "user-1",
                "due_date": "2025-06-01T09:00:00Z"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["type"], "email");
    assert_eq!(body["data"]["assigned_to"], "user-1");

    let (status, _) = app
        .post(
            "/api/actions",
            json!({ "company_id": company["id"], "type": "email", "content": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn actions_filter_by_status_and_type() {
    let app = TestApp::new("unused");
    let company = app.onboard_company("Acme").await;
    let company_id = company["id"].as_str().unwrap();

    let email = app.create_action(company_id, "email").await;
    app.create_action(company_id, "sms").await;
    app.put(
        &format!("/api/actions/{}/status", email["id"].as_str().unwrap()),
        json!({ "status": "approved" }),
    )
    .await;

    let (_, body) = app.get(&format!("/api/actions/company/{company_id}")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["type"], "sms");

    let (_, body) = app
        .get(&format!("/api/actions/company/{company_id}?status=approved"))
        .await;
    let approved = body["data"].as_array().unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0]["id"], email["id"]);

    let (_, body) = app
        .get(&format!("/api/actions/company/{company_id}?type=sms&status=approved"))
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = app
        .get(&format!("/api/actions/company/{company_id}?status=bogus"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
