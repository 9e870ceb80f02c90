mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn lead_scoring_at_threshold_qualifies_and_queues_outreach() {
    let app = TestApp::new("Qualification score: 85/100\nBudget and role match the ICP.");
    let company = app.onboard_company("Acme").await;
    let company_id = company["id"].as_str().unwrap();
    let lead = app.create_lead(company_id, "Maria").await;
    let lead_id = lead["id"].as_str().unwrap();

    let (status, body) = app.post(&format!("/api/leads/{lead_id}/qualify"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["score"], 85);
    assert_eq!(data["lead"]["status"], "qualified");
    assert_eq!(data["lead"]["qualification_score"], 85);
    assert_eq!(data["action"]["type"], "outreach");
    assert_eq!(data["action"]["status"], "pending");

    let due: DateTime<Utc> = data["action"]["due_date"].as_str().unwrap().parse().unwrap();
    let expected = Utc::now() + Duration::days(2);
    assert!((expected - due).num_minutes().abs() < 5);

    let prompt = app.completion.prompts.lock().unwrap().last().cloned().unwrap();
    assert!(prompt.contains("Name: Maria"));
    assert!(prompt.contains("\"decisionMakers\":[\"CTO\"]"));

    let (_, body) = app.get(&format!("/api/actions/company/{company_id}?type=outreach")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn low_scores_disqualify_without_an_action() {
    let app = TestApp::new("Score: 40. Wrong industry.");
    let company = app.onboard_company("Acme").await;
    let company_id = company["id"].as_str().unwrap();
    let lead = app.create_lead(company_id, "Maria").await;

    let (status, body) = app
        .post(&format!("/api/leads/{}/qualify", lead["id"].as_str().unwrap()), json!({}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lead"]["status"], "disqualified");
    assert!(body["data"]["action"].is_null());

    let (_, body) = app.get(&format!("/api/actions/company/{company_id}")).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_assessment_leaves_the_lead_new() {
    let app = TestApp::new("I cannot assess this lead.");
    let company = app.onboard_company("Acme").await;
    let lead = app.create_lead(company["id"].as_str().unwrap(), "Maria").await;
    let lead_id = lead["id"].as_str().unwrap();

    let (status, _) = app.post(&format!("/api/leads/{lead_id}/qualify"), json!({})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = app.get(&format!("/api/leads/{lead_id}")).await;
    assert_eq!(body["data"]["status"], "new");
    assert!(body["data"]["qualification_score"].is_null());
}

#[tokio::test]
async fn leads_need_a_company_and_a_name() {
    let app = TestApp::new("unused");

    let (status, _) = app
        .post(
            "/api/leads",
            json!({ "company_id": "00000000-0000-0000-0000-000000000000", "name": "Maria" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let company = app.onboard_company("Acme").await;
    let (status, body) = app
        .post("/api/leads", json!({ "company_id": company["id"], "name": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["name"][0], "Lead name is required");

    let (status, _) = app
        .get("/api/leads/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
