mod helpers;

use chrono::{DateTime, Utc};
use helpers::fixtures::pdf_part;
use helpers::{setup_test_app, submit_claim};
use serde_json::{json, Value};

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .expect("rfc3339 timestamp")
}

#[tokio::test]
async fn approving_a_pending_claim_refreshes_updated_at() {
    let app = setup_test_app().await;
    let claim_id = submit_claim(&app, vec![pdf_part("receipt.pdf")]).await;

    let response = app
        .server
        .patch(&format!("/api/claims/{claim_id}"))
        .json(&json!({"status": "approved"}))
        .await;
    assert_eq!(response.status_code(), 200, "body: {}", response.text());

    let claim: Value = response.json();
    assert_eq!(claim["status"], "approved");
    assert_eq!(claim["claim_id"], claim_id.as_str());
    assert!(
        timestamp(&claim["updated_at"]) > timestamp(&claim["created_at"]),
        "updated_at must be refreshed past created_at"
    );
}

#[tokio::test]
async fn rejecting_a_pending_claim_works() {
    let app = setup_test_app().await;
    let claim_id = submit_claim(&app, vec![pdf_part("receipt.pdf")]).await;

    let response = app
        .server
        .patch(&format!("/api/claims/{claim_id}"))
        .json(&json!({"status": "rejected"}))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["status"], "rejected");
}

#[tokio::test]
async fn non_pending_claims_cannot_be_retransitioned() {
    let app = setup_test_app().await;
    let claim_id = submit_claim(&app, vec![pdf_part("receipt.pdf")]).await;

    let first = app
        .server
        .patch(&format!("/api/claims/{claim_id}"))
        .json(&json!({"status": "rejected"}))
        .await;
    assert_eq!(first.status_code(), 200);

    // Re-approving a rejected claim is not a pending edge.
    let second = app
        .server
        .patch(&format!("/api/claims/{claim_id}"))
        .json(&json!({"status": "approved"}))
        .await;
    assert_eq!(second.status_code(), 409);
    assert_eq!(second.json::<Value>()["code"], "INVALID_TRANSITION");

    // Same-state re-apply is rejected the same way.
    let again = app
        .server
        .patch(&format!("/api/claims/{claim_id}"))
        .json(&json!({"status": "rejected"}))
        .await;
    assert_eq!(again.status_code(), 409);
}

#[tokio::test]
async fn invalid_status_value_is_400() {
    let app = setup_test_app().await;
    let claim_id = submit_claim(&app, vec![pdf_part("receipt.pdf")]).await;

    for bad in ["pending", "Approved", "done"] {
        let response = app
            .server
            .patch(&format!("/api/claims/{claim_id}"))
            .json(&json!({"status": bad}))
            .await;
        assert_eq!(response.status_code(), 400, "status value {bad}");
    }
}

#[tokio::test]
async fn unknown_claim_is_404() {
    let app = setup_test_app().await;

    let response = app
        .server
        .patch("/api/claims/CLM-2026-9999")
        .json(&json!({"status": "approved"}))
        .await;
    assert_eq!(response.status_code(), 404);
}
