use chrono::Utc;
use serde_json::{Value, json};

use crate::support::*;

#[tokio::test]
async fn test_create_returns_stored_record() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    let resp = app.post("/analysis/", &create_body(&fixture, "KA-01")).await;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    let analysis = &body["analysis"];
    assert_eq!(analysis["truck_number"], "KA-01");
    assert_eq!(analysis["submitted_to_owner"], false);
    assert_eq!(analysis["verification_status"], Value::Null);
    assert_eq!(analysis["owner_id"], Value::Null);
    assert_eq!(analysis["predictions_corrected"], false);
    assert!(analysis["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_validation_rejects_bad_input() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    let mut body = create_body(&fixture, "   ");
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 400);

    body = create_body(&fixture, "KA-01");
    body["scrap_predictions"] = json!([]);
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 400);

    // Malformed predictions fail at deserialization.
    body = create_body(&fixture, "KA-01");
    body["scrap_predictions"] = json!([{"class": "K2", "confidence": 1.5}]);
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 400);

    body = create_body(&fixture, "KA-01");
    body["scrap_predictions"] = json!([{"class": "  ", "confidence": 0.5}]);
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 400);

    body = create_body(&fixture, "KA-01");
    body["scrap_image"] = json!("");
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_create_checks_identities() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let other = seed_factory(&app.db, "b").await;

    let mut body = create_body(&fixture, "KA-01");
    body["labourer_id"] = json!(9999);
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 404);

    body = create_body(&fixture, "KA-01");
    body["factory_id"] = json!(9999);
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 404);

    // A labourer cannot file records under another factory.
    body = create_body(&fixture, "KA-01");
    body["factory_id"] = json!(other.factory_id);
    let resp = app.post("/analysis/", &body).await;
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn test_get_sorts_scrap_predictions_but_not_plate() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    // Stored out of order; the read must not trust backend order.
    let id = insert_raw(
        &app.db,
        RawAnalysis {
            fixture: &fixture,
            truck: "KA-01",
            created_at: Utc::now(),
            submitted_at: None,
            status: None,
            scrap: json!([
                {"class": "CRC", "confidence": 0.11},
                {"class": "K2", "confidence": 0.82},
            ]),
        },
    )
    .await;

    let record = app.get_record(id).await;
    assert_eq!(
        record["scrap_predictions"],
        json!([
            {"class": "K2", "confidence": 0.82},
            {"class": "CRC", "confidence": 0.11},
        ])
    );
    // Plate predictions stay in reading order regardless of confidence.
    assert_eq!(record["plate_predictions"], plate_predictions());
}

#[tokio::test]
async fn test_get_unknown_analysis_is_not_found() {
    let app = TestApp::spawn().await;
    let resp = app.get("/analysis/9999").await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_delete_guard_over_the_whole_lifecycle() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    // Unsubmitted: deletable.
    let id = create_analysis(&app, &fixture, "KA-01").await;
    let resp = app.delete(&format!("/analysis/{id}")).await;
    assert_eq!(resp.status(), 200);
    let resp = app.get(&format!("/analysis/{id}")).await;
    assert_eq!(resp.status(), 404);

    // Pending: kept until the owner decides.
    let id = create_submitted(&app, &fixture, "KA-02").await;
    let resp = app.delete(&format!("/analysis/{id}")).await;
    assert_eq!(resp.status(), 409);
    assert_eq!(
        error_message(resp).await,
        "Analysis cannot be deleted in its current state"
    );

    // Approved: retained as the system of record.
    let resp = app
        .post("/owner/verify-analysis", &verify_body(&fixture, id, "approved"))
        .await;
    assert_eq!(resp.status(), 200);
    let resp = app.delete(&format!("/analysis/{id}")).await;
    assert_eq!(resp.status(), 409);

    // Rejected: deletable again.
    let id = create_submitted(&app, &fixture, "KA-03").await;
    let resp = app
        .post("/owner/verify-analysis", &verify_body(&fixture, id, "rejected"))
        .await;
    assert_eq!(resp.status(), 200);
    let resp = app.delete(&format!("/analysis/{id}")).await;
    assert_eq!(resp.status(), 200);

    // Deleting twice: the second caller learns it is gone, not forbidden.
    let resp = app.delete(&format!("/analysis/{id}")).await;
    assert_eq!(resp.status(), 404);
}
