use chrono::{Duration, Utc};
use serde_json::Value;

use common::VerificationStatus;

use crate::support::*;

#[tokio::test]
async fn test_submit_moves_record_into_owner_queue() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let id = create_analysis(&app, &fixture, "KA-01-HG-1234").await;

    // Freshly created: visible to the labourer, invisible to the owner.
    let resp = app
        .get(&format!(
            "/labourer/pending-submissions?labourer_id={}",
            fixture.labourer_id
        ))
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(ids(&body, "pending"), vec![id as i64]);
    assert_eq!(body["pending"][0]["submitted_to_owner"], false);
    assert_eq!(body["pending"][0]["verification_status"], Value::Null);

    let resp = app
        .get(&format!(
            "/owner/pending-verifications?factory_id={}",
            fixture.factory_id
        ))
        .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pending_verifications"].as_array().unwrap().len(), 0);

    let resp = app
        .post(
            "/labourer/submit-analysis",
            &submit_body(&fixture, id, Some("Mixed load")),
        )
        .await;
    assert_eq!(resp.status(), 200);

    // Submitted: pending for the owner, joined with labourer identity.
    let resp = app
        .get(&format!(
            "/owner/pending-verifications?factory_id={}",
            fixture.factory_id
        ))
        .await;
    let body: Value = resp.json().await.unwrap();
    let entry = &body["pending_verifications"][0];
    assert_eq!(entry["id"], id);
    assert_eq!(entry["labourer_name"], "Labourer a");
    assert_eq!(entry["labourer_email"], "labourer-a@example.com");
    assert_eq!(entry["employee_id"], "EMP-a");

    let record = app.get_record(id).await;
    assert_eq!(record["submitted_to_owner"], true);
    assert_eq!(record["verification_status"], "pending");
    assert_eq!(record["labourer_notes"], "Mixed load");
    assert_eq!(record["owner_id"], fixture.owner_id);
    assert!(record["submission_timestamp"].is_string());
    assert_eq!(record["verification_timestamp"], Value::Null);
}

#[tokio::test]
async fn test_second_submit_conflicts_and_changes_nothing() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let id = create_submitted(&app, &fixture, "KA-02").await;

    let before = app.get_record(id).await;

    let resp = app
        .post(
            "/labourer/submit-analysis",
            &submit_body(&fixture, id, Some("second attempt")),
        )
        .await;
    assert_eq!(resp.status(), 409);
    assert_eq!(
        error_message(resp).await,
        "Analysis has already been submitted for verification"
    );

    // The losing submit must not touch timestamps or notes.
    let after = app.get_record(id).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_concurrent_submits_have_one_winner() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let id = create_analysis(&app, &fixture, "KA-03").await;

    let body = submit_body(&fixture, id, None);
    let (first, second) = tokio::join!(
        app.post("/labourer/submit-analysis", &body),
        app.post("/labourer/submit-analysis", &body),
    );

    let statuses = [first.status().as_u16(), second.status().as_u16()];
    assert_eq!(
        statuses.iter().filter(|s| **s == 200).count(),
        1,
        "exactly one submit must win, got {statuses:?}"
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == 409).count(),
        1,
        "the losing submit must conflict, got {statuses:?}"
    );
}

#[tokio::test]
async fn test_submit_identity_mismatch_is_forbidden_and_generic() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let other = seed_factory(&app.db, "b").await;
    let id = create_analysis(&app, &fixture, "KA-04").await;

    // Another factory's labourer.
    let resp = app
        .post("/labourer/submit-analysis", &submit_body(&other, id, None))
        .await;
    assert_eq!(resp.status(), 403);
    assert_eq!(
        error_message(resp).await,
        "You do not have permission to act on this analysis"
    );

    // Right labourer, wrong factory: same generic message, no hint which
    // field mismatched.
    let mixed = Fixture {
        factory_id: other.factory_id,
        owner_id: fixture.owner_id,
        labourer_id: fixture.labourer_id,
    };
    let resp = app
        .post("/labourer/submit-analysis", &submit_body(&mixed, id, None))
        .await;
    assert_eq!(resp.status(), 403);
    assert_eq!(
        error_message(resp).await,
        "You do not have permission to act on this analysis"
    );

    // Untouched by either attempt.
    let record = app.get_record(id).await;
    assert_eq!(record["submitted_to_owner"], false);
}

#[tokio::test]
async fn test_submit_unknown_analysis_is_not_found() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    let resp = app
        .post("/labourer/submit-analysis", &submit_body(&fixture, 9999, None))
        .await;
    assert_eq!(resp.status(), 404);
    assert_eq!(error_message(resp).await, "Analysis not found");
}

#[tokio::test]
async fn test_pending_list_hides_approved_keeps_rejected() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    let unsubmitted = create_analysis(&app, &fixture, "T-1").await;
    let approved = create_submitted(&app, &fixture, "T-2").await;
    let rejected = create_submitted(&app, &fixture, "T-3").await;

    for (id, decision) in [(approved, "approved"), (rejected, "rejected")] {
        let resp = app
            .post("/owner/verify-analysis", &verify_body(&fixture, id, decision))
            .await;
        assert_eq!(resp.status(), 200);
    }

    let resp = app
        .get(&format!(
            "/labourer/pending-submissions?labourer_id={}",
            fixture.labourer_id
        ))
        .await;
    let body: Value = resp.json().await.unwrap();
    let pending = ids(&body, "pending");
    assert!(pending.contains(&(unsubmitted as i64)));
    assert!(pending.contains(&(rejected as i64)));
    assert!(!pending.contains(&(approved as i64)));

    // History keeps everything.
    let resp = app
        .get(&format!(
            "/labourer/history?labourer_id={}",
            fixture.labourer_id
        ))
        .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["history"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_pending_list_is_newest_first_with_stable_ties() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;

    let base = Utc::now() - Duration::minutes(30);
    let old = insert_raw(
        &app.db,
        RawAnalysis {
            fixture: &fixture,
            truck: "OLD",
            created_at: base,
            submitted_at: None,
            status: None,
            scrap: scrap_predictions(),
        },
    )
    .await;
    let tied_first = insert_raw(
        &app.db,
        RawAnalysis {
            fixture: &fixture,
            truck: "TIE-1",
            created_at: base + Duration::minutes(10),
            submitted_at: None,
            status: None,
            scrap: scrap_predictions(),
        },
    )
    .await;
    let tied_second = insert_raw(
        &app.db,
        RawAnalysis {
            fixture: &fixture,
            truck: "TIE-2",
            created_at: base + Duration::minutes(10),
            submitted_at: None,
            status: None,
            scrap: scrap_predictions(),
        },
    )
    .await;

    let resp = app
        .get(&format!(
            "/labourer/pending-submissions?labourer_id={}",
            fixture.labourer_id
        ))
        .await;
    let body: Value = resp.json().await.unwrap();

    // Newest first; equal timestamps keep insertion (id) order.
    assert_eq!(
        ids(&body, "pending"),
        vec![tied_first as i64, tied_second as i64, old as i64]
    );
}

#[tokio::test]
async fn test_pending_list_only_shows_own_records() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let other = seed_factory(&app.db, "b").await;
    create_analysis(&app, &fixture, "KA-05").await;

    let resp = app
        .get(&format!(
            "/labourer/pending-submissions?labourer_id={}",
            other.labourer_id
        ))
        .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pending"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_overlong_notes_rejected() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let id = create_analysis(&app, &fixture, "KA-06").await;

    let notes = "x".repeat(2001);
    let resp = app
        .post(
            "/labourer/submit-analysis",
            &submit_body(&fixture, id, Some(&notes)),
        )
        .await;
    assert_eq!(resp.status(), 400);

    // Still submittable afterwards.
    let resp = app
        .post("/labourer/submit-analysis", &submit_body(&fixture, id, None))
        .await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_rejected_record_status_visible_to_labourer() {
    let app = TestApp::spawn().await;
    let fixture = seed_factory(&app.db, "a").await;
    let id = create_submitted(&app, &fixture, "KA-07").await;

    let resp = app
        .post("/owner/verify-analysis", &verify_body(&fixture, id, "rejected"))
        .await;
    assert_eq!(resp.status(), 200);

    let record = app.get_record(id).await;
    assert_eq!(record["verification_status"], "rejected");
    assert_eq!(
        serde_json::from_value::<Option<VerificationStatus>>(
            record["verification_status"].clone()
        )
        .unwrap(),
        Some(VerificationStatus::Rejected)
    );
}
