//! Contract coverage for the stubbed game surface: room mutations, case
//! actions against the fixed mock context, and the result lookup.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::*;

#[tokio::test]
async fn health_answers_the_bare_probe_body() {
    let app = test_app();
    let response = get(&app, "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));
}

fn assert_mutation(
    body: &Value,
    target: &str,
    subject: &str,
    on_target: bool,
    changed: bool,
    reason: &str,
) {
    assert_envelope(body, true);
    assert_eq!(body["code"], "OK");
    let data = body["data"].as_object().expect("mutation data");
    assert_eq!(data.len(), 6, "mutation must carry six keys: {body}");
    assert_eq!(body["data"]["target"], target);
    assert_eq!(body["data"]["subject"], subject);
    assert_eq!(body["data"]["on_target"], on_target);
    assert_eq!(body["data"]["changed"], changed);
    assert_eq!(body["data"]["reason"], reason);
}

#[tokio::test]
async fn joining_a_room_reports_a_join_mutation() {
    let app = test_app();
    let room_id = uuid::Uuid::new_v4();
    let response = post_empty(&app, &format!("/api/v1/rooms/{room_id}/join"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_mutation(&body, "ROOM", "ME", true, true, "JOINED");
    assert!(body["data"]["subject_id"].is_null());
}

#[tokio::test]
async fn joining_needs_a_well_formed_room_id() {
    let app = test_app();
    let response = post_empty(&app, "/api/v1/rooms/not-a-uuid/join", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn leaving_reports_a_leave_mutation() {
    let app = test_app();
    let response = post_empty(&app, "/api/v1/rooms/current/leave", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_mutation(&body, "ROOM", "ME", false, true, "LEFT");
}

#[tokio::test]
async fn kicking_echoes_the_target_user() {
    let app = test_app();
    let user_id = uuid::Uuid::new_v4();
    let response = post_empty(
        &app,
        &format!("/api/v1/rooms/current/users/{user_id}/kick"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_mutation(&body, "ROOM", "USER", false, false, "NOT_IN_ROOM");
    assert_eq!(body["data"]["subject_id"], user_id.to_string());
}

#[tokio::test]
async fn case_start_accepts_a_seat_count_or_null() {
    let app = test_app();
    for body in [json!({ "red_player_count": 3 }), json!({ "red_player_count": null })] {
        let response = post_json(&app, "/api/v1/rooms/current/case-start", body, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_mutation(&body, "ROOM", "ME", true, true, "STARTED");
    }
}

#[tokio::test]
async fn case_start_validates_the_seat_count() {
    let app = test_app();
    for body in [json!({ "red_player_count": 9 }), json!({ "red_player_count": "three" })] {
        let response = post_json(&app, "/api/v1/rooms/current/case-start", body, None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_envelope(&body, false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

async fn red_vote(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    let response = post_json(app, "/api/v1/cases/current/red-vote", body, None).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn red_vote_accepts_a_valid_target() {
    let app = test_app();
    let (status, body) = red_vote(&app, json!({ "target_seat_no": 3 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, true);
    assert_eq!(body["data"]["action_id"], 1);
    assert_eq!(body["data"]["phase_id"], "00000000-0000-0000-0000-0000000000aa");
    let accepted_at = body["data"]["accepted_at"].as_str().unwrap();
    assert!(
        time::OffsetDateTime::parse(
            accepted_at,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok(),
        "accepted_at must be RFC 3339: {accepted_at}"
    );
}

#[tokio::test]
async fn red_vote_null_target_skips() {
    let app = test_app();
    let (status, body) = red_vote(&app, json!({ "target_seat_no": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, true);
    assert_eq!(body["data"]["phase_id"], "00000000-0000-0000-0000-000000000001");
}

#[tokio::test]
async fn red_vote_rejects_voting_for_yourself() {
    let app = test_app();
    let (status, body) = red_vote(&app, json!({ "target_seat_no": 0 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_envelope(&body, false);
    assert_eq!(body["code"], "NIGHT_REJECTED_SELF_VOTE");
}

#[tokio::test]
async fn red_vote_rejects_empty_seats() {
    let app = test_app();
    for seat in [6, 7] {
        let (status, body) = red_vote(&app, json!({ "target_seat_no": seat })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_envelope(&body, false);
        assert_eq!(body["code"], "TARGET_SEAT_EMPTY");
    }
}

#[tokio::test]
async fn red_vote_rejects_out_of_range_seats() {
    let app = test_app();
    let (status, body) = red_vote(&app, json!({ "target_seat_no": 8 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, false);
    assert_eq!(body["code"], "INVALID_TARGET_SEAT_NO");
}

#[tokio::test]
async fn red_vote_wraps_undecodable_seats_as_validation_errors() {
    let app = test_app();
    // negative and overflowing numbers never reach the seat check
    for body in [
        json!({ "target_seat_no": -1 }),
        json!({ "target_seat_no": 300 }),
        json!({ "target_seat_no": "three" }),
    ] {
        let (status, body) = red_vote(&app, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_envelope(&body, false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn red_vote_requires_a_json_body() {
    let app = test_app();
    let response = post_empty(&app, "/api/v1/cases/current/red-vote", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn init_blue_vote_conflicts_during_night() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/v1/cases/current/init-blue-vote",
        json!({ "target_seat_no": 3 }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "PHASE_REJECTED_CONFLICT_ACTION");
}

#[tokio::test]
async fn init_blue_vote_requires_a_target() {
    let app = test_app();
    let response = post_json(&app, "/api/v1/cases/current/init-blue-vote", json!({}), None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_envelope(&body_json(response).await, false);
}

#[tokio::test]
async fn blue_vote_conflicts_during_night() {
    let app = test_app();
    for choice in ["YES", "NO", "SKIP"] {
        let response = post_json(
            &app,
            "/api/v1/cases/current/blue-vote",
            json!({ "choice": choice }),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_envelope(&body, false);
        assert_eq!(body["code"], "PHASE_REJECTED_CONFLICT_ACTION");
    }
}

#[tokio::test]
async fn blue_vote_rejects_unknown_ballots() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/v1/cases/current/blue-vote",
        json!({ "choice": "MAYBE" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn force_skip_conflicts_during_night() {
    let app = test_app();
    let response = post_empty(&app, "/api/v1/cases/current/force-skip-discuss", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "PHASE_REJECTED_CONFLICT_ACTION");
}

#[tokio::test]
async fn case_result_translates_the_sentinel_ids() {
    let app = test_app();

    let response = get(
        &app,
        "/api/v1/cases/00000000-0000-0000-0000-000000000000/result",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "CASE_NOT_FOUND");

    let response = get(
        &app,
        "/api/v1/cases/00000000-0000-0000-0000-000000000001/result",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "CASE_RUNNING");
}

#[tokio::test]
async fn case_result_reports_the_fixed_outcome() {
    let app = test_app();
    let case_id = uuid::Uuid::new_v4();
    let response = get(&app, &format!("/api/v1/cases/{case_id}/result"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_envelope(&body, true);
    assert_eq!(body["data"]["winner"], "BLUE");
    assert_eq!(
        body["data"]["players"],
        json!([
            { "seat_no": 0, "team": "BLUE" },
            { "seat_no": 1, "team": "RED" },
            { "seat_no": 2, "team": "BLUE" },
            { "seat_no": 3, "team": "RED" },
        ])
    );
}

#[tokio::test]
async fn case_result_needs_a_well_formed_case_id() {
    let app = test_app();
    let response = get(&app, "/api/v1/cases/nope/result", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_envelope(&body, false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
