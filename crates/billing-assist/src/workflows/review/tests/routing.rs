use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

#[tokio::test]
async fn suggest_route_returns_suggestion() {
    let response = router(service())
        .oneshot(post_json(
            "/api/v1/coding/suggest",
            serde_json::to_value(screening_visit()).expect("encode visit"),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["recommended_cpts"][0]["code"], "99214");
    assert_eq!(body["recommended_icds"], json!(["F32.A", "N18.30", "Z13.31"]));
}

#[tokio::test]
async fn suggest_route_rejects_malformed_dates() {
    let response = router(service())
        .oneshot(post_json(
            "/api/v1/coding/suggest",
            json!({ "dos": "Aug 26 2025", "visit_type": "OV" }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("Aug 26 2025"));
}

#[tokio::test]
async fn score_route_applies_inline_stats() {
    let response = router(service())
        .oneshot(post_json(
            "/api/v1/claims/score",
            json!({
                "claims": [
                    {"id": "12345", "payer": "MC",
                     "cpts": [{"code": "99214", "modifiers": []}, {"code": "G0444", "modifiers": []}],
                     "icds": ["F32.A"]},
                    {"id": "12346", "payer": "BCBS",
                     "cpts": [{"code": "99213", "modifiers": ["25"]}, {"code": "G0444", "modifiers": []}],
                     "icds": ["Z13.31"]}
                ],
                "stats": {"payer_bumps": {"MC": 0.1}}
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["claim_stub_id"], "12345");
    assert_eq!(body[0]["risk"], 0.4);
    assert_eq!(body[1]["top_factors"], json!(["No rule hits"]));
}

#[tokio::test]
async fn score_route_rejects_out_of_range_bumps() {
    let response = router(service())
        .oneshot(post_json(
            "/api/v1/claims/score",
            json!({ "claims": [], "stats": {"payer_bumps": {"MC": 2.0}} }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_route_reports_each_visit() {
    let mut broken = serde_json::to_value(screening_visit()).expect("encode visit");
    broken["dos"] = json!("tomorrow");
    broken["id"] = json!("bad");
    let mut good = serde_json::to_value(screening_visit()).expect("encode visit");
    good["id"] = json!("good");
    good["payer"] = json!("BCBS");

    let response = router(service())
        .oneshot(post_json("/api/v1/review", json!({ "visits": [good, broken] })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["status"], "reviewed");
    assert_eq!(body[0]["claim"]["payer"], "BCBS");
    assert_eq!(body[1]["status"], "rejected");
    assert_eq!(body[1]["id"], "bad");
}
