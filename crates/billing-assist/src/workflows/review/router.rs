use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::VisitRequest;
use super::service::BillingReviewService;
use crate::workflows::coding::Visit;
use crate::workflows::denial::{AggregateStats, ClaimStub};

/// Claims to score, optionally with an inline stats snapshot for this batch.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub claims: Vec<ClaimStub>,
    #[serde(default)]
    pub stats: Option<AggregateStats>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub visits: Vec<VisitRequest>,
}

/// Router builder exposing the coding and scoring engines.
pub fn review_router(service: Arc<BillingReviewService>) -> Router {
    Router::new()
        .route("/api/v1/coding/suggest", post(suggest_handler))
        .route("/api/v1/claims/score", post(score_handler))
        .route("/api/v1/review", post(review_handler))
        .with_state(service)
}

pub(crate) async fn suggest_handler(
    State(service): State<Arc<BillingReviewService>>,
    axum::Json(visit): axum::Json<Visit>,
) -> Response {
    match service.suggest(&visit) {
        Ok(suggestion) => (StatusCode::OK, axum::Json(suggestion)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler(
    State(service): State<Arc<BillingReviewService>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    let ScoreRequest { claims, stats } = request;

    if let Some(Err(error)) = stats.as_ref().map(AggregateStats::validate) {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let scored = service.score_batch(&claims, stats.as_ref());
    (StatusCode::OK, axum::Json(scored)).into_response()
}

pub(crate) async fn review_handler(
    State(service): State<Arc<BillingReviewService>>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response {
    let records = service.review_batch(&request.visits);
    (StatusCode::OK, axum::Json(records)).into_response()
}
