use std::collections::BTreeSet;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::coding::{RuleTables, Visit, VisitHistory};
use crate::workflows::denial::AggregateStats;
use crate::workflows::review::{review_router, BillingReviewService, VisitRequest};

pub(super) fn service() -> BillingReviewService {
    BillingReviewService::new(RuleTables::standard(), "MC")
}

pub(super) fn service_with_bumps(bumps: &[(&str, f64)]) -> BillingReviewService {
    let stats = AggregateStats {
        payer_bumps: bumps
            .iter()
            .map(|(payer, bump)| (payer.to_string(), *bump))
            .collect(),
    };
    service().with_stats(Some(stats))
}

pub(super) fn router(service: BillingReviewService) -> axum::Router {
    review_router(Arc::new(service))
}

pub(super) fn screening_visit() -> Visit {
    Visit {
        dos: "2025-08-26".to_string(),
        visit_type: "OV".to_string(),
        mdm_level: Some("moderate".to_string()),
        time_minutes: Some(30),
        procedures: vec!["cryotherapy".to_string()],
        complaints: vec!["depression screen".to_string()],
        assessment_free_text: Some("CKD stage 3a; PHQ-9 completed; abnormal affect.".to_string()),
        icd_candidates: BTreeSet::from(["Z13.31".to_string()]),
        history: Some(VisitHistory::default()),
        previous_cpt_lookback_days: Some(365),
    }
}

pub(super) fn request(id: &str, payer: Option<&str>, visit: Visit) -> VisitRequest {
    VisitRequest {
        id: id.to_string(),
        patient_id: Some(format!("pt-{id}")),
        payer: payer.map(str::to_string),
        visit,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
