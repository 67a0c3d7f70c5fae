//! End-to-end review: visit -> coding suggestion -> claim stub -> denial risk.

pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ReviewOutcome, ReviewRecord, VisitRequest};
pub use router::{review_router, ReviewRequest, ScoreRequest};
pub use service::BillingReviewService;
