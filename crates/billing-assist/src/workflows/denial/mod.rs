//! Rule-based denial-risk scoring for claim stubs.

pub mod domain;
pub mod rules;
mod scoring;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{ClaimLine, ClaimStub, RiskAssessment, ScoredClaim};
pub use rules::DenialRule;
pub use scoring::{DenialRiskScorer, ScoringConfig, NO_RULE_HITS};
pub use stats::{AggregateStats, StatsError};

/// Scores one claim with the default weighting.
pub fn score_claim(claim: &ClaimStub, stats: Option<&AggregateStats>) -> RiskAssessment {
    DenialRiskScorer::default().score(claim, stats)
}
