use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ClaimStub, RiskAssessment, ScoredClaim};
use super::rules::rule_hits;
use super::stats::AggregateStats;

pub const NO_RULE_HITS: &str = "No rule hits";

/// Weighting applied to rule hits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weight_per_hit: f64,
    pub risk_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weight_per_hit: 0.15,
            risk_ceiling: 0.95,
        }
    }
}

/// Stateless scorer; the optional stats snapshot is supplied per call.
#[derive(Debug, Clone, Default)]
pub struct DenialRiskScorer {
    config: ScoringConfig,
}

impl DenialRiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, claim: &ClaimStub, stats: Option<&AggregateStats>) -> RiskAssessment {
        let hits = rule_hits(claim);
        let base = self.config.weight_per_hit * hits.len() as f64;
        let bump = stats.map(|stats| stats.bump_for(&claim.payer)).unwrap_or(0.0);
        let risk = round_to_cents(base + bump)
            .max(0.0)
            .min(self.config.risk_ceiling);

        debug!(claim = %claim.id, payer = %claim.payer, hits = hits.len(), risk, "scored claim");

        let top_factors = if hits.is_empty() {
            vec![NO_RULE_HITS.to_string()]
        } else {
            hits.iter()
                .map(|rule| rule.description().to_string())
                .collect()
        };

        RiskAssessment { risk, top_factors }
    }

    /// Scores claims against one shared snapshot; output order matches input.
    pub fn score_batch(
        &self,
        claims: &[ClaimStub],
        stats: Option<&AggregateStats>,
    ) -> Vec<ScoredClaim> {
        claims
            .par_iter()
            .map(|claim| ScoredClaim {
                claim_stub_id: claim.id.clone(),
                assessment: self.score(claim, stats),
            })
            .collect()
    }
}

/// Rounds the stored binary value to two places, so a bump written as 0.015
/// (held just below the half cent) rounds down to 0.01.
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
