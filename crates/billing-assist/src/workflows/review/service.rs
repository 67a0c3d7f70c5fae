use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::domain::{ReviewOutcome, ReviewRecord, VisitRequest};
use crate::workflows::coding::{
    cdi_prompts, CodingError, CodingSuggester, CodingSuggestion, RuleTables, Visit,
};
use crate::workflows::denial::{
    AggregateStats, ClaimStub, DenialRiskScorer, RiskAssessment, ScoredClaim, ScoringConfig,
};

/// Service composing the coding suggester and the denial-risk scorer.
pub struct BillingReviewService {
    suggester: Arc<CodingSuggester>,
    scorer: Arc<DenialRiskScorer>,
    stats: Option<Arc<AggregateStats>>,
    default_payer: String,
}

impl BillingReviewService {
    pub fn new(tables: RuleTables, default_payer: impl Into<String>) -> Self {
        Self {
            suggester: Arc::new(CodingSuggester::new(tables)),
            scorer: Arc::new(DenialRiskScorer::new(ScoringConfig::default())),
            stats: None,
            default_payer: default_payer.into(),
        }
    }

    pub fn with_stats(mut self, stats: Option<AggregateStats>) -> Self {
        self.stats = stats.map(Arc::new);
        self
    }

    pub fn stats(&self) -> Option<&AggregateStats> {
        self.stats.as_deref()
    }

    pub fn default_payer(&self) -> &str {
        &self.default_payer
    }

    pub fn suggest(&self, visit: &Visit) -> Result<CodingSuggestion, CodingError> {
        self.suggester.suggest(visit)
    }

    pub fn score(&self, claim: &ClaimStub) -> RiskAssessment {
        self.scorer.score(claim, self.stats())
    }

    /// Scores against `stats_override` when given, otherwise the loaded snapshot.
    pub fn score_batch(
        &self,
        claims: &[ClaimStub],
        stats_override: Option<&AggregateStats>,
    ) -> Vec<ScoredClaim> {
        let stats = stats_override.or(self.stats());
        self.scorer.score_batch(claims, stats)
    }

    pub fn review(&self, request: &VisitRequest) -> Result<ReviewOutcome, CodingError> {
        let suggestion = self.suggester.suggest(&request.visit)?;
        let payer = request
            .payer
            .clone()
            .unwrap_or_else(|| self.default_payer.clone());
        let claim = ClaimStub::from_suggestion(request.id.clone(), payer, &suggestion);
        let assessment = self.score(&claim);
        let prompts = request
            .visit
            .assessment_free_text
            .as_deref()
            .map(cdi_prompts)
            .unwrap_or_default();

        debug!(visit = %request.id, cpts = claim.cpts.len(), risk = assessment.risk, "visit reviewed");

        Ok(ReviewOutcome {
            id: request.id.clone(),
            patient_id: request.patient_id.clone(),
            dos: request.visit.dos.clone(),
            suggestion,
            cdi_prompts: prompts,
            claim,
            assessment,
        })
    }

    pub fn review_batch(&self, requests: &[VisitRequest]) -> Vec<ReviewRecord> {
        requests
            .par_iter()
            .map(|request| match self.review(request) {
                Ok(outcome) => ReviewRecord::Reviewed(outcome),
                Err(error) => {
                    warn!(visit = %request.id, %error, "visit rejected");
                    ReviewRecord::Rejected {
                        id: request.id.clone(),
                        error: error.to_string(),
                    }
                }
            })
            .collect()
    }
}
