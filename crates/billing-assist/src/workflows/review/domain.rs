use serde::{Deserialize, Serialize};

use crate::workflows::coding::{CdiPrompt, CodingSuggestion, Visit};
use crate::workflows::denial::{ClaimStub, RiskAssessment};

/// A visit submitted for end-to-end review, tagged with caller identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRequest {
    pub id: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    /// Falls back to the service default payer when absent.
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(flatten)]
    pub visit: Visit,
}

/// Suggestion, derived claim, and its denial risk for one visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub dos: String,
    pub suggestion: CodingSuggestion,
    pub cdi_prompts: Vec<CdiPrompt>,
    pub claim: ClaimStub,
    pub assessment: RiskAssessment,
}

/// Per-record batch result; a rejected visit does not affect its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReviewRecord {
    Reviewed(ReviewOutcome),
    Rejected { id: String, error: String },
}

impl ReviewRecord {
    pub fn id(&self) -> &str {
        match self {
            ReviewRecord::Reviewed(outcome) => &outcome.id,
            ReviewRecord::Rejected { id, .. } => id,
        }
    }

    pub fn outcome(&self) -> Option<&ReviewOutcome> {
        match self {
            ReviewRecord::Reviewed(outcome) => Some(outcome),
            ReviewRecord::Rejected { .. } => None,
        }
    }
}
