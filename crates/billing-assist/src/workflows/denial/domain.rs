use serde::{Deserialize, Serialize};

use crate::workflows::coding::CodingSuggestion;

const PLACEHOLDER_CLAIM_ID: &str = "tmp";

fn placeholder_claim_id() -> String {
    PLACEHOLDER_CLAIM_ID.to_string()
}

/// Claim line as it would be submitted to the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLine {
    pub code: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl ClaimLine {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|existing| existing == modifier)
    }
}

/// Caller-assembled claim handed to the denial-risk scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimStub {
    #[serde(default = "placeholder_claim_id")]
    pub id: String,
    #[serde(default)]
    pub payer: String,
    #[serde(default)]
    pub cpts: Vec<ClaimLine>,
    #[serde(default)]
    pub icds: Vec<String>,
}

impl ClaimStub {
    /// Builds the claim a suggestion would produce, keeping code order.
    pub fn from_suggestion(
        id: impl Into<String>,
        payer: impl Into<String>,
        suggestion: &CodingSuggestion,
    ) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            cpts: suggestion
                .recommended_cpts
                .iter()
                .map(|entry| ClaimLine {
                    code: entry.code.clone(),
                    modifiers: entry.modifiers.as_slice().to_vec(),
                })
                .collect(),
            icds: suggestion.recommended_icds.clone(),
        }
    }

    pub fn has_cpt(&self, code: &str) -> bool {
        self.cpts.iter().any(|line| line.code == code)
    }

    pub fn has_icd(&self, code: &str) -> bool {
        self.icds.iter().any(|icd| icd == code)
    }
}

/// Denial likelihood for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk: f64,
    pub top_factors: Vec<String>,
}

/// Batch output row tagged with the claim it scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredClaim {
    pub claim_stub_id: String,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}
