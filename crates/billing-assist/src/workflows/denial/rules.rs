use serde::{Deserialize, Serialize};

use super::domain::ClaimStub;
use crate::workflows::coding::tables::{
    DEPRESSION_SCREEN, DEPRESSION_SCREEN_DX, MODIFIER_25, WELLNESS_EXAM_NORMAL_DX,
};

/// Office-visit E/M codes that never need a companion service to be billed alone.
pub const OFFICE_EM_CODES: [&str; 4] = ["99212", "99213", "99214", "99215"];
const EM_PREFIX: &str = "9921";

/// Denial patterns checked against every claim, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialRule {
    MissingModifier25,
    ScreeningWithoutDiagnosis,
    WellnessDiagnosisWithProblemEm,
}

impl DenialRule {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::MissingModifier25,
            Self::ScreeningWithoutDiagnosis,
            Self::WellnessDiagnosisWithProblemEm,
        ]
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingModifier25 => "Missing -25 on same-day E/M + procedure",
            Self::ScreeningWithoutDiagnosis => "G0444 missing Z13.31",
            Self::WellnessDiagnosisWithProblemEm => "Z00.00 with problem-focused E/M",
        }
    }

    pub fn applies_to(self, claim: &ClaimStub) -> bool {
        match self {
            Self::MissingModifier25 => {
                has_em(claim)
                    && claim
                        .cpts
                        .iter()
                        .any(|line| !OFFICE_EM_CODES.contains(&line.code.as_str()))
                    && !claim.cpts.iter().any(|line| line.has_modifier(MODIFIER_25))
            }
            Self::ScreeningWithoutDiagnosis => {
                claim.has_cpt(DEPRESSION_SCREEN) && !claim.has_icd(DEPRESSION_SCREEN_DX)
            }
            Self::WellnessDiagnosisWithProblemEm => {
                claim.has_icd(WELLNESS_EXAM_NORMAL_DX) && has_em(claim)
            }
        }
    }
}

fn has_em(claim: &ClaimStub) -> bool {
    claim.cpts.iter().any(|line| line.code.starts_with(EM_PREFIX))
}

pub(crate) fn rule_hits(claim: &ClaimStub) -> Vec<DenialRule> {
    DenialRule::ordered()
        .into_iter()
        .filter(|rule| rule.applies_to(claim))
        .collect()
}
