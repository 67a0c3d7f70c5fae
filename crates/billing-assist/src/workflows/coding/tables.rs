use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::MdmLevel;

pub const MODIFIER_25: &str = "25";
pub const AWV_SUBSEQUENT: &str = "G0439";
pub const INITIAL_PREVENTIVE_EXAM: &str = "G0402";
pub const DEPRESSION_SCREEN: &str = "G0444";
pub const ADVANCE_CARE_PLANNING: &str = "99497";
pub const DEPRESSION_SCREEN_DX: &str = "Z13.31";
pub const WELLNESS_EXAM_NORMAL_DX: &str = "Z00.00";
pub const WELLNESS_EXAM_ABNORMAL_DX: &str = "Z00.01";

const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Minimum documented minutes that qualify for an E/M level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeThreshold {
    pub minimum_minutes: u32,
    pub code: String,
}

/// Diagnoses added when the visit text mentions a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDiagnoses {
    pub keyword: String,
    pub codes: Vec<String>,
}

/// A CPT that payers expect to travel with a supporting diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDiagnosis {
    pub cpt: String,
    pub icd: String,
    pub conflict: String,
}

/// Static, hand-authored lookup tables driving the coding stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTables {
    /// Ordered from the highest threshold down.
    pub em_by_time: Vec<TimeThreshold>,
    pub em_by_mdm: BTreeMap<MdmLevel, String>,
    pub time_required: BTreeMap<String, u32>,
    /// Code to frequency window in days.
    pub annual_frequency: BTreeMap<String, u32>,
    pub keyword_diagnoses: Vec<KeywordDiagnoses>,
    pub required_diagnoses: Vec<RequiredDiagnosis>,
    pub default_lookback_days: u32,
}

impl RuleTables {
    pub fn standard() -> Self {
        let em_by_time = [(40, "99215"), (30, "99214"), (20, "99213"), (10, "99212")]
            .into_iter()
            .map(|(minimum_minutes, code)| TimeThreshold {
                minimum_minutes,
                code: code.to_string(),
            })
            .collect();

        let em_by_mdm = [
            (MdmLevel::Straightforward, "99212"),
            (MdmLevel::Low, "99213"),
            (MdmLevel::Moderate, "99214"),
            (MdmLevel::High, "99215"),
        ]
        .into_iter()
        .map(|(level, code)| (level, code.to_string()))
        .collect();

        let time_required = [(DEPRESSION_SCREEN, 15), (ADVANCE_CARE_PLANNING, 16)]
            .into_iter()
            .map(|(code, minutes)| (code.to_string(), minutes))
            .collect();

        let annual_frequency = [(AWV_SUBSEQUENT, 365), (INITIAL_PREVENTIVE_EXAM, 365)]
            .into_iter()
            .map(|(code, days)| (code.to_string(), days))
            .collect();

        let keyword_diagnoses = vec![
            KeywordDiagnoses {
                keyword: "ckd".to_string(),
                codes: vec!["N18.30".to_string()],
            },
            KeywordDiagnoses {
                keyword: "depression".to_string(),
                codes: vec!["F32.A".to_string(), DEPRESSION_SCREEN_DX.to_string()],
            },
        ];

        let required_diagnoses = vec![RequiredDiagnosis {
            cpt: DEPRESSION_SCREEN.to_string(),
            icd: DEPRESSION_SCREEN_DX.to_string(),
            conflict: "G0444 typically requires Z13.31 as primary or supporting diagnosis."
                .to_string(),
        }];

        Self {
            em_by_time,
            em_by_mdm,
            time_required,
            annual_frequency,
            keyword_diagnoses,
            required_diagnoses,
            default_lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_default_lookback(mut self, days: u32) -> Self {
        self.default_lookback_days = days;
        self
    }

    /// Highest E/M level whose threshold the documented time meets.
    pub fn em_for_time(&self, minutes: u32) -> Option<&TimeThreshold> {
        self.em_by_time
            .iter()
            .find(|threshold| minutes >= threshold.minimum_minutes)
    }

    pub fn em_for_mdm(&self, level: MdmLevel) -> Option<&str> {
        self.em_by_mdm.get(&level).map(String::as_str)
    }

    pub fn minutes_required(&self, code: &str) -> Option<u32> {
        self.time_required.get(code).copied()
    }

    pub fn frequency_window(&self, code: &str) -> Option<u32> {
        self.annual_frequency.get(code).copied()
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_table_picks_highest_qualifying_level() {
        let tables = RuleTables::standard();
        assert_eq!(tables.em_for_time(45).map(|t| t.code.as_str()), Some("99215"));
        assert_eq!(tables.em_for_time(30).map(|t| t.code.as_str()), Some("99214"));
        assert_eq!(tables.em_for_time(19).map(|t| t.code.as_str()), Some("99212"));
        assert!(tables.em_for_time(9).is_none());
    }

    #[test]
    fn annual_codes_share_a_one_year_window() {
        let tables = RuleTables::standard();
        assert_eq!(tables.frequency_window(AWV_SUBSEQUENT), Some(365));
        assert_eq!(tables.frequency_window(INITIAL_PREVENTIVE_EXAM), Some(365));
        assert_eq!(tables.frequency_window("99214"), None);
    }
}
