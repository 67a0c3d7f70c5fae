use std::collections::BTreeSet;

use crate::workflows::coding::domain::{PriorCpt, Visit, VisitHistory};
use crate::workflows::coding::{CodingSuggester, RuleTables};

pub(super) fn suggester() -> CodingSuggester {
    CodingSuggester::new(RuleTables::standard())
}

pub(super) fn office_visit() -> Visit {
    Visit {
        dos: "2025-08-26".to_string(),
        visit_type: "OV".to_string(),
        mdm_level: None,
        time_minutes: None,
        procedures: Vec::new(),
        complaints: Vec::new(),
        assessment_free_text: None,
        icd_candidates: BTreeSet::new(),
        history: None,
        previous_cpt_lookback_days: None,
    }
}

pub(super) fn wellness_visit() -> Visit {
    Visit {
        visit_type: "AWV".to_string(),
        ..office_visit()
    }
}

pub(super) fn scenario_a_visit() -> Visit {
    Visit {
        dos: "2025-08-26".to_string(),
        visit_type: "OV".to_string(),
        mdm_level: Some("moderate".to_string()),
        time_minutes: Some(30),
        procedures: vec!["cryotherapy".to_string()],
        complaints: vec!["depression screen".to_string()],
        assessment_free_text: Some("CKD stage 3a; PHQ-9 completed; abnormal affect.".to_string()),
        icd_candidates: BTreeSet::from(["Z13.31".to_string()]),
        history: Some(history(&[("G0439", "2024-08-20")])),
        previous_cpt_lookback_days: Some(365),
    }
}

pub(super) fn history(rows: &[(&str, &str)]) -> VisitHistory {
    VisitHistory {
        recent_cpts: rows
            .iter()
            .map(|(code, dos)| PriorCpt {
                code: code.to_string(),
                dos: dos.to_string(),
            })
            .collect(),
    }
}

pub(super) fn codes(suggestion: &crate::workflows::coding::CodingSuggestion) -> Vec<&str> {
    suggestion
        .recommended_cpts
        .iter()
        .map(|entry| entry.code.as_str())
        .collect()
}
