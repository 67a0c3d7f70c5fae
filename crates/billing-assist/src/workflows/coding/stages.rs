use std::collections::BTreeSet;

use tracing::debug;

use super::domain::{CodingSuggestion, MdmLevel, RecommendedCpt, Visit};
use super::frequency::FrequencyPolicy;
use super::tables::{
    RuleTables, ADVANCE_CARE_PLANNING, AWV_SUBSEQUENT, DEPRESSION_SCREEN, MODIFIER_25,
    WELLNESS_EXAM_ABNORMAL_DX, WELLNESS_EXAM_NORMAL_DX,
};

const AWV_VISIT_TYPES: [&str; 2] = ["awv", "preventive"];
const AWV_COMPLAINT: &str = "annual wellness";
const AWV_CONFLICT: &str = "AWV + E/M requires -25 and distinct documentation.";

/// Read-only facts derived once per visit and shared by every stage.
pub(crate) struct VisitContext<'a> {
    pub visit: &'a Visit,
    pub tables: &'a RuleTables,
    pub frequency: FrequencyPolicy,
    /// Lower-cased assessment text followed by the space-joined complaints.
    pub text_blob: String,
    pub is_awv: bool,
}

impl<'a> VisitContext<'a> {
    pub(crate) fn new(visit: &'a Visit, tables: &'a RuleTables, frequency: FrequencyPolicy) -> Self {
        let text_blob = format!(
            "{} {}",
            visit.assessment_free_text.as_deref().unwrap_or_default(),
            visit.complaints.join(" ")
        )
        .to_lowercase();

        let visit_type = visit.visit_type.to_lowercase();
        let is_awv = AWV_VISIT_TYPES.contains(&visit_type.as_str())
            || any_contains(&visit.complaints, AWV_COMPLAINT);

        Self {
            visit,
            tables,
            frequency,
            text_blob,
            is_awv,
        }
    }

    fn blob_mentions(&self, keyword: &str) -> bool {
        self.text_blob.contains(keyword)
    }

    fn documented_minutes(&self) -> u32 {
        self.visit.time_minutes.unwrap_or(0)
    }
}

/// Accumulator threaded through the stages.
///
/// The E/M entry is held apart from `cpts` until the modifier stages have run.
#[derive(Debug, Default)]
pub(crate) struct WorkingSet {
    em: Option<RecommendedCpt>,
    cpts: Vec<RecommendedCpt>,
    icds: BTreeSet<String>,
    missing_documentation: Vec<String>,
    conflicts: Vec<String>,
}

impl WorkingSet {
    fn has_cpt(&self, code: &str) -> bool {
        self.cpts.iter().any(|entry| entry.code == code)
    }

    pub(crate) fn into_suggestion(self) -> CodingSuggestion {
        CodingSuggestion {
            recommended_cpts: self.cpts,
            recommended_icds: self.icds.into_iter().collect(),
            missing_documentation: self.missing_documentation,
            conflicts: self.conflicts,
        }
    }
}

pub(crate) type Stage = fn(WorkingSet, &VisitContext<'_>) -> WorkingSet;

/// Order matters: modifier stages touch the E/M entry before it is committed.
pub(crate) const PIPELINE: [(&str, Stage); 8] = [
    ("select_em", select_em),
    ("annual_wellness", annual_wellness),
    ("same_day_procedure", same_day_procedure),
    ("commit_em", commit_em),
    ("ancillary_services", ancillary_services),
    ("enrich_diagnoses", enrich_diagnoses),
    ("suppress_frequency_limited", suppress_frequency_limited),
    ("cross_code_conflicts", cross_code_conflicts),
];

pub(crate) fn run(context: &VisitContext<'_>) -> WorkingSet {
    PIPELINE
        .iter()
        .fold(WorkingSet::default(), |working, (name, stage)| {
            let next = stage(working, context);
            debug!(
                stage = *name,
                cpts = next.cpts.len(),
                pending_em = next.em.is_some(),
                "coding stage applied"
            );
            next
        })
}

fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(keyword)
}

fn any_contains(items: &[String], keyword: &str) -> bool {
    items.iter().any(|item| contains_keyword(item, keyword))
}

pub(crate) fn select_em(mut working: WorkingSet, context: &VisitContext<'_>) -> WorkingSet {
    let tables = context.tables;
    let by_time = context
        .visit
        .time_minutes
        .and_then(|minutes| tables.em_for_time(minutes).map(|threshold| (minutes, threshold)));

    working.em = match by_time {
        Some((minutes, threshold)) => Some(RecommendedCpt::new(
            threshold.code.clone(),
            format!("E/M selected by time ({minutes} min)"),
        )),
        None => context
            .visit
            .mdm_level
            .as_deref()
            .and_then(MdmLevel::parse)
            .and_then(|level| {
                tables.em_for_mdm(level).map(|code| {
                    RecommendedCpt::new(code, format!("E/M selected by MDM ({})", level.label()))
                })
            }),
    };

    working
}

pub(crate) fn annual_wellness(mut working: WorkingSet, context: &VisitContext<'_>) -> WorkingSet {
    if !context.is_awv {
        return working;
    }

    let suppressed = context
        .tables
        .frequency_window(AWV_SUBSEQUENT)
        .is_some_and(|window| context.frequency.already_billed(AWV_SUBSEQUENT, window));
    if !suppressed {
        working.cpts.push(RecommendedCpt::new(
            AWV_SUBSEQUENT,
            "Annual Wellness Visit (subsequent) within frequency",
        ));
    }

    if let Some(em) = working.em.as_mut() {
        if em.modifiers.insert(MODIFIER_25) {
            em.reason.push_str(" + distinct problem on same day as AWV");
        }
        working.conflicts.push(AWV_CONFLICT.to_string());
    }

    working
}

pub(crate) fn same_day_procedure(
    mut working: WorkingSet,
    context: &VisitContext<'_>,
) -> WorkingSet {
    if context.visit.procedures.is_empty() {
        return working;
    }

    if let Some(em) = working.em.as_mut() {
        if em.modifiers.insert(MODIFIER_25) {
            em.reason.push_str(" + same-day procedure");
        }
    }

    working
}

pub(crate) fn commit_em(mut working: WorkingSet, _context: &VisitContext<'_>) -> WorkingSet {
    if let Some(em) = working.em.take() {
        working.cpts.insert(0, em);
    }
    working
}

pub(crate) fn ancillary_services(
    mut working: WorkingSet,
    context: &VisitContext<'_>,
) -> WorkingSet {
    let visit = context.visit;
    let minutes = context.documented_minutes();

    let depression_screen = any_contains(&visit.complaints, "phq")
        || any_contains(&visit.complaints, "depression")
        || context.blob_mentions("phq-9")
        || context.blob_mentions("g0444");
    if depression_screen {
        working.cpts.push(RecommendedCpt::new(
            DEPRESSION_SCREEN,
            "Depression screening documented",
        ));
        if let Some(required) = context.tables.minutes_required(DEPRESSION_SCREEN) {
            if minutes < required {
                working.missing_documentation.push(format!(
                    "Add time statement for G0444 (≥{required} min, tool used, score)."
                ));
            }
        }
    }

    let care_planning = context.blob_mentions("advance care planning")
        || any_contains(&visit.procedures, "acp");
    if care_planning {
        working.cpts.push(RecommendedCpt::new(
            ADVANCE_CARE_PLANNING,
            "Advance care planning",
        ));
        if let Some(required) = context.tables.minutes_required(ADVANCE_CARE_PLANNING) {
            if minutes < required {
                working.missing_documentation.push(format!(
                    "Add time for 99497 (≥{required} minutes, consent)."
                ));
            }
        }
    }

    working
}

pub(crate) fn enrich_diagnoses(mut working: WorkingSet, context: &VisitContext<'_>) -> WorkingSet {
    working
        .icds
        .extend(context.visit.icd_candidates.iter().cloned());

    for rule in &context.tables.keyword_diagnoses {
        if context.blob_mentions(&rule.keyword.to_lowercase()) {
            working.icds.extend(rule.codes.iter().cloned());
        }
    }

    if context.is_awv {
        let wellness = if context.blob_mentions("abnormal") {
            WELLNESS_EXAM_ABNORMAL_DX
        } else {
            WELLNESS_EXAM_NORMAL_DX
        };
        working.icds.insert(wellness.to_string());
    }

    working
}

pub(crate) fn suppress_frequency_limited(
    mut working: WorkingSet,
    context: &VisitContext<'_>,
) -> WorkingSet {
    working.cpts.retain(|entry| {
        let blocked = context
            .tables
            .frequency_window(&entry.code)
            .is_some_and(|window| context.frequency.already_billed(&entry.code, window));
        if blocked {
            debug!(
                code = %entry.code,
                dos = %context.frequency.dos(),
                "suppressed by frequency limit"
            );
        }
        !blocked
    });
    working
}

pub(crate) fn cross_code_conflicts(
    mut working: WorkingSet,
    context: &VisitContext<'_>,
) -> WorkingSet {
    for rule in &context.tables.required_diagnoses {
        if working.has_cpt(&rule.cpt) && !working.icds.contains(&rule.icd) {
            working.conflicts.push(rule.conflict.clone());
        }
    }
    working
}
