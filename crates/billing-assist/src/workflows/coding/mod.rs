//! Encounter to billing-code suggestions.
//!
//! A visit is pushed through an ordered list of rule stages (see `stages::PIPELINE`)
//! that pick the E/M level, attach modifiers, add screening and time-based services,
//! enrich diagnoses, drop frequency-limited codes, and flag coding conflicts.

mod cdi;
mod dates;
pub mod domain;
mod frequency;
mod stages;
pub mod tables;

#[cfg(test)]
mod tests;

pub use cdi::{cdi_prompts, CdiPrompt, CdiPromptKind};
pub use domain::{
    CodingSuggestion, MdmLevel, ModifierSet, PriorCpt, RecommendedCpt, Visit, VisitHistory,
};
pub use tables::RuleTables;

use frequency::FrequencyPolicy;
use rayon::prelude::*;
use stages::VisitContext;

/// Input errors that fail a single visit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodingError {
    #[error("invalid date format for {field}: '{value}' (expected YYYY-MM-DD or ISO-8601)")]
    InvalidDateFormat { field: String, value: String },
}

/// Stateless suggester applying the rule tables to a visit.
#[derive(Debug, Clone, Default)]
pub struct CodingSuggester {
    tables: RuleTables,
}

impl CodingSuggester {
    pub fn new(tables: RuleTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn suggest(&self, visit: &Visit) -> Result<CodingSuggestion, CodingError> {
        let frequency = FrequencyPolicy::for_visit(visit, self.tables.default_lookback_days)?;
        let context = VisitContext::new(visit, &self.tables, frequency);
        Ok(stages::run(&context).into_suggestion())
    }

    /// Suggests codes for each visit independently; results keep input order.
    pub fn suggest_batch(&self, visits: &[Visit]) -> Vec<Result<CodingSuggestion, CodingError>> {
        visits.par_iter().map(|visit| self.suggest(visit)).collect()
    }
}

/// Convenience wrapper over the standard rule tables.
pub fn suggest(visit: &Visit) -> Result<CodingSuggestion, CodingError> {
    CodingSuggester::default().suggest(visit)
}
