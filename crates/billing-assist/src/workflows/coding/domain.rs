use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Single clinical encounter as captured by the front desk / charting export.
///
/// Dates stay as raw strings so the suggester can report malformed values as
/// `CodingError::InvalidDateFormat` instead of failing at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub dos: String,
    #[serde(default)]
    pub visit_type: String,
    #[serde(default)]
    pub mdm_level: Option<String>,
    #[serde(default)]
    pub time_minutes: Option<u32>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub complaints: Vec<String>,
    #[serde(default)]
    pub assessment_free_text: Option<String>,
    #[serde(default)]
    pub icd_candidates: BTreeSet<String>,
    #[serde(default)]
    pub history: Option<VisitHistory>,
    #[serde(default)]
    pub previous_cpt_lookback_days: Option<u32>,
}

impl Visit {
    pub fn recent_cpts(&self) -> &[PriorCpt] {
        self.history
            .as_ref()
            .map(|history| history.recent_cpts.as_slice())
            .unwrap_or(&[])
    }
}

/// Prior billing for the patient, used for frequency limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitHistory {
    #[serde(default)]
    pub recent_cpts: Vec<PriorCpt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorCpt {
    pub code: String,
    pub dos: String,
}

/// Medical decision making complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdmLevel {
    Straightforward,
    Low,
    Moderate,
    High,
}

impl MdmLevel {
    /// Case-insensitive lookup; unknown labels yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "straightforward" => Some(Self::Straightforward),
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Straightforward => "straightforward",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Insertion-ordered modifier list that never holds the same modifier twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ModifierSet(Vec<String>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the modifier was already present.
    pub fn insert(&mut self, modifier: impl Into<String>) -> bool {
        let modifier = modifier.into();
        if self.contains(&modifier) {
            return false;
        }
        self.0.push(modifier);
        true
    }

    pub fn contains(&self, modifier: &str) -> bool {
        self.0.iter().any(|existing| existing == modifier)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ModifierSet {
    fn from(values: Vec<String>) -> Self {
        let mut set = Self::new();
        for value in values {
            set.insert(value);
        }
        set
    }
}

impl From<ModifierSet> for Vec<String> {
    fn from(set: ModifierSet) -> Self {
        set.0
    }
}

/// A billing code the suggester recommends, with the trail explaining why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedCpt {
    pub code: String,
    pub modifiers: ModifierSet,
    pub reason: String,
}

impl RecommendedCpt {
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            modifiers: ModifierSet::new(),
            reason: reason.into(),
        }
    }
}

/// Coding output handed back to billing staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingSuggestion {
    pub recommended_cpts: Vec<RecommendedCpt>,
    pub recommended_icds: Vec<String>,
    pub missing_documentation: Vec<String>,
    pub conflicts: Vec<String>,
}

impl CodingSuggestion {
    pub fn cpt(&self, code: &str) -> Option<&RecommendedCpt> {
        self.recommended_cpts.iter().find(|entry| entry.code == code)
    }

    pub fn has_cpt(&self, code: &str) -> bool {
        self.cpt(code).is_some()
    }
}
