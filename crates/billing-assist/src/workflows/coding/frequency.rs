use chrono::NaiveDate;

use super::dates::parse_service_date;
use super::domain::Visit;
use super::CodingError;

/// A prior claim line with its date already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BilledCode {
    pub code: String,
    pub dos: NaiveDate,
}

/// Payer frequency limits evaluated against the patient's billing history.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyPolicy {
    dos: NaiveDate,
    lookback_days: u32,
    history: Vec<BilledCode>,
}

impl FrequencyPolicy {
    /// Validates every date up front so a malformed row fails the whole visit.
    pub(crate) fn for_visit(
        visit: &Visit,
        default_lookback_days: u32,
    ) -> Result<Self, CodingError> {
        let dos = parse_service_date("dos", &visit.dos)?;

        let history = visit
            .recent_cpts()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let field = format!("history.recent_cpts[{index}].dos");
                parse_service_date(&field, &row.dos).map(|dos| BilledCode {
                    code: row.code.clone(),
                    dos,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dos,
            lookback_days: visit
                .previous_cpt_lookback_days
                .unwrap_or(default_lookback_days),
            history,
        })
    }

    pub(crate) fn dos(&self) -> NaiveDate {
        self.dos
    }

    /// True when the same code was billed within `window_days` of the visit,
    /// in either direction. A longer visit lookback widens the window; a shorter
    /// one never narrows a payer frequency limit.
    pub(crate) fn already_billed(&self, code: &str, window_days: u32) -> bool {
        let limit = i64::from(window_days.max(self.lookback_days));
        self.history
            .iter()
            .filter(|billed| billed.code == code)
            .any(|billed| (self.dos - billed.dos).num_days().abs() <= limit)
    }
}
