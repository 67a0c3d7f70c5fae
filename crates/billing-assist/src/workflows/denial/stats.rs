use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Payer aggregates derived from remittance history.
///
/// Treated as a read-only snapshot for the lifetime of a scoring batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    #[serde(default)]
    pub payer_bumps: BTreeMap<String, f64>,
}

/// Failure loading a stats document.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("failed to read payer stats: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payer stats document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payer bump for '{payer}' must be within [0, 1), found {bump}")]
    InvalidBump { payer: String, bump: f64 },
}

impl AggregateStats {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StatsError> {
        let stats: Self = serde_json::from_reader(reader)?;
        stats.validate()?;
        Ok(stats)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Zero-bump mode when no path is configured or the file is absent.
    pub fn load_optional(path: Option<&Path>) -> Result<Option<Self>, StatsError> {
        let Some(path) = path else {
            return Ok(None);
        };

        if !path.exists() {
            warn!(path = %path.display(), "payer stats file not found; scoring without payer bumps");
            return Ok(None);
        }

        let stats = Self::from_path(path)?;
        debug!(path = %path.display(), payers = stats.payer_bumps.len(), "loaded payer stats");
        Ok(Some(stats))
    }

    /// Rejects bumps outside `[0, 1)`.
    pub fn validate(&self) -> Result<(), StatsError> {
        match self
            .payer_bumps
            .iter()
            .find(|(_, bump)| !(bump.is_finite() && (0.0..1.0).contains(*bump)))
        {
            Some((payer, bump)) => Err(StatsError::InvalidBump {
                payer: payer.clone(),
                bump: *bump,
            }),
            None => Ok(()),
        }
    }

    /// Additive bump for a payer, zero when unknown.
    pub fn bump_for(&self, payer: &str) -> f64 {
        self.payer_bumps.get(payer).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_payer_bumps_and_ignores_other_keys() {
        let json = r#"{"payer_bumps": {"BCBS": 0.1, "MC": 0.05}, "generated": "2025-08-01"}"#;
        let stats = AggregateStats::from_reader(Cursor::new(json)).expect("parses");
        assert_eq!(stats.bump_for("BCBS"), 0.1);
        assert_eq!(stats.bump_for("Humana"), 0.0);
    }

    #[test]
    fn missing_bump_table_means_no_bumps() {
        let stats = AggregateStats::from_reader(Cursor::new("{}")).expect("parses");
        assert!(stats.payer_bumps.is_empty());
    }

    #[test]
    fn malformed_document_is_a_load_error() {
        let result = AggregateStats::from_reader(Cursor::new(r#"{"payer_bumps": ["MC"]}"#));
        assert!(matches!(result, Err(StatsError::Json(_))));
    }

    #[test]
    fn out_of_range_bump_is_rejected() {
        let result = AggregateStats::from_reader(Cursor::new(r#"{"payer_bumps": {"MC": 1.5}}"#));
        match result {
            Err(StatsError::InvalidBump { payer, bump }) => {
                assert_eq!(payer, "MC");
                assert_eq!(bump, 1.5);
            }
            other => panic!("expected invalid bump, got {other:?}"),
        }
    }

    #[test]
    fn absent_file_falls_back_to_zero_bump_mode() {
        let missing = std::env::temp_dir().join("billing-assist-no-such-stats.json");
        let loaded = AggregateStats::load_optional(Some(&missing)).expect("not an error");
        assert!(loaded.is_none());
        assert!(AggregateStats::load_optional(None).expect("no path").is_none());
    }

    #[test]
    fn loads_snapshot_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "billing-assist-stats-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"payer_bumps": {"UHC": 0.2}}"#).expect("write stats");

        let loaded = AggregateStats::load_optional(Some(&path)).expect("loads");

        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.map(|stats| stats.bump_for("UHC")), Some(0.2));
    }
}
