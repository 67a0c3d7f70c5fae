use std::collections::BTreeMap;

use crate::workflows::denial::{AggregateStats, ClaimLine, ClaimStub, DenialRiskScorer};

pub(super) fn line(code: &str, modifiers: &[&str]) -> ClaimLine {
    ClaimLine {
        code: code.to_string(),
        modifiers: modifiers.iter().map(|value| value.to_string()).collect(),
    }
}

pub(super) fn claim(id: &str, payer: &str, cpts: Vec<ClaimLine>, icds: &[&str]) -> ClaimStub {
    ClaimStub {
        id: id.to_string(),
        payer: payer.to_string(),
        cpts,
        icds: icds.iter().map(|value| value.to_string()).collect(),
    }
}

pub(super) fn medicare_claim_missing_modifier() -> ClaimStub {
    claim(
        "12345",
        "MC",
        vec![line("99214", &[]), line("G0444", &[])],
        &["F32.A"],
    )
}

pub(super) fn clean_bcbs_claim() -> ClaimStub {
    claim(
        "12346",
        "BCBS",
        vec![line("99213", &["25"]), line("G0444", &[])],
        &["Z13.31"],
    )
}

pub(super) fn stats(bumps: &[(&str, f64)]) -> AggregateStats {
    AggregateStats {
        payer_bumps: bumps
            .iter()
            .map(|(payer, bump)| (payer.to_string(), *bump))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(super) fn scorer() -> DenialRiskScorer {
    DenialRiskScorer::default()
}
