use crate::infra::build_review_service;
use billing_assist::config::BillingConfig;
use billing_assist::error::AppError;
use billing_assist::workflows::coding::{PriorCpt, Visit, VisitHistory};
use billing_assist::workflows::denial::{ClaimLine, ClaimStub, ScoredClaim};
use billing_assist::workflows::review::{ReviewOutcome, ReviewRecord, VisitRequest};
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional AggregateStats JSON document with per-payer bumps.
    #[arg(long)]
    pub(crate) stats: Option<PathBuf>,
    /// Payer used for visits in the demo (defaults to MC).
    #[arg(long)]
    pub(crate) payer: Option<String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { stats, payer } = args;

    let mut config = BillingConfig::default();
    if let Some(payer) = payer {
        config.default_payer = payer;
    }
    let service = build_review_service(&config, stats.as_deref())?;

    println!("Billing assist demo");
    match service.stats() {
        Some(stats) => println!("- payer stats loaded for {} payers", stats.payer_bumps.len()),
        None => println!("- no payer stats; scoring without payer bumps"),
    }

    println!("\nVisit review");
    for record in service.review_batch(&sample_visits()) {
        match record {
            ReviewRecord::Reviewed(outcome) => render_outcome(&outcome),
            ReviewRecord::Rejected { id, error } => {
                println!("\n[{id}] rejected: {error}");
            }
        }
    }

    println!("\nClaim scoring");
    for scored in service.score_batch(&sample_claims(), None) {
        render_scored_claim(&scored);
    }

    Ok(())
}

fn render_outcome(outcome: &ReviewOutcome) {
    println!("\n[{}] DOS {} | payer {}", outcome.id, outcome.dos, outcome.claim.payer);
    println!("Recommended CPTs:");
    for entry in &outcome.suggestion.recommended_cpts {
        let modifiers = if entry.modifiers.is_empty() {
            String::new()
        } else {
            format!(" -{}", entry.modifiers.as_slice().join(" -"))
        };
        println!("  - {}{} ({})", entry.code, modifiers, entry.reason);
    }
    println!(
        "Recommended ICDs: {}",
        outcome.suggestion.recommended_icds.join(", ")
    );
    for note in &outcome.suggestion.missing_documentation {
        println!("  ! missing documentation: {note}");
    }
    for conflict in &outcome.suggestion.conflicts {
        println!("  ! conflict: {conflict}");
    }
    for prompt in &outcome.cdi_prompts {
        println!("  ? {}", prompt.message);
    }
    println!(
        "Denial risk {:.0}% | {}",
        outcome.assessment.risk * 100.0,
        outcome.assessment.top_factors.join("; ")
    );
}

fn render_scored_claim(scored: &ScoredClaim) {
    println!(
        "- claim {}: risk {:.2} | {}",
        scored.claim_stub_id,
        scored.assessment.risk,
        scored.assessment.top_factors.join("; ")
    );
}

fn sample_visits() -> Vec<VisitRequest> {
    vec![
        VisitRequest {
            id: "V-1001".to_string(),
            patient_id: Some("P-001".to_string()),
            payer: None,
            visit: Visit {
                dos: "2025-08-26".to_string(),
                visit_type: "OV".to_string(),
                mdm_level: Some("moderate".to_string()),
                time_minutes: Some(30),
                procedures: vec!["cryotherapy".to_string()],
                complaints: vec!["depression screen".to_string()],
                assessment_free_text: Some(
                    "CKD stage 3a; PHQ-9 completed; abnormal affect.".to_string(),
                ),
                icd_candidates: BTreeSet::from(["Z13.31".to_string()]),
                history: Some(VisitHistory {
                    recent_cpts: vec![PriorCpt {
                        code: "G0439".to_string(),
                        dos: "2024-08-20".to_string(),
                    }],
                }),
                previous_cpt_lookback_days: Some(365),
            },
        },
        VisitRequest {
            id: "V-1002".to_string(),
            patient_id: Some("P-002".to_string()),
            payer: Some("BCBS".to_string()),
            visit: Visit {
                dos: "2025-09-02".to_string(),
                visit_type: "AWV".to_string(),
                mdm_level: Some("low".to_string()),
                time_minutes: None,
                procedures: Vec::new(),
                complaints: vec!["annual wellness".to_string(), "knee pain".to_string()],
                assessment_free_text: Some(
                    "Advance care planning discussed with patient and daughter.".to_string(),
                ),
                icd_candidates: BTreeSet::from(["M25.561".to_string()]),
                history: Some(VisitHistory {
                    recent_cpts: vec![PriorCpt {
                        code: "G0439".to_string(),
                        dos: "2024-06-11".to_string(),
                    }],
                }),
                previous_cpt_lookback_days: None,
            },
        },
        VisitRequest {
            id: "V-1003".to_string(),
            patient_id: None,
            payer: None,
            visit: Visit {
                dos: "09/03/2025".to_string(),
                visit_type: "OV".to_string(),
                mdm_level: Some("low".to_string()),
                time_minutes: None,
                procedures: Vec::new(),
                complaints: Vec::new(),
                assessment_free_text: None,
                icd_candidates: BTreeSet::new(),
                history: None,
                previous_cpt_lookback_days: None,
            },
        },
    ]
}

fn sample_claims() -> Vec<ClaimStub> {
    let line = |code: &str, modifiers: &[&str]| ClaimLine {
        code: code.to_string(),
        modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
    };

    vec![
        ClaimStub {
            id: "12345".to_string(),
            payer: "MC".to_string(),
            cpts: vec![line("99214", &[]), line("G0444", &[])],
            icds: vec!["F32.A".to_string()],
        },
        ClaimStub {
            id: "12346".to_string(),
            payer: "BCBS".to_string(),
            cpts: vec![line("99213", &["25"]), line("G0444", &[])],
            icds: vec!["Z13.31".to_string()],
        },
    ]
}
