use serde::{Deserialize, Serialize};

/// Whether a prompt nudges toward a diagnosis or a procedure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CdiPromptKind {
    Dx,
    Cpt,
}

/// Clinical documentation improvement nudge shown alongside a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdiPrompt {
    #[serde(rename = "type")]
    pub kind: CdiPromptKind,
    pub message: String,
}

struct PromptRule {
    mention: &'static str,
    already_coded: &'static str,
    kind: CdiPromptKind,
    message: &'static str,
}

const PROMPT_RULES: [PromptRule; 3] = [
    PromptRule {
        mention: "ckd",
        already_coded: "n18.3",
        kind: CdiPromptKind::Dx,
        message: "You mentioned CKD: add N18.30 staging if appropriate?",
    },
    PromptRule {
        mention: "phq",
        already_coded: "g0444",
        kind: CdiPromptKind::Cpt,
        message: "PHQ documented: bill G0444 if ≥15 min and tool/score captured?",
    },
    PromptRule {
        mention: "advance care planning",
        already_coded: "99497",
        kind: CdiPromptKind::Cpt,
        message: "ACP discussed: add 99497 if ≥16 minutes with consent/time?",
    },
];

/// Prompts for services mentioned in a note but not yet coded in it.
pub fn cdi_prompts(note_text: &str) -> Vec<CdiPrompt> {
    let text = note_text.to_lowercase();
    PROMPT_RULES
        .iter()
        .filter(|rule| text.contains(rule.mention) && !text.contains(rule.already_coded))
        .map(|rule| CdiPrompt {
            kind: rule.kind,
            message: rule.message.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_for_each_uncoded_mention() {
        let prompts = cdi_prompts(
            "PHQ-9 performed; patient with CKD stage 3a. Advance care planning discussed.",
        );
        let kinds: Vec<_> = prompts.iter().map(|prompt| prompt.kind).collect();
        assert_eq!(
            kinds,
            vec![CdiPromptKind::Dx, CdiPromptKind::Cpt, CdiPromptKind::Cpt]
        );
        assert!(prompts[0].message.contains("N18.30"));
    }

    #[test]
    fn skips_mentions_already_coded() {
        let prompts = cdi_prompts("CKD N18.30 documented; PHQ-9 billed as G0444.");
        assert!(prompts.is_empty());
    }

    #[test]
    fn serializes_kind_as_type_field() {
        let prompt = cdi_prompts("ckd").remove(0);
        let value = serde_json::to_value(&prompt).expect("serializes");
        assert_eq!(value["type"], "dx");
    }
}
