//! Judge rulings tracked for court/judge favorability.

use serde::{Deserialize, Serialize};

use crate::text::fold_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RulingOutcome {
    Favorable,
    Unfavorable,
    Partial,
}

impl RulingOutcome {
    pub const ALL: [RulingOutcome; 3] = [
        RulingOutcome::Favorable,
        RulingOutcome::Unfavorable,
        RulingOutcome::Partial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RulingOutcome::Favorable => "Favorable",
            RulingOutcome::Unfavorable => "Unfavorable",
            RulingOutcome::Partial => "Partial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RulingOutcome::Favorable => "Favorável",
            RulingOutcome::Unfavorable => "Desfavorável",
            RulingOutcome::Partial => "Parcial",
        }
    }

    /// Classify an outcome label. `desfavorável` contains `favorav`, so the
    /// unfavorable markers are checked first. Unknown labels yield `None`.
    pub fn classify(label: &str) -> Option<Self> {
        let folded = fold_label(label);
        let has = |markers: &[&str]| markers.iter().any(|m| folded.contains(m));

        if has(&["desfavor", "unfavor"]) {
            Some(RulingOutcome::Unfavorable)
        } else if has(&["parcial", "partial"]) {
            Some(RulingOutcome::Partial)
        } else if has(&["favorav", "favorab"]) {
            Some(RulingOutcome::Favorable)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRuling {
    pub case_number: String,
    pub judge: String,
    pub outcome: RulingOutcome,
}
