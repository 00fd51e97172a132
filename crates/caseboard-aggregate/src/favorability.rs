//! Court and judge favorability over a set of rulings.

use serde::Serialize;
use std::collections::BTreeMap;

use caseboard_model::{case_number, fold_label, JudgeRuling, RulingOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeTally {
    pub rulings: u64,
    pub favorable: u64,
    pub unfavorable: u64,
    pub partial: u64,
    pub favorability_rate: f64,
}

impl OutcomeTally {
    fn record(&mut self, outcome: RulingOutcome) {
        self.rulings += 1;
        match outcome {
            RulingOutcome::Favorable => self.favorable += 1,
            RulingOutcome::Unfavorable => self.unfavorable += 1,
            RulingOutcome::Partial => self.partial += 1,
        }
    }

    fn finish(mut self) -> Self {
        self.favorability_rate = favorability_rate(self.favorable, self.partial, self.rulings);
        self
    }
}

/// `(favorable + partial / 2) / rulings × 100`; 0 without rulings.
pub fn favorability_rate(favorable: u64, partial: u64, rulings: u64) -> f64 {
    if rulings == 0 {
        return 0.0;
    }
    let score = favorable as f64 + 0.5 * partial as f64;
    (score * 100.0 / rulings as f64).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtFavorability {
    pub court_code: String,
    pub court_name: &'static str,
    pub state_abbrev: &'static str,
    pub region: &'static str,
    #[serde(flatten)]
    pub tally: OutcomeTally,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeFavorability {
    pub judge: String,
    #[serde(flatten)]
    pub tally: OutcomeTally,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavorabilityView {
    pub courts: Vec<CourtFavorability>,
    pub judges: Vec<JudgeFavorability>,
    /// Rulings whose case number resolved to no known court.
    pub unresolved: u64,
    pub overall: OutcomeTally,
}

pub fn favorability(rulings: &[JudgeRuling]) -> FavorabilityView {
    let mut courts: BTreeMap<String, (caseboard_model::CourtInfo, OutcomeTally)> = BTreeMap::new();
    // Keyed by folded name so "Dra. Ana" and "DRA. ANA" merge; the first
    // spelling seen is the one displayed.
    let mut judges: BTreeMap<String, (String, OutcomeTally)> = BTreeMap::new();
    let mut overall = OutcomeTally::default();
    let mut unresolved = 0u64;

    for ruling in rulings {
        overall.record(ruling.outcome);

        match case_number::resolve(&ruling.case_number) {
            Some(info) => courts
                .entry(info.court_code.clone())
                .or_insert_with(|| (info, OutcomeTally::default()))
                .1
                .record(ruling.outcome),
            None => unresolved += 1,
        }

        let name = ruling.judge.trim();
        judges
            .entry(fold_label(name))
            .or_insert_with(|| (name.to_string(), OutcomeTally::default()))
            .1
            .record(ruling.outcome);
    }

    FavorabilityView {
        courts: courts
            .into_values()
            .map(|(info, tally)| CourtFavorability {
                court_code: info.court_code,
                court_name: info.court_name,
                state_abbrev: info.state_abbrev,
                region: info.region,
                tally: tally.finish(),
            })
            .collect(),
        judges: judges
            .into_values()
            .map(|(judge, tally)| JudgeFavorability {
                judge,
                tally: tally.finish(),
            })
            .collect(),
        unresolved,
        overall: overall.finish(),
    }
}
