//! Judge-ruling exports: case number, judge, outcome (row 0 is a header).

use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

use caseboard_model::{JudgeRuling, RulingOutcome};

use crate::raw::RawRow;
use crate::reader::read_table;
use crate::IngestError;

const MIN_FIELDS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulingReport {
    pub rows_read: usize,
    pub loaded: usize,
    pub skipped_short: usize,
    pub skipped_blank: usize,
    pub skipped_unknown_outcome: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RulingsIngested {
    pub rulings: Vec<JudgeRuling>,
    pub report: RulingReport,
}

/// Same "no data" semantics as case ingestion: missing or header-only
/// sources log and return an empty result.
pub fn ingest_rulings(path: &Path) -> Result<RulingsIngested, IngestError> {
    let Some(table) = read_table(path)? else {
        error!(source = %path.display(), "ruling source not found; no data loaded");
        return Ok(RulingsIngested::default());
    };
    if table.rows.len() < 2 {
        error!(source = %path.display(), "ruling source has no data rows; no data loaded");
        return Ok(RulingsIngested::default());
    }

    let out = ingest_ruling_rows(&table.rows);
    info!(
        source = %path.display(),
        loaded = out.report.loaded,
        rows = out.report.rows_read,
        "loaded judge rulings"
    );
    Ok(out)
}

pub fn ingest_ruling_rows(rows: &[RawRow]) -> RulingsIngested {
    let mut report = RulingReport::default();
    let mut rulings = Vec::new();

    for row in rows.iter().skip(1) {
        report.rows_read += 1;
        if row.len() < MIN_FIELDS {
            report.skipped_short += 1;
            continue;
        }

        let case_number = row[0].as_text();
        let judge = row[1].as_text();
        if case_number.is_empty() || judge.is_empty() {
            report.skipped_blank += 1;
            continue;
        }

        let Some(outcome) = RulingOutcome::classify(&row[2].as_text()) else {
            report.skipped_unknown_outcome += 1;
            continue;
        };

        rulings.push(JudgeRuling {
            case_number,
            judge,
            outcome,
        });
    }

    report.loaded = rulings.len();
    RulingsIngested { rulings, report }
}
