//! Spreadsheet ingestion for Caseboard
//!
//! Turns a tabular export of litigation records into `NormalizedCase`s:
//! - row 0 is a header and is always skipped (no header validation),
//! - columns 0–6 are read positionally: case number, origin type, company,
//!   status, phase, value, risk prognosis,
//! - short rows and rows with a blank case number are dropped silently,
//! - the value column is coerced to a non-negative rounded integer.
//!
//! A missing source or a source without data rows is "no data": the result
//! is empty and an error is logged, but nothing is returned as `Err`. Only
//! genuinely exceptional conditions (permission errors, unreadable or
//! malformed files, unsupported formats) surface as an [`IngestError`].

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use caseboard_model::{Classifier, LabelFields, NormalizedCase};

pub mod raw;
pub mod reader;
pub mod rulings;

pub use raw::{coerce_money, parse_money_text, Money, RawCell, RawRow};
pub use reader::{read_table, SourceFormat, Table};
pub use rulings::{ingest_ruling_rows, ingest_rulings, RulingReport, RulingsIngested};

use raw::columns;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed JSON in {} (expected an array of row arrays): {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unreadable workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("unsupported source format `{extension}` for {} (expected csv, tsv, json or xlsx)", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Per-run counts for observability and data-quality reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Data rows seen (header excluded).
    pub rows_read: usize,
    pub loaded: usize,
    pub skipped_short: usize,
    pub skipped_blank_case_number: usize,
    /// Present values that were unusable and stored as 0.
    pub values_coerced: usize,
    /// Phase labels that matched no marker and took the default bucket.
    pub phase_fallbacks: usize,
    /// Risk labels that matched no marker and took the default bucket.
    pub risk_fallbacks: usize,
}

/// Result of one ingestion run: one dataset snapshot's records.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub cases: Vec<NormalizedCase>,
    pub report: IngestReport,
    /// SHA-256 of the source bytes, when read from a file.
    pub digest: Option<String>,
}

/// Ingest a case export from disk.
pub fn ingest_path(path: &Path, classifier: &Classifier) -> Result<Ingested, IngestError> {
    let Some(table) = read_table(path)? else {
        error!(source = %path.display(), "case source not found; no data loaded");
        return Ok(Ingested::default());
    };

    if table.rows.len() < 2 {
        error!(
            source = %path.display(),
            rows = table.rows.len(),
            "case source has no data rows; no data loaded"
        );
        return Ok(Ingested {
            digest: Some(table.digest),
            ..Ingested::default()
        });
    }

    let mut ingested = ingest_rows(&table.rows, classifier);
    ingested.digest = Some(table.digest);

    info!(
        source = %path.display(),
        loaded = ingested.report.loaded,
        rows = ingested.report.rows_read,
        "loaded case records"
    );
    Ok(ingested)
}

/// Run the pipeline over in-memory rows (row 0 is the header).
pub fn ingest_rows(rows: &[RawRow], classifier: &Classifier) -> Ingested {
    let mut report = IngestReport::default();
    let mut cases = Vec::with_capacity(rows.len().saturating_sub(1));

    for row in rows.iter().skip(1) {
        report.rows_read += 1;

        if row.len() < columns::MIN_FIELDS {
            report.skipped_short += 1;
            continue;
        }

        let case_number = row[columns::CASE_NUMBER].as_text();
        if case_number.is_empty() {
            report.skipped_blank_case_number += 1;
            continue;
        }

        let origin = row[columns::ORIGIN].as_text();
        let company = row[columns::COMPANY].as_text();
        let phase = row[columns::PHASE].as_text();
        let risk = row[columns::RISK].as_text();
        let classification = classifier.classify(&LabelFields {
            origin: &origin,
            company: &company,
            phase: &phase,
            risk: &risk,
        });

        let money = coerce_money(&row[columns::VALUE]);
        if money.coerced {
            report.values_coerced += 1;
        }
        if !classification.phase.matched {
            report.phase_fallbacks += 1;
        }
        if !classification.risk.matched {
            report.risk_fallbacks += 1;
        }

        if let Some(case) = NormalizedCase::new(
            &case_number,
            &row[columns::STATUS].as_text(),
            classification.company,
            classification.phase.value,
            classification.risk.value,
            money.units,
        ) {
            cases.push(case);
        }
    }

    report.loaded = cases.len();
    Ingested {
        cases,
        report,
        digest: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseboard_model::{Company, Phase, RiskLevel};

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| RawCell::text(*c)).collect()
    }

    fn header() -> RawRow {
        row(&["Processo", "Tipo", "Empresa", "Status", "Fase", "Valor", "Risco"])
    }

    #[test]
    fn short_and_blank_rows_yield_nothing() {
        let rows = vec![
            header(),
            row(&["0001", "PRÓPRIO", "X", "Ativo", "Recursal"]),
            row(&["   ", "PRÓPRIO", "X", "Ativo", "Recursal", "10", "Remoto"]),
        ];
        let out = ingest_rows(&rows, &Classifier::default());
        assert!(out.cases.is_empty());
        assert_eq!(out.report.rows_read, 2);
        assert_eq!(out.report.skipped_short, 1);
        assert_eq!(out.report.skipped_blank_case_number, 1);
        assert_eq!(out.report.loaded, 0);
    }

    #[test]
    fn valid_row_rounds_value() {
        let rows = vec![
            header(),
            row(&[
                "0001380-35.2023.5.09.0662",
                "PRÓPRIO",
                "SEREDE TERCEIRIZADA",
                "Ativo",
                "Execução",
                "1500.50",
                "Provável",
            ]),
        ];
        let out = ingest_rows(&rows, &Classifier::default());
        assert_eq!(out.cases.len(), 1);
        let case = &out.cases[0];
        assert_eq!(case.total_value, 1501);
        assert_eq!(case.case_count, 1);
        assert_eq!(case.company, Company::MainTenant);
        assert_eq!(case.phase, Phase::Execution);
        assert_eq!(case.risk_level, RiskLevel::Probable);
        assert_eq!(case.status, "Ativo");
    }

    #[test]
    fn header_row_is_never_read_as_data() {
        // A header that looks exactly like data is still skipped.
        let data = row(&["1", "PRÓPRIO", "X", "Ativo", "Recursal", "10", "Remoto"]);
        let out = ingest_rows(&[data.clone(), data], &Classifier::default());
        assert_eq!(out.cases.len(), 1);
    }

    #[test]
    fn fallbacks_and_coercions_are_counted() {
        let rows = vec![
            header(),
            row(&["1", "", "", "", "Arquivado", "abc", "sem risco"]),
            row(&["2", "", "", "", "Recursal", "10", "Remoto"]),
        ];
        let out = ingest_rows(&rows, &Classifier::default());
        assert_eq!(out.cases.len(), 2);
        assert_eq!(out.report.phase_fallbacks, 1);
        assert_eq!(out.report.risk_fallbacks, 1);
        assert_eq!(out.report.values_coerced, 1);
        assert_eq!(out.cases[0].total_value, 0);
        assert_eq!(out.cases[0].phase, Phase::Knowledge);
        assert_eq!(out.cases[0].risk_level, RiskLevel::Remote);
    }

    #[test]
    fn numeric_case_numbers_are_accepted() {
        let rows = vec![
            header(),
            vec![
                RawCell::Number(12345.0),
                RawCell::text("PRÓPRIO"),
                RawCell::text("X"),
                RawCell::text("Ativo"),
                RawCell::text("Recursal"),
                RawCell::Number(99.6),
                RawCell::text("Remoto"),
            ],
        ];
        let out = ingest_rows(&rows, &Classifier::default());
        assert_eq!(out.cases[0].case_number, "12345");
        assert_eq!(out.cases[0].total_value, 100);
    }
}
