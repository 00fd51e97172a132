//! Normalized case records and their closed enumerations.
//!
//! Every categorical dimension is a fixed-cardinality enum with:
//! - `ALL`: the fixed display order,
//! - `as_str()`: the stable wire name,
//! - `label()`: the display label used in spreadsheets and reports,
//! - `index()`: a dense discriminant for array-backed grouping.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a normalized case
pub type CaseId = Uuid;

/// Company responsible for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Company {
    MainTenant,
    PartnerA,
    PartnerB,
    PartnerC,
    Other,
}

impl Company {
    pub const ALL: [Company; 5] = [
        Company::MainTenant,
        Company::PartnerA,
        Company::PartnerB,
        Company::PartnerC,
        Company::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Company::MainTenant => "MainTenant",
            Company::PartnerA => "PartnerA",
            Company::PartnerB => "PartnerB",
            Company::PartnerC => "PartnerC",
            Company::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Company::MainTenant => "Própria",
            Company::PartnerA => "Parceira A",
            Company::PartnerB => "Parceira B",
            Company::PartnerC => "Parceira C",
            Company::Other => "Outras",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Processing stage of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Knowledge,
    Appellate,
    Execution,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Knowledge, Phase::Appellate, Phase::Execution];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Knowledge => "Knowledge",
            Phase::Appellate => "Appellate",
            Phase::Execution => "Execution",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Knowledge => "Conhecimento",
            Phase::Appellate => "Recursal",
            Phase::Execution => "Execução",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Prognosis of an adverse outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Remote,
    Possible,
    Probable,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Remote, RiskLevel::Possible, RiskLevel::Probable];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Remote => "Remote",
            RiskLevel::Possible => "Possible",
            RiskLevel::Probable => "Probable",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Remote => "Remoto",
            RiskLevel::Possible => "Possível",
            RiskLevel::Probable => "Provável",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One litigation record after normalization. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCase {
    pub id: CaseId,
    pub case_number: String,
    pub status: String,
    pub company: Company,
    pub phase: Phase,
    pub risk_level: RiskLevel,
    /// Always 1: each spreadsheet row is exactly one case.
    pub case_count: u64,
    /// Rounded to the nearest integer currency unit.
    pub total_value: u64,
}

impl NormalizedCase {
    /// Build a record with a fresh id. Returns `None` for a blank case number;
    /// such rows are never materialized.
    pub fn new(
        case_number: &str,
        status: &str,
        company: Company,
        phase: Phase,
        risk_level: RiskLevel,
        total_value: u64,
    ) -> Option<Self> {
        let case_number = case_number.trim();
        if case_number.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            case_number: case_number.to_string(),
            status: status.trim().to_string(),
            company,
            phase,
            risk_level,
            case_count: 1,
            total_value,
        })
    }
}
