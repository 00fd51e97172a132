//! Derived view models consumed by the presentation layer.
//!
//! Field names are part of the API contract (`fases`, `riscos`, `empresas`,
//! `summary`, camelCase inside). Values keep full precision; rounding is left
//! to whoever renders them (see `crate::display`).

use serde::Serialize;

use caseboard_model::{Company, Phase, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummary {
    pub phase: Phase,
    pub process_count: u64,
    pub percent_of_processes: f64,
    pub total_value: u64,
    pub percent_of_value: f64,
    pub average_ticket: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub risk_level: RiskLevel,
    pub process_count: u64,
    pub percent_of_processes: f64,
    pub total_value: u64,
    pub percent_of_value: f64,
    pub average_ticket: f64,
}

/// One phase cell of a company row; the percent is relative to the
/// company's own value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBreakdown {
    pub process_count: u64,
    pub value: u64,
    pub percent_of_value: f64,
}

/// A company's totals; percents are relative to the global grand totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTotal {
    pub process_count: u64,
    pub percent_of_processes: f64,
    pub value: u64,
    pub percent_of_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPhaseSummary {
    pub company: Company,
    pub knowledge: PhaseBreakdown,
    pub appellate: PhaseBreakdown,
    pub execution: PhaseBreakdown,
    pub total: CompanyTotal,
}

impl CompanyPhaseSummary {
    pub fn phase(&self, phase: Phase) -> &PhaseBreakdown {
        match phase {
            Phase::Knowledge => &self.knowledge,
            Phase::Appellate => &self.appellate,
            Phase::Execution => &self.execution,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_processes: u64,
    pub total_liability: u64,
    pub global_average_ticket: f64,
    pub percent_probable_risk: f64,
    pub percent_appellate_phase: f64,
}

/// The aggregation contract: every phase and risk bucket is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub fases: Vec<PhaseSummary>,
    pub riscos: Vec<RiskSummary>,
    pub empresas: Vec<CompanyPhaseSummary>,
    pub summary: DashboardSummary,
}
