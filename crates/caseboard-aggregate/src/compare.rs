//! Snapshot comparison: two independent aggregations → per-bucket deltas.

use serde::Serialize;

use caseboard_model::{Company, Phase, RiskLevel};

use crate::views::{DashboardSummary, DashboardView};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDelta<K> {
    pub key: K,
    pub process_count_before: u64,
    pub process_count_after: u64,
    pub process_count_delta: i64,
    pub value_before: u64,
    pub value_after: u64,
    pub value_delta: i64,
}

impl<K> BucketDelta<K> {
    fn new(key: K, before: (u64, u64), after: (u64, u64)) -> Self {
        Self {
            key,
            process_count_before: before.0,
            process_count_after: after.0,
            process_count_delta: signed_delta(before.0, after.0),
            value_before: before.1,
            value_after: after.1,
            value_delta: signed_delta(before.1, after.1),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.process_count_delta == 0 && self.value_delta == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDelta {
    pub total_processes: i64,
    pub total_liability: i64,
    pub global_average_ticket: f64,
    pub percent_probable_risk: f64,
    pub percent_appellate_phase: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardDelta {
    pub fases: Vec<BucketDelta<Phase>>,
    pub riscos: Vec<BucketDelta<RiskLevel>>,
    /// Companies present on either side, in display order.
    pub empresas: Vec<BucketDelta<Company>>,
    pub before: DashboardSummary,
    pub after: DashboardSummary,
    pub summary: SummaryDelta,
}

fn signed_delta(before: u64, after: u64) -> i64 {
    let d = i128::from(after) - i128::from(before);
    i64::try_from(d).unwrap_or(if d > 0 { i64::MAX } else { i64::MIN })
}

pub fn compare(before: &DashboardView, after: &DashboardView) -> DashboardDelta {
    let phase_totals = |view: &DashboardView, phase: Phase| {
        view.fases
            .iter()
            .find(|f| f.phase == phase)
            .map(|f| (f.process_count, f.total_value))
            .unwrap_or_default()
    };
    let risk_totals = |view: &DashboardView, risk: RiskLevel| {
        view.riscos
            .iter()
            .find(|r| r.risk_level == risk)
            .map(|r| (r.process_count, r.total_value))
            .unwrap_or_default()
    };
    let company_totals = |view: &DashboardView, company: Company| {
        view.empresas
            .iter()
            .find(|e| e.company == company)
            .map(|e| (e.total.process_count, e.total.value))
    };

    let fases = Phase::ALL
        .iter()
        .map(|&p| BucketDelta::new(p, phase_totals(before, p), phase_totals(after, p)))
        .collect();

    let riscos = RiskLevel::ALL
        .iter()
        .map(|&r| BucketDelta::new(r, risk_totals(before, r), risk_totals(after, r)))
        .collect();

    let empresas = Company::ALL
        .iter()
        .filter_map(|&c| {
            let b = company_totals(before, c);
            let a = company_totals(after, c);
            if b.is_none() && a.is_none() {
                return None;
            }
            Some(BucketDelta::new(c, b.unwrap_or_default(), a.unwrap_or_default()))
        })
        .collect();

    let (b, a) = (&before.summary, &after.summary);
    let summary = SummaryDelta {
        total_processes: signed_delta(b.total_processes, a.total_processes),
        total_liability: signed_delta(b.total_liability, a.total_liability),
        global_average_ticket: a.global_average_ticket - b.global_average_ticket,
        percent_probable_risk: a.percent_probable_risk - b.percent_probable_risk,
        percent_appellate_phase: a.percent_appellate_phase - b.percent_appellate_phase,
    };

    DashboardDelta {
        fases,
        riscos,
        empresas,
        before: before.summary.clone(),
        after: after.summary.clone(),
        summary,
    }
}
