//! Aggregation engine: one snapshot's records → `DashboardView`.
//!
//! Grouping uses fixed arrays indexed by enum discriminant, so output order
//! is the enums' display order and never depends on map iteration. The
//! function is pure and never fails: empty input yields every bucket with
//! zero counts and every ratio at 0.

use caseboard_model::{Company, NormalizedCase, Phase, RiskLevel};

use crate::views::{
    CompanyPhaseSummary, CompanyTotal, DashboardSummary, DashboardView, PhaseBreakdown,
    PhaseSummary, RiskSummary,
};

#[derive(Debug, Clone, Copy, Default)]
struct Acc {
    count: u64,
    value: u64,
}

impl Acc {
    fn add(&mut self, case: &NormalizedCase) {
        self.count = self.count.saturating_add(case.case_count);
        self.value = self.value.saturating_add(case.total_value);
    }

    fn merge(&mut self, other: Acc) {
        self.count = self.count.saturating_add(other.count);
        self.value = self.value.saturating_add(other.value);
    }
}

/// `part / whole × 100`, or 0 when `whole` is 0. Callers pass `part <= whole`;
/// the clamp keeps float rounding on huge totals inside [0, 100].
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 * 100.0 / whole as f64).min(100.0)
    }
}

/// `value / count`, or 0 when `count` is 0.
pub fn average(value: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        value as f64 / count as f64
    }
}

pub fn aggregate(cases: &[NormalizedCase]) -> DashboardView {
    let mut phases = [Acc::default(); 3];
    let mut risks = [Acc::default(); 3];
    let mut companies = [[Acc::default(); 3]; 5];
    let mut present = [false; 5];

    for case in cases {
        phases[case.phase.index()].add(case);
        risks[case.risk_level.index()].add(case);
        companies[case.company.index()][case.phase.index()].add(case);
        present[case.company.index()] = true;
    }

    let mut grand = Acc::default();
    for acc in phases {
        grand.merge(acc);
    }

    let fases = Phase::ALL
        .iter()
        .map(|&phase| {
            let acc = phases[phase.index()];
            PhaseSummary {
                phase,
                process_count: acc.count,
                percent_of_processes: percent(acc.count, grand.count),
                total_value: acc.value,
                percent_of_value: percent(acc.value, grand.value),
                average_ticket: average(acc.value, acc.count),
            }
        })
        .collect();

    let riscos = RiskLevel::ALL
        .iter()
        .map(|&risk_level| {
            let acc = risks[risk_level.index()];
            RiskSummary {
                risk_level,
                process_count: acc.count,
                percent_of_processes: percent(acc.count, grand.count),
                total_value: acc.value,
                percent_of_value: percent(acc.value, grand.value),
                average_ticket: average(acc.value, acc.count),
            }
        })
        .collect();

    let empresas = Company::ALL
        .iter()
        .filter(|company| present[company.index()])
        .map(|&company| company_row(company, &companies[company.index()], grand))
        .collect();

    let summary = DashboardSummary {
        total_processes: grand.count,
        total_liability: grand.value,
        global_average_ticket: average(grand.value, grand.count),
        percent_probable_risk: percent(risks[RiskLevel::Probable.index()].count, grand.count),
        percent_appellate_phase: percent(phases[Phase::Appellate.index()].count, grand.count),
    };

    DashboardView {
        fases,
        riscos,
        empresas,
        summary,
    }
}

fn company_row(company: Company, by_phase: &[Acc; 3], grand: Acc) -> CompanyPhaseSummary {
    let mut total = Acc::default();
    for acc in by_phase {
        total.merge(*acc);
    }

    let cell = |phase: Phase| {
        let acc = by_phase[phase.index()];
        PhaseBreakdown {
            process_count: acc.count,
            value: acc.value,
            percent_of_value: percent(acc.value, total.value),
        }
    };

    CompanyPhaseSummary {
        company,
        knowledge: cell(Phase::Knowledge),
        appellate: cell(Phase::Appellate),
        execution: cell(Phase::Execution),
        total: CompanyTotal {
            process_count: total.count,
            percent_of_processes: percent(total.count, grand.count),
            value: total.value,
            percent_of_value: percent(total.value, grand.value),
        },
    }
}
