use caseboard_aggregate::{aggregate, compare, favorability, DashboardView};
use caseboard_model::{Company, JudgeRuling, NormalizedCase, Phase, RiskLevel, RulingOutcome};
use proptest::prelude::*;

fn company() -> impl Strategy<Value = Company> {
    proptest::sample::select(Company::ALL.to_vec())
}

fn phase() -> impl Strategy<Value = Phase> {
    proptest::sample::select(Phase::ALL.to_vec())
}

fn risk() -> impl Strategy<Value = RiskLevel> {
    proptest::sample::select(RiskLevel::ALL.to_vec())
}

fn case() -> impl Strategy<Value = NormalizedCase> {
    (company(), phase(), risk(), 0u64..5_000_000).prop_map(|(c, p, r, v)| {
        NormalizedCase::new("0001380-35.2023.5.09.0662", "Ativo", c, p, r, v).unwrap()
    })
}

fn cases() -> impl Strategy<Value = Vec<NormalizedCase>> {
    proptest::collection::vec(case(), 0..60)
}

fn percents(view: &DashboardView) -> Vec<f64> {
    let mut out = vec![
        view.summary.percent_probable_risk,
        view.summary.percent_appellate_phase,
    ];
    for f in &view.fases {
        out.extend([f.percent_of_processes, f.percent_of_value]);
    }
    for r in &view.riscos {
        out.extend([r.percent_of_processes, r.percent_of_value]);
    }
    for e in &view.empresas {
        out.extend([e.total.percent_of_processes, e.total.percent_of_value]);
        for p in Phase::ALL {
            out.push(e.phase(p).percent_of_value);
        }
    }
    out
}

proptest! {
    #[test]
    fn aggregation_is_deterministic(cases in cases()) {
        prop_assert_eq!(aggregate(&cases), aggregate(&cases));
    }

    #[test]
    fn every_bucket_is_present(cases in cases()) {
        let view = aggregate(&cases);
        prop_assert_eq!(view.fases.len(), 3);
        prop_assert_eq!(view.riscos.len(), 3);
        for (f, p) in view.fases.iter().zip(Phase::ALL) {
            prop_assert_eq!(f.phase, p);
        }
        for (r, l) in view.riscos.iter().zip(RiskLevel::ALL) {
            prop_assert_eq!(r.risk_level, l);
        }
    }

    #[test]
    fn bucket_counts_and_values_sum_to_totals(cases in cases()) {
        let view = aggregate(&cases);
        let n = cases.len() as u64;
        let total: u64 = cases.iter().map(|c| c.total_value).sum();

        prop_assert_eq!(view.summary.total_processes, n);
        prop_assert_eq!(view.summary.total_liability, total);
        prop_assert_eq!(view.fases.iter().map(|f| f.process_count).sum::<u64>(), n);
        prop_assert_eq!(view.riscos.iter().map(|r| r.process_count).sum::<u64>(), n);
        prop_assert_eq!(view.fases.iter().map(|f| f.total_value).sum::<u64>(), total);
        prop_assert_eq!(view.riscos.iter().map(|r| r.total_value).sum::<u64>(), total);
        prop_assert_eq!(view.empresas.iter().map(|e| e.total.process_count).sum::<u64>(), n);
        prop_assert_eq!(view.empresas.iter().map(|e| e.total.value).sum::<u64>(), total);

        for e in &view.empresas {
            let by_phase: u64 = Phase::ALL.iter().map(|&p| e.phase(p).process_count).sum();
            prop_assert_eq!(by_phase, e.total.process_count);
            prop_assert!(e.total.process_count > 0);
        }
    }

    #[test]
    fn every_percent_is_bounded(cases in cases()) {
        let view = aggregate(&cases);
        for p in percents(&view) {
            prop_assert!((0.0..=100.0).contains(&p), "percent out of range: {}", p);
        }
    }

    #[test]
    fn order_of_input_does_not_change_totals(cases in cases()) {
        let mut reversed = cases.clone();
        reversed.reverse();
        let a = aggregate(&cases);
        let b = aggregate(&reversed);
        prop_assert_eq!(a.summary.total_processes, b.summary.total_processes);
        prop_assert_eq!(a.summary.total_liability, b.summary.total_liability);
        for (x, y) in a.fases.iter().zip(&b.fases) {
            prop_assert_eq!(x.process_count, y.process_count);
            prop_assert_eq!(x.total_value, y.total_value);
        }
    }

    #[test]
    fn comparing_a_snapshot_with_itself_is_zero(cases in cases()) {
        let view = aggregate(&cases);
        let delta = compare(&view, &view);
        prop_assert!(delta.fases.iter().all(|d| d.is_unchanged()));
        prop_assert!(delta.riscos.iter().all(|d| d.is_unchanged()));
        prop_assert!(delta.empresas.iter().all(|d| d.is_unchanged()));
        prop_assert_eq!(delta.empresas.len(), view.empresas.len());
        prop_assert_eq!(delta.summary.total_processes, 0);
        prop_assert_eq!(delta.summary.total_liability, 0);
        prop_assert_eq!(delta.summary.percent_probable_risk, 0.0);
    }

    #[test]
    fn comparison_deltas_match_totals(before in cases(), after in cases()) {
        let delta = compare(&aggregate(&before), &aggregate(&after));
        let expected = after.len() as i64 - before.len() as i64;
        prop_assert_eq!(delta.summary.total_processes, expected);
        prop_assert_eq!(delta.fases.iter().map(|d| d.process_count_delta).sum::<i64>(), expected);
    }

    #[test]
    fn favorability_rates_are_bounded(
        outcomes in proptest::collection::vec(
            proptest::sample::select(RulingOutcome::ALL.to_vec()),
            0..40,
        ),
    ) {
        let rulings: Vec<JudgeRuling> = outcomes
            .iter()
            .enumerate()
            .map(|(i, &outcome)| JudgeRuling {
                case_number: format!("000{i:04}-35.2023.5.{:02}.0001", i % 30),
                judge: format!("Juiz {}", i % 4),
                outcome,
            })
            .collect();
        let view = favorability(&rulings);
        prop_assert_eq!(view.overall.rulings, rulings.len() as u64);

        let resolved: u64 = view.courts.iter().map(|c| c.tally.rulings).sum();
        prop_assert_eq!(resolved + view.unresolved, rulings.len() as u64);

        let rates = view
            .courts
            .iter()
            .map(|c| c.tally.favorability_rate)
            .chain(view.judges.iter().map(|j| j.tally.favorability_rate))
            .chain([view.overall.favorability_rate]);
        for rate in rates {
            prop_assert!((0.0..=100.0).contains(&rate));
        }
    }
}
