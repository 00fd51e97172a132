//! Human-readable terminal reports.

use colored::Colorize;

use caseboard_aggregate::display::{format_currency, format_currency_f64, format_percent};
use caseboard_aggregate::{BucketDelta, DashboardDelta, DashboardView, FavorabilityView};
use caseboard_ingest_sheet::IngestReport;
use caseboard_model::{CourtInfo, Phase};

pub fn print_dashboard(view: &DashboardView, report: &IngestReport) {
    let s = &view.summary;
    println!("{}", "Resumo".bold());
    println!("  Processos:          {}", s.total_processes.to_string().cyan());
    println!("  Passivo total:      {}", format_currency(s.total_liability).cyan());
    println!("  Ticket médio:       {}", format_currency_f64(s.global_average_ticket));
    println!("  Risco provável:     {}", format_percent(s.percent_probable_risk));
    println!("  Fase recursal:      {}", format_percent(s.percent_appellate_phase));

    println!();
    println!("{}", "Por fase".bold());
    for f in &view.fases {
        println!(
            "  {:<14} {:>6} ({:>6})  {:>16} ({:>6})  ticket {}",
            f.phase.label(),
            f.process_count,
            format_percent(f.percent_of_processes),
            format_currency(f.total_value),
            format_percent(f.percent_of_value),
            format_currency_f64(f.average_ticket),
        );
    }

    println!();
    println!("{}", "Por risco".bold());
    for r in &view.riscos {
        println!(
            "  {:<14} {:>6} ({:>6})  {:>16} ({:>6})  ticket {}",
            r.risk_level.label(),
            r.process_count,
            format_percent(r.percent_of_processes),
            format_currency(r.total_value),
            format_percent(r.percent_of_value),
            format_currency_f64(r.average_ticket),
        );
    }

    if !view.empresas.is_empty() {
        println!();
        println!("{}", "Por empresa".bold());
        for e in &view.empresas {
            println!(
                "  {:<14} {:>6} ({:>6})  {:>16} ({:>6})",
                e.company.label(),
                e.total.process_count,
                format_percent(e.total.percent_of_processes),
                format_currency(e.total.value),
                format_percent(e.total.percent_of_value),
            );
            for phase in Phase::ALL {
                let cell = e.phase(phase);
                if cell.process_count > 0 {
                    println!(
                        "    {:<12} {:>6}  {:>16} ({:>6})",
                        phase.label(),
                        cell.process_count,
                        format_currency(cell.value),
                        format_percent(cell.percent_of_value),
                    );
                }
            }
        }
    }

    print_data_quality(report);
}

fn print_data_quality(report: &IngestReport) {
    let skipped = report.skipped_short + report.skipped_blank_case_number;
    let issues = skipped + report.values_coerced + report.phase_fallbacks + report.risk_fallbacks;
    if issues == 0 {
        return;
    }
    println!();
    println!("{}", "Qualidade dos dados".yellow().bold());
    let line = |label: &str, n: usize| {
        if n > 0 {
            println!("  {label:<28} {}", n.to_string().yellow());
        }
    };
    line("Linhas curtas ignoradas", report.skipped_short);
    line("Linhas sem número", report.skipped_blank_case_number);
    line("Valores zerados", report.values_coerced);
    line("Fase sem correspondência", report.phase_fallbacks);
    line("Risco sem correspondência", report.risk_fallbacks);
}

fn signed(n: i64) -> String {
    let text = format!("{n:+}");
    match n.signum() {
        1 => text.green().to_string(),
        -1 => text.red().to_string(),
        _ => text.dimmed().to_string(),
    }
}

fn delta_line<K>(label: &str, d: &BucketDelta<K>) {
    println!(
        "  {:<14} {:>6} → {:>6} ({})   {:>16} → {:>16} ({})",
        label,
        d.process_count_before,
        d.process_count_after,
        signed(d.process_count_delta),
        format_currency(d.value_before),
        format_currency(d.value_after),
        signed(d.value_delta),
    );
}

pub fn print_delta(delta: &DashboardDelta) {
    let s = &delta.summary;
    println!("{}", "Variação".bold());
    println!("  Processos:      {}", signed(s.total_processes));
    println!("  Passivo total:  {}", signed(s.total_liability));
    println!(
        "  Risco provável: {} → {}",
        format_percent(delta.before.percent_probable_risk),
        format_percent(delta.after.percent_probable_risk),
    );
    println!(
        "  Fase recursal:  {} → {}",
        format_percent(delta.before.percent_appellate_phase),
        format_percent(delta.after.percent_appellate_phase),
    );

    println!();
    println!("{}", "Por fase".bold());
    for d in &delta.fases {
        delta_line(d.key.label(), d);
    }
    println!();
    println!("{}", "Por risco".bold());
    for d in &delta.riscos {
        delta_line(d.key.label(), d);
    }
    if !delta.empresas.is_empty() {
        println!();
        println!("{}", "Por empresa".bold());
        for d in &delta.empresas {
            delta_line(d.key.label(), d);
        }
    }
}

pub fn print_court(number: &str, info: Option<&CourtInfo>) {
    match info {
        Some(c) => println!(
            "{}  TRT-{} {} ({}, {})",
            number.bold(),
            c.court_code,
            c.court_name,
            c.state_abbrev,
            c.region
        ),
        None => println!("{}  {}", number.bold(), "unresolved".red()),
    }
}

pub fn print_favorability(view: &FavorabilityView) {
    println!(
        "{} {} decisões, favorabilidade {}",
        "Geral:".bold(),
        view.overall.rulings,
        format_percent(view.overall.favorability_rate).cyan()
    );

    if !view.courts.is_empty() {
        println!();
        println!("{}", "Por tribunal".bold());
        for c in &view.courts {
            println!(
                "  TRT-{} {:<4} {:>5} decisões  {:>7}",
                c.court_code,
                c.state_abbrev,
                c.tally.rulings,
                format_percent(c.tally.favorability_rate),
            );
        }
    }
    if view.unresolved > 0 {
        println!("  {} {}", "sem tribunal:".yellow(), view.unresolved);
    }

    if !view.judges.is_empty() {
        println!();
        println!("{}", "Por juiz".bold());
        for j in &view.judges {
            println!(
                "  {:<28} {:>5} decisões  {:>7}",
                j.judge,
                j.tally.rulings,
                format_percent(j.tally.favorability_rate),
            );
        }
    }
}
