//! Cross-crate flows: export file → ingestion → aggregation → comparison.

use approx::assert_relative_eq;
use std::fs;
use tempfile::tempdir;

use caseboard_aggregate::{aggregate, compare, favorability};
use caseboard_ingest_sheet::{ingest_path, ingest_rows, ingest_rulings, RawCell, RawRow};
use caseboard_model::{Classifier, ClassifierConfig, Company, Phase, RiskLevel};

const HEADER: &str = "Processo;Tipo;Empresa;Status;Fase;Valor;Risco\n";

fn portfolio() -> String {
    format!(
        "{HEADER}\
         0001380-35.2023.5.09.0662;PRÓPRIO;Matriz Curitiba;Ativo;Conhecimento;10.000,00;Remoto\n\
         0001381-35.2023.5.09.0662;PRÓPRIO;SEREDE TERCEIRIZADA;Ativo;Recursal;R$ 30.000,00;Provável\n\
         0001382-35.2023.5.02.0001;TERCEIRO;Serede Serviços;Ativo;Execução;20.000,00;Possível\n\
         0001383-35.2023.5.02.0001;TERCEIRO;Parceira B Ltda;Ativo;RECURSO ORDINÁRIO;25.000,00;PROVÁVEL\n\
         0001384-35.2023.5.04.0001;TERCEIRO;Parceira C;Encerrado;Conhecimento;-5;Remoto\n\
         0001385-35.2023.5.04.0001;TERCEIRO;Desconhecida;Ativo;Conhecimento;15.000,00;Remoto\n\
         ;PRÓPRIO;Matriz;Ativo;Conhecimento;99,00;Remoto\n\
         0001386-35.2023.5.04.0001;PRÓPRIO;Matriz\n"
    )
}

#[test]
fn export_to_dashboard() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("2024-05.csv");
    fs::write(&path, portfolio()).unwrap();

    let ingested = ingest_path(&path, &Classifier::default()).unwrap();
    assert_eq!(ingested.cases.len(), 6);
    assert_eq!(ingested.report.rows_read, 8);
    assert_eq!(ingested.report.skipped_blank_case_number, 1);
    assert_eq!(ingested.report.skipped_short, 1);
    assert_eq!(ingested.report.values_coerced, 1);

    let companies: Vec<Company> = ingested.cases.iter().map(|c| c.company).collect();
    assert_eq!(
        companies,
        vec![
            Company::MainTenant,
            Company::MainTenant,
            Company::PartnerA,
            Company::PartnerB,
            Company::PartnerC,
            Company::Other,
        ]
    );

    let view = aggregate(&ingested.cases);
    assert_eq!(view.summary.total_processes, 6);
    assert_eq!(view.summary.total_liability, 100_000);
    assert_relative_eq!(view.summary.global_average_ticket, 100_000.0 / 6.0, epsilon = 1e-9);
    assert_relative_eq!(view.summary.percent_probable_risk, 100.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(view.summary.percent_appellate_phase, 100.0 / 3.0, epsilon = 1e-9);

    let appellate = &view.fases[Phase::Appellate.index()];
    assert_eq!(appellate.process_count, 2);
    assert_eq!(appellate.total_value, 55_000);
    assert_relative_eq!(appellate.percent_of_value, 55.0);

    let probable = &view.riscos[RiskLevel::Probable.index()];
    assert_eq!(probable.total_value, 55_000);

    let main = view
        .empresas
        .iter()
        .find(|e| e.company == Company::MainTenant)
        .unwrap();
    assert_eq!(main.total.value, 40_000);
    assert_relative_eq!(main.knowledge.percent_of_value, 25.0);
    assert_relative_eq!(main.appellate.percent_of_value, 75.0);
    assert_relative_eq!(main.total.percent_of_value, 40.0);

    let json = serde_json::to_value(&view).unwrap();
    for key in ["fases", "riscos", "empresas", "summary"] {
        assert!(json.get(key).is_some(), "missing `{key}`");
    }
    assert!(json["summary"].get("percentProbableRisk").is_some());
}

#[test]
fn month_over_month_comparison() {
    let dir = tempdir().unwrap();
    let before = dir.path().join("2024-04.csv");
    let after = dir.path().join("2024-05.csv");
    fs::write(
        &before,
        format!("{HEADER}0001380-35.2023.5.09.0662;PRÓPRIO;Matriz;Ativo;Conhecimento;10.000,00;Remoto\n"),
    )
    .unwrap();
    fs::write(&after, portfolio()).unwrap();

    let classifier = Classifier::default();
    let a = aggregate(&ingest_path(&before, &classifier).unwrap().cases);
    let b = aggregate(&ingest_path(&after, &classifier).unwrap().cases);
    let delta = compare(&a, &b);

    assert_eq!(delta.summary.total_processes, 5);
    assert_eq!(delta.summary.total_liability, 90_000);
    assert_eq!(delta.fases[Phase::Knowledge.index()].process_count_delta, 2);
    assert_eq!(delta.empresas.len(), 5);
    assert_eq!(delta.empresas[0].key, Company::MainTenant);
    assert_eq!(delta.empresas[0].process_count_delta, 1);

    let reverse = compare(&b, &a);
    assert_eq!(reverse.summary.total_processes, -5);
}

#[test]
fn custom_tokens_reroute_companies() {
    let config = ClassifierConfig::from_json(
        r#"{"company": {"partnerCTokens": ["desconhecida"]}}"#,
    )
    .unwrap();
    let row: RawRow = ["1", "TERCEIRO", "Desconhecida SA", "Ativo", "Recursal", "10", "Remoto"]
        .into_iter()
        .map(RawCell::text)
        .collect();
    let header: RawRow = vec![RawCell::text("h"); 7];

    let default = ingest_rows(&[header.clone(), row.clone()], &Classifier::default());
    assert_eq!(default.cases[0].company, Company::Other);

    let custom = ingest_rows(&[header, row], &Classifier::new(&config));
    assert_eq!(custom.cases[0].company, Company::PartnerC);
}

#[test]
fn rulings_to_favorability() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rulings.csv");
    fs::write(
        &path,
        "Processo,Juiz,Resultado\n\
         0001380-35.2023.5.09.0662,Dra. Ana,Favorável\n\
         0001381-35.2023.5.09.0662,Dra. Ana,Desfavorável\n\
         0001382-35.2023.5.02.0001,Dr. Bruno,Parcialmente procedente (parcial)\n\
         999,Dr. Bruno,Favorável\n",
    )
    .unwrap();

    let ingested = ingest_rulings(&path).unwrap();
    assert_eq!(ingested.rulings.len(), 4);

    let view = favorability(&ingested.rulings);
    assert_eq!(view.courts.len(), 2);
    assert_eq!(view.unresolved, 1);
    let parana = view.courts.iter().find(|c| c.court_code == "09").unwrap();
    assert_relative_eq!(parana.tally.favorability_rate, 50.0);
    assert_relative_eq!(view.overall.favorability_rate, 62.5);
}
