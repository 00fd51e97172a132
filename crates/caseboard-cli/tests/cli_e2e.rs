use std::fs;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::time::{Duration, Instant};

const HEADER: &str = "Processo,Tipo,Empresa,Status,Fase,Valor,Risco\n";

fn caseboard_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_caseboard"))
}

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn http(addr: &str, method: &str, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).ok();
    stream.set_write_timeout(Some(Duration::from_secs(5))).ok();

    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).expect("write request");
    stream.flush().ok();

    let mut response_bytes = Vec::new();
    stream
        .read_to_end(&mut response_bytes)
        .expect("read response");
    let response = String::from_utf8_lossy(&response_bytes).into_owned();

    let status = response
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(0);
    let body = response
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_default();
    (status, body)
}

fn http_json(addr: &str, method: &str, path: &str) -> (u16, serde_json::Value) {
    let (status, body) = http(addr, method, path);
    let json = serde_json::from_str(&body).expect("parse JSON response");
    (status, json)
}

fn write_month(dir: &Path, name: &str, rows: &str) {
    fs::write(dir.join(name), format!("{HEADER}{rows}")).expect("write snapshot");
}

#[test]
fn ingest_json_output_has_every_bucket() {
    let dir = tempfile::tempdir().unwrap();
    write_month(
        dir.path(),
        "2024-03.csv",
        "0001380-35.2023.5.09.0662,PRÓPRIO,SEREDE TERCEIRIZADA,Ativo,Execução,1500.50,Provável\n",
    );
    let out_file = dir.path().join("out/dashboard.json");
    fs::create_dir(dir.path().join("out")).unwrap();

    let output = Command::new(caseboard_bin())
        .arg("ingest")
        .arg(dir.path().join("2024-03.csv"))
        .arg("--json")
        .arg("--out")
        .arg(&out_file)
        .env_remove("CASEBOARD_CONFIG")
        .output()
        .expect("run caseboard ingest");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(view["fases"].as_array().unwrap().len(), 3);
    assert_eq!(view["riscos"].as_array().unwrap().len(), 3);
    assert_eq!(view["summary"]["totalLiability"], 1501);
    assert_eq!(view["empresas"][0]["company"], "MainTenant");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_file).unwrap()).unwrap();
    assert_eq!(written["dashboard"], view);
    assert_eq!(written["digest"].as_str().map(str::len), Some(64));
}

#[test]
fn resolve_prints_court_or_unresolved() {
    let output = Command::new(caseboard_bin())
        .args(["resolve", "--json", "0001380-35.2023.5.09.0662", "abc"])
        .output()
        .expect("run caseboard resolve");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["court"]["courtCode"], "09");
    assert_eq!(rows[0]["court"]["stateAbbrev"], "PR");
    assert!(rows[1]["court"].is_null());
}

#[test]
fn ingest_fails_on_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("export.pdf");
    fs::write(&pdf, b"%PDF-1.4").unwrap();

    let output = Command::new(caseboard_bin())
        .arg("ingest")
        .arg(&pdf)
        .output()
        .expect("run caseboard ingest");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported source format"));
}

#[test]
fn serve_dashboard_compare_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let snaps = dir.path().join("snapshots");
    fs::create_dir(&snaps).unwrap();
    write_month(
        &snaps,
        "2024-01.csv",
        "0001380-35.2023.5.09.0662,PRÓPRIO,Matriz,Ativo,Conhecimento,1000,Remoto\n",
    );
    write_month(
        &snaps,
        "2024-02.csv",
        "0001380-35.2023.5.09.0662,PRÓPRIO,Matriz,Ativo,Conhecimento,1000,Remoto\n\
         0001381-35.2023.5.02.0001,TERCEIRO,Parceira C,Ativo,Recursal,4000,Provável\n",
    );

    let ready_file = dir.path().join("build/ready.json");
    let child = Command::new(caseboard_bin())
        .arg("serve")
        .arg("--dir")
        .arg(&snaps)
        .arg("--listen")
        .arg("127.0.0.1:0")
        .arg("--ready-file")
        .arg(&ready_file)
        .env_remove("CASEBOARD_CONFIG")
        .spawn()
        .expect("spawn caseboard serve");
    let _guard = ChildGuard { child };

    let deadline = Instant::now() + Duration::from_secs(10);
    while !ready_file.exists() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(50));
    }
    assert!(ready_file.exists(), "server did not write ready file");

    let ready: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&ready_file).unwrap()).unwrap();
    let addr = ready["addr"].as_str().expect("ready.addr is string").to_string();

    let (status, body) = http(&addr, "GET", "/healthz");
    assert_eq!(status, 200);
    assert_eq!(body.trim(), "ok");

    let (status, dash) = http_json(&addr, "GET", "/api/dashboard");
    assert_eq!(status, 200, "{dash}");
    assert_eq!(dash["period"], "2024-02");
    assert_eq!(dash["summary"]["totalProcesses"], 2);
    assert_eq!(dash["summary"]["percentProbableRisk"], 50.0);

    let (status, delta) = http_json(&addr, "GET", "/api/compare?from=2024-01&to=2024-02");
    assert_eq!(status, 200, "{delta}");
    assert_eq!(delta["summary"]["totalLiability"], 4000);

    let (status, err) = http_json(&addr, "GET", "/api/dashboard?period=abcd-ef");
    assert_eq!(status, 400);
    assert!(err["error"].is_string());

    let (status, _) = http_json(&addr, "GET", "/api/nope");
    assert_eq!(status, 404);

    // A new month appears after reload.
    write_month(
        &snaps,
        "2024-03.csv",
        "0001380-35.2023.5.09.0662,PRÓPRIO,Matriz,Ativo,Execução,10,Remoto\n",
    );
    let (status, reloaded) = http_json(&addr, "POST", "/admin/reload");
    assert_eq!(status, 200, "{reloaded}");
    assert_eq!(reloaded["snapshots"].as_array().unwrap().len(), 3);

    let (_, dash) = http_json(&addr, "GET", "/api/dashboard");
    assert_eq!(dash["period"], "2024-03");
    assert_eq!(dash["summary"]["totalLiability"], 10);
}
