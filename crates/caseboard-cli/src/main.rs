//! Caseboard CLI
//!
//! Command-line interface for:
//! - Ingesting a litigation spreadsheet export and printing its dashboard
//! - Resolving case numbers to regional labor courts
//! - Comparing two reference-month snapshots
//! - Court and judge favorability from ruling exports
//! - Serving dashboards over HTTP

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use caseboard_aggregate::{aggregate, compare, favorability};
use caseboard_ingest_sheet::{ingest_path, ingest_rulings, Ingested};
use caseboard_model::{case_number, Classifier};

mod config;
mod report;
mod server;
mod snapshots;

#[derive(Parser)]
#[command(name = "caseboard")]
#[command(author, version, about = "Caseboard: litigation portfolio dashboards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest one export (csv/tsv/json/xlsx) and print its dashboard.
    Ingest {
        /// Spreadsheet export; row 0 is a header.
        input: PathBuf,

        /// Classifier config (JSON). Falls back to `CASEBOARD_CONFIG`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Also write the JSON dashboard to this file.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Resolve case numbers to their regional labor court.
    Resolve {
        #[arg(required = true)]
        numbers: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Compare two snapshots (before → after).
    Compare {
        before: PathBuf,
        after: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Court and judge favorability from a rulings export
    /// (case number, judge, outcome).
    Favorability {
        rulings: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Serve dashboards over HTTP.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    /// Directory of `YYYY-MM.{csv,tsv,json}` exports, one per reference month.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    dir: Option<PathBuf>,

    /// A single export (its `YYYY-MM` stem names the period; else the current month).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Listen address (use `127.0.0.1:0` to auto-pick a free port).
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Rulings export backing `/api/favorability`.
    #[arg(long)]
    rulings: Option<PathBuf>,

    /// If set, write a small JSON file once the server is listening.
    ///
    /// Useful for scripts/tests to learn the chosen port when `--listen ...:0`.
    #[arg(long)]
    ready_file: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            input,
            config,
            json,
            out,
        } => cmd_ingest(&input, config.as_deref(), json, out.as_deref()),
        Commands::Resolve { numbers, json } => cmd_resolve(&numbers, json),
        Commands::Compare {
            before,
            after,
            config,
            json,
        } => cmd_compare(&before, &after, config.as_deref(), json),
        Commands::Favorability { rulings, json } => cmd_favorability(&rulings, json),
        Commands::Serve(args) => cmd_serve(args),
    }
}

fn ingest_one(input: &Path, classifier: &Classifier) -> Result<Ingested> {
    ingest_path(input, classifier).with_context(|| format!("failed to ingest {}", input.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_ingest(input: &Path, config: Option<&Path>, json: bool, out: Option<&Path>) -> Result<()> {
    let classifier = config::load_classifier(config)?;
    let ingested = ingest_one(input, &classifier)?;
    let view = aggregate(&ingested.cases);

    if let Some(out) = out {
        let body = serde_json::json!({
            "source": input.display().to_string(),
            "digest": ingested.digest,
            "dashboard": &view,
            "dataQuality": &ingested.report,
        });
        fs::write(out, serde_json::to_string_pretty(&body)?)
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!(out = %out.display(), "wrote dashboard");
    }

    if json {
        print_json(&view)
    } else {
        println!("{} {}", "Fonte:".bold(), input.display());
        println!();
        report::print_dashboard(&view, &ingested.report);
        Ok(())
    }
}

fn cmd_resolve(numbers: &[String], json: bool) -> Result<()> {
    if json {
        let rows: Vec<serde_json::Value> = numbers
            .iter()
            .map(|n| serde_json::json!({ "number": n, "court": case_number::resolve(n) }))
            .collect();
        return print_json(&rows);
    }
    for n in numbers {
        report::print_court(n, case_number::resolve(n).as_ref());
    }
    Ok(())
}

fn cmd_compare(before: &Path, after: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let classifier = config::load_classifier(config)?;
    let before_view = aggregate(&ingest_one(before, &classifier)?.cases);
    let after_view = aggregate(&ingest_one(after, &classifier)?.cases);
    let delta = compare(&before_view, &after_view);

    if json {
        print_json(&delta)
    } else {
        println!("{} {} → {}", "Comparação:".bold(), before.display(), after.display());
        println!();
        report::print_delta(&delta);
        Ok(())
    }
}

fn cmd_favorability(rulings: &Path, json: bool) -> Result<()> {
    let ingested = ingest_rulings(rulings)
        .with_context(|| format!("failed to read rulings {}", rulings.display()))?;
    let view = favorability(&ingested.rulings);

    if json {
        print_json(&view)
    } else {
        report::print_favorability(&view);
        Ok(())
    }
}

fn cmd_serve(args: ServeArgs) -> Result<()> {
    let source = match (args.dir, args.file) {
        (Some(dir), None) => snapshots::SnapshotSource::Dir(dir),
        (None, Some(file)) => snapshots::SnapshotSource::File(file),
        _ => return Err(anyhow!("serve: pass exactly one of --dir or --file")),
    };
    server::run(server::ServerConfig {
        listen: args.listen,
        source,
        config_path: args.config,
        rulings: args.rulings,
        ready_file: args.ready_file,
    })
}
