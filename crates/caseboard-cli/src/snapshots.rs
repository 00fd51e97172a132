//! Dataset snapshots keyed by reference month.
//!
//! A snapshot source is either a single export file or a directory of
//! `YYYY-MM.{csv,tsv,json,xlsx}` files (one per reference month). Each snapshot is
//! ingested and aggregated independently; nothing is carried across months.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use walkdir::WalkDir;

use caseboard_aggregate::{aggregate, DashboardView};
use caseboard_ingest_sheet::{ingest_path, IngestReport, SourceFormat};
use caseboard_model::{Classifier, ReferenceMonth};

#[derive(Debug, Clone)]
pub enum SnapshotSource {
    Dir(PathBuf),
    File(PathBuf),
}

impl SnapshotSource {
    pub fn describe(&self) -> String {
        match self {
            SnapshotSource::Dir(p) => format!("dir:{}", p.display()),
            SnapshotSource::File(p) => format!("file:{}", p.display()),
        }
    }
}

/// One ingested and aggregated reference month.
#[derive(Debug)]
pub struct Snapshot {
    pub period: ReferenceMonth,
    pub path: PathBuf,
    pub digest: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub report: IngestReport,
    pub view: DashboardView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub period: ReferenceMonth,
    pub source: String,
    pub digest: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub loaded: usize,
    pub report: IngestReport,
}

impl Snapshot {
    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            period: self.period,
            source: self.path.display().to_string(),
            digest: self.digest.clone(),
            loaded_at: self.loaded_at,
            loaded: self.report.loaded,
            report: self.report.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: BTreeMap<ReferenceMonth, Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn load(source: &SnapshotSource, classifier: &Classifier) -> Result<Self> {
        let files = match source {
            SnapshotSource::File(path) => vec![(period_for_file(path)?, path.clone())],
            SnapshotSource::Dir(dir) => discover(dir)?,
        };

        let mut snapshots = BTreeMap::new();
        for (period, path) in files {
            let snapshot = load_snapshot(period, &path, classifier)?;
            if snapshots.insert(period, Arc::new(snapshot)).is_some() {
                warn!(period = %period, path = %path.display(), "duplicate reference month; keeping the last file");
            }
        }

        info!(source = %source.describe(), snapshots = snapshots.len(), "snapshot store loaded");
        Ok(Self { snapshots })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn get(&self, period: ReferenceMonth) -> Option<Arc<Snapshot>> {
        self.snapshots.get(&period).cloned()
    }

    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.values().next_back().cloned()
    }

    pub fn infos(&self) -> Vec<SnapshotInfo> {
        self.snapshots.values().map(|s| s.info()).collect()
    }
}

pub fn load_snapshot(period: ReferenceMonth, path: &Path, classifier: &Classifier) -> Result<Snapshot> {
    let ingested = ingest_path(path, classifier)
        .with_context(|| format!("failed to ingest snapshot {period} from {}", path.display()))?;
    let view = aggregate(&ingested.cases);
    Ok(Snapshot {
        period,
        path: path.to_path_buf(),
        digest: ingested.digest,
        loaded_at: Utc::now(),
        report: ingested.report,
        view,
    })
}

/// A single file is labeled by its `YYYY-MM` stem, or the current month.
pub fn period_for_file(path: &Path) -> Result<ReferenceMonth> {
    if let Some(period) = period_from_stem(path) {
        return Ok(period);
    }
    let now = Utc::now();
    ReferenceMonth::new(now.year(), now.month()).context("system clock is outside the supported range")
}

fn period_from_stem(path: &Path) -> Option<ReferenceMonth> {
    path.file_stem()?.to_str()?.parse().ok()
}

fn discover(dir: &Path) -> Result<Vec<(ReferenceMonth, PathBuf)>> {
    if !dir.is_dir() {
        return Err(anyhow!("snapshot directory {} does not exist", dir.display()));
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if SourceFormat::from_path(path).is_err() {
            continue;
        }
        match period_from_stem(path) {
            Some(period) => out.push((period, path.to_path_buf())),
            None => warn!(path = %path.display(), "skipping export without a YYYY-MM file name"),
        }
    }
    Ok(out)
}
