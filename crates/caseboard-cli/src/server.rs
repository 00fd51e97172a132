//! Dashboard HTTP server.
//!
//! Keeps every loaded snapshot in memory and serves the aggregated views as
//! JSON. Aggregation happens at load time, so requests only clone an `Arc`
//! and serialize. `POST /admin/reload` re-reads the source on a blocking
//! thread and swaps the whole state at once.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use url::form_urlencoded;

use caseboard_aggregate::{compare, favorability, DashboardDelta, DashboardView, FavorabilityView};
use caseboard_ingest_sheet::{ingest_rulings, IngestReport, RulingReport};
use caseboard_model::{case_number, ReferenceMonth};

use crate::config::load_classifier;
use crate::snapshots::{SnapshotSource, SnapshotStore};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub source: SnapshotSource,
    pub config_path: Option<PathBuf>,
    pub rulings: Option<PathBuf>,
    pub ready_file: Option<PathBuf>,
}

/// Everything a request can read. Replaced wholesale on reload.
#[derive(Debug)]
pub struct Loaded {
    pub store: SnapshotStore,
    pub favorability: Option<FavorabilityView>,
    pub rulings_report: Option<RulingReport>,
}

struct ServerState {
    config: ServerConfig,
    loaded: RwLock<Arc<Loaded>>,
}

impl ServerState {
    fn current(&self) -> Arc<Loaded> {
        self.loaded.read().clone()
    }
}

pub fn load(config: &ServerConfig) -> Result<Loaded> {
    let classifier = load_classifier(config.config_path.as_deref())?;
    let store = SnapshotStore::load(&config.source, &classifier)?;

    let (favorability_view, rulings_report) = match config.rulings.as_ref() {
        None => (None, None),
        Some(path) => {
            let ingested = ingest_rulings(path)
                .with_context(|| format!("failed to load rulings from {}", path.display()))?;
            let view = (!ingested.rulings.is_empty()).then(|| favorability(&ingested.rulings));
            (view, Some(ingested.report))
        }
    };

    Ok(Loaded {
        store,
        favorability: favorability_view,
        rulings_report,
    })
}

pub fn run(config: ServerConfig) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to initialize tokio runtime: {e}"))?;

    rt.block_on(async move { serve_async(config).await })
}

async fn serve_async(config: ServerConfig) -> Result<()> {
    let initial = tokio::task::spawn_blocking({
        let config = config.clone();
        move || load(&config)
    })
    .await
    .map_err(|e| anyhow!("serve: failed to join loader task: {e}"))??;

    let state = Arc::new(ServerState {
        config: config.clone(),
        loaded: RwLock::new(Arc::new(initial)),
    });

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("serve: failed to bind {}", config.listen))?;
    let bound = listener
        .local_addr()
        .context("serve: failed to read bound addr")?;

    info!(addr = %bound, source = %config.source.describe(), "listening");
    if let Some(path) = config.ready_file.as_ref() {
        if let Err(e) = write_ready_file(path, bound) {
            warn!(path = %path.display(), error = %e, "failed to write ready file");
        }
    }

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted.context("serve: accept failed")?,
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
        };
        let io = TokioIo::new(stream);
        let state = state.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| handle_request(req, state.clone()));
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!(peer = %peer, error = %e, "connection error");
            }
        });
    }
}

/// Written atomically so a poller never sees a half-written file.
fn write_ready_file(path: &std::path::Path, bound: SocketAddr) -> std::io::Result<()> {
    let payload = serde_json::json!({
        "version": "caseboard_server_ready_v1",
        "addr": bound.to_string(),
        "pid": std::process::id(),
    });
    let body = serde_json::to_vec_pretty(&payload).map_err(std::io::Error::from)?;
    let tmp = path.with_extension("tmp");
    path.parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| std::fs::write(&tmp, body))
        .and_then(|()| std::fs::rename(&tmp, path))
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = parse_query_params(req.uri().query());

    let resp = match (method.clone(), path.as_str()) {
        (Method::GET, "/healthz") => text_response(StatusCode::OK, "ok\n"),
        (Method::POST, "/admin/reload") => match reload_now(&state).await {
            Ok(v) => json_response(StatusCode::OK, &v),
            Err(e) => {
                error!(error = %format!("{e:#}"), "reload failed; keeping previous snapshots");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{e:#}"))
            }
        },
        (Method::GET, _) => {
            let loaded = state.current();
            match route_get(&path, &query, &loaded, &state.config) {
                Ok(v) => json_response(StatusCode::OK, &v),
                Err(ApiError(status, msg)) => json_error(status, &msg),
            }
        }
        _ => json_error(StatusCode::NOT_FOUND, &format!("no route for {method} {path}")),
    };

    debug!(method = %method, path = %path, status = resp.status().as_u16(), "request");
    Ok(resp)
}

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl ApiError {
    fn bad_request(msg: impl Into<String>) -> Self {
        Self(StatusCode::BAD_REQUEST, msg.into())
    }

    fn not_found(msg: impl Into<String>) -> Self {
        Self(StatusCode::NOT_FOUND, msg.into())
    }
}

type ApiResult = std::result::Result<serde_json::Value, ApiError>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse<'a> {
    period: ReferenceMonth,
    #[serde(flatten)]
    view: &'a DashboardView,
    data_quality: &'a IngestReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse<'a> {
    from: ReferenceMonth,
    to: ReferenceMonth,
    #[serde(flatten)]
    delta: &'a DashboardDelta,
}

/// All read-only routes. Pure over the loaded state.
pub fn route_get(
    path: &str,
    query: &HashMap<String, String>,
    loaded: &Loaded,
    config: &ServerConfig,
) -> ApiResult {
    match path {
        "/status" => Ok(status_payload(loaded, config)),
        "/api/dashboard" => dashboard(query, loaded),
        "/api/compare" => compare_periods(query, loaded),
        "/api/court" => court(query),
        "/api/favorability" => match loaded.favorability.as_ref() {
            Some(view) => to_value(view),
            None => Err(ApiError::not_found("no judge rulings loaded")),
        },
        _ => Err(ApiError::not_found(format!("no route for GET {path}"))),
    }
}

fn to_value<T: Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value)
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("serialize: {e}")))
}

fn period_param(query: &HashMap<String, String>, key: &str) -> std::result::Result<Option<ReferenceMonth>, ApiError> {
    match query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ApiError::bad_request(format!("invalid `{key}`: {e}"))),
    }
}

fn dashboard(query: &HashMap<String, String>, loaded: &Loaded) -> ApiResult {
    let snapshot = match period_param(query, "period")? {
        Some(period) => loaded
            .store
            .get(period)
            .ok_or_else(|| ApiError::not_found(format!("no snapshot for period {period}")))?,
        None => loaded
            .store
            .latest()
            .ok_or_else(|| ApiError::not_found("no snapshots loaded"))?,
    };
    to_value(&DashboardResponse {
        period: snapshot.period,
        view: &snapshot.view,
        data_quality: &snapshot.report,
    })
}

fn compare_periods(query: &HashMap<String, String>, loaded: &Loaded) -> ApiResult {
    let from = period_param(query, "from")?.ok_or_else(|| ApiError::bad_request("missing `from`"))?;
    let to = period_param(query, "to")?.ok_or_else(|| ApiError::bad_request("missing `to`"))?;
    let lookup = |p: ReferenceMonth| {
        loaded
            .store
            .get(p)
            .ok_or_else(|| ApiError::not_found(format!("no snapshot for period {p}")))
    };
    let (before, after) = (lookup(from)?, lookup(to)?);
    let delta = compare(&before.view, &after.view);
    to_value(&CompareResponse {
        from,
        to,
        delta: &delta,
    })
}

fn court(query: &HashMap<String, String>) -> ApiResult {
    let number = query
        .get("number")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing `number`"))?;
    match case_number::resolve(number) {
        Some(info) => to_value(&info),
        None => Ok(serde_json::json!({
            "courtCode": null,
            "courtName": null,
            "state": null,
            "stateAbbrev": null,
            "region": null,
        })),
    }
}

fn status_payload(loaded: &Loaded, config: &ServerConfig) -> serde_json::Value {
    serde_json::json!({
        "source": config.source.describe(),
        "snapshots": loaded.store.infos(),
        "latest": loaded.store.latest().map(|s| s.period),
        "rulings": loaded.rulings_report,
    })
}

async fn reload_now(state: &Arc<ServerState>) -> Result<serde_json::Value> {
    let loaded = tokio::task::spawn_blocking({
        let config = state.config.clone();
        move || load(&config)
    })
    .await
    .map_err(|e| anyhow!("reload task join failed: {e}"))??;

    let loaded = Arc::new(loaded);
    *state.loaded.write() = loaded.clone();
    info!(snapshots = loaded.store.len(), "reloaded");

    Ok(status_payload(&loaded, &state.config))
}

pub fn parse_query_params(query: Option<&str>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let Some(q) = query else {
        return out;
    };
    for (k, v) in form_urlencoded::parse(q.as_bytes()) {
        out.insert(k.into_owned(), v.into_owned());
    }
    out
}

fn text_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(b"internal error"))))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{\"error\":\"serialize\"}".to_vec());
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(b"{\"error\":\"internal\"}"))))
}

fn json_error(status: StatusCode, msg: &str) -> Response<Full<Bytes>> {
    let v = serde_json::json!({ "error": msg });
    json_response(status, &v)
}
