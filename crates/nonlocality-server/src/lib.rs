//! HTTP API for correlator schedules and witness evaluation.
//!
//! Stateless: every request carries its own histograms, and nothing is kept
//! between requests. Errors come back as HTTP 400 with
//! `{"success": false, "error": "..."}`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use nonlocality_core::{
    ChshCurve, CorrelatorError, Family, OutcomeHistogram, Schedule, bounds, chsh_witnesses_flat,
    correlator_schedule, evaluate_packed, schedule, supported_instances, theta_sweep,
};

/// Shared server state.
struct AppState {
    started: Instant,
}

type ApiResponse = (StatusCode, Json<serde_json::Value>);

#[derive(Deserialize)]
struct ScheduleParams {
    family: String,
    qubits: usize,
}

#[derive(Deserialize)]
struct WitnessRequest {
    family: String,
    qubits: usize,
    /// Independent sub-experiments packed per circuit (default 1).
    sub_experiments: Option<usize>,
    histograms: Vec<BTreeMap<String, u64>>,
}

#[derive(Deserialize)]
struct ChshRequest {
    histograms: Vec<BTreeMap<String, u64>>,
    /// Angles for the sweep; evenly spaced over [0, 2π] when omitted.
    thetas: Option<Vec<f64>>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: f64,
}

#[derive(Serialize)]
struct BoundsEntry {
    instance: String,
    family: Family,
    qubits: usize,
    terms: usize,
    classical: f64,
    quantum: f64,
}

#[derive(Serialize)]
struct BoundsResponse {
    instances: Vec<BoundsEntry>,
    total: usize,
}

fn error_response(err: impl std::fmt::Display) -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "error": err.to_string(),
        })),
    )
}

fn ok_response(mut body: serde_json::Value) -> ApiResponse {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    (StatusCode::OK, Json(body))
}

fn parse_histograms(raw: Vec<BTreeMap<String, u64>>) -> Result<Vec<OutcomeHistogram>, CorrelatorError> {
    raw.into_iter().map(OutcomeHistogram::try_from).collect()
}

async fn handle_schedule(Query(params): Query<ScheduleParams>) -> ApiResponse {
    let family = match params.family.parse::<Family>() {
        Ok(f) => f,
        Err(e) => return error_response(e),
    };
    match schedule(family, params.qubits) {
        Ok(Schedule::Correlators(s)) => {
            let terms: Vec<serde_json::Value> = s
                .terms()
                .map(|(basis, coefficient)| {
                    let gates: Vec<Vec<String>> = basis
                        .rotations()
                        .iter()
                        .map(|r| r.gates().iter().map(|g| g.to_string()).collect())
                        .collect();
                    serde_json::json!({
                        "basis": basis,
                        "coefficient": coefficient,
                        "gates": gates,
                    })
                })
                .collect();
            ok_response(serde_json::json!({
                "instance": s.instance.to_string(),
                "family": s.instance.family,
                "qubits": s.instance.qubits,
                "terms": terms,
            }))
        }
        Ok(Schedule::Chsh { settings }) => {
            let settings: Vec<serde_json::Value> = settings
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "setting": s.to_string(),
                        "hadamard": s.hadamards(),
                    })
                })
                .collect();
            ok_response(serde_json::json!({
                "instance": "chsh2",
                "family": Family::Chsh,
                "qubits": 2,
                "settings": settings,
            }))
        }
        Err(e) => error_response(e),
    }
}

async fn handle_bounds() -> Json<BoundsResponse> {
    let instances: Vec<BoundsEntry> = supported_instances()
        .into_iter()
        .filter_map(|inst| {
            let b = bounds(inst).ok()?;
            let terms = match inst.family {
                Family::Chsh => 4,
                _ => correlator_schedule(inst.family, inst.qubits).ok()?.len(),
            };
            Some(BoundsEntry {
                instance: inst.to_string(),
                family: inst.family,
                qubits: inst.qubits,
                terms,
                classical: b.classical,
                quantum: b.quantum,
            })
        })
        .collect();
    let total = instances.len();
    Json(BoundsResponse { instances, total })
}

async fn handle_witness(Json(req): Json<WitnessRequest>) -> ApiResponse {
    let family = match req.family.parse::<Family>() {
        Ok(f) => f,
        Err(e) => return error_response(e),
    };
    let s = match correlator_schedule(family, req.qubits) {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };
    let histograms = match parse_histograms(req.histograms) {
        Ok(h) => h,
        Err(e) => return error_response(e),
    };
    let sub_experiments = req.sub_experiments.unwrap_or(1);
    debug!(
        "witness request: {} with {} histograms, {sub_experiments} sub-experiments",
        s.instance,
        histograms.len()
    );

    match evaluate_packed(&s, &histograms, sub_experiments) {
        Ok(reports) => ok_response(serde_json::json!({
            "instance": s.instance.to_string(),
            "values": reports.iter().map(|r| r.value).collect::<Vec<_>>(),
            "witnesses": reports,
        })),
        Err(e) => error_response(e),
    }
}

async fn handle_chsh(Json(req): Json<ChshRequest>) -> ApiResponse {
    let histograms = match parse_histograms(req.histograms) {
        Ok(h) => h,
        Err(e) => return error_response(e),
    };

    let Some(thetas) = req.thetas else {
        // No angles: report the witnesses alone, in histogram order.
        return match chsh_witnesses_flat(&histograms) {
            Ok((chsh1, chsh2)) => {
                let thetas = theta_sweep(chsh1.len());
                ok_response(serde_json::json!({
                    "thetas": thetas,
                    "chsh1": chsh1,
                    "chsh2": chsh2,
                }))
            }
            Err(e) => error_response(e),
        };
    };

    match ChshCurve::from_flat(&thetas, &histograms) {
        Ok(curve) => {
            let violating = curve.violating_thetas();
            let mut body = serde_json::to_value(&curve).unwrap_or_default();
            if let Some(obj) = body.as_object_mut() {
                obj.insert("violating_thetas".to_string(), serde_json::json!(violating));
            }
            ok_response(body)
        }
        Err(e) => error_response(e),
    }
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: nonlocality_core::VERSION.to_string(),
        uptime_secs: state.started.elapsed().as_secs_f64(),
    })
}

async fn handle_index() -> Json<serde_json::Value> {
    let instances: Vec<String> = supported_instances()
        .iter()
        .map(|i| i.to_string())
        .collect();

    Json(serde_json::json!({
        "name": "Nonlocality Server",
        "version": nonlocality_core::VERSION,
        "instances": instances,
        "endpoints": {
            "/": "This API index",
            "/api/v1/schedule": {
                "method": "GET",
                "description": "Basis strings, coefficients and rotation gates for one instance",
                "params": {
                    "family": "mermin, svetlichny or chsh",
                    "qubits": "Number of parties",
                }
            },
            "/api/v1/bounds": "Classical and quantum bounds for every supported instance",
            "/api/v1/witness": {
                "method": "POST",
                "description": "Evaluate a Mermin or Svetlichny witness",
                "body": "{family, qubits, sub_experiments?, histograms: [{bitstring: count}]}",
            },
            "/api/v1/chsh": {
                "method": "POST",
                "description": "CHSH1/CHSH2 from four histograms per angle (ZZ, ZX, XZ, XX)",
                "body": "{histograms: [{bitstring: count}], thetas?}",
            },
            "/health": "Health check",
        },
        "examples": {
            "schedule": "/api/v1/schedule?family=mermin&qubits=3",
        }
    }))
}

/// Build the axum router.
fn build_router() -> Router {
    let state = Arc::new(AppState {
        started: Instant::now(),
    });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/v1/schedule", get(handle_schedule))
        .route("/api/v1/bounds", get(handle_bounds))
        .route("/api/v1/witness", post(handle_witness))
        .route("/api/v1/chsh", post(handle_chsh))
        .with_state(state)
}

/// Run the HTTP API until the listener fails.
pub async fn run_server(host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router();
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("nonlocality server listening on http://{addr}");
    axum::serve(listener, app).await
}
