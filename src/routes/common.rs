//! Service routes: liveness, readiness against the store, build and backend info.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
    store: &'static str,
    questions_per_page: usize,
}

async fn health(State(state): State<AppState>) -> Json<StatusBody> {
    Json(StatusBody {
        status: "ok",
        store: state.store.kind().as_str(),
        database: None,
    })
}

/// 503 when the store does not answer a ping.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    let store = state.store.kind().as_str();
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusBody {
                status: "ok",
                store,
                database: Some("ok"),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, store, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusBody {
                    status: "degraded",
                    store,
                    database: Some("unavailable"),
                }),
            )
        }
    }
}

async fn version(State(state): State<AppState>) -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.kind().as_str(),
        questions_per_page: state.questions_per_page,
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
