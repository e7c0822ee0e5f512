//! HTTP spell-check proxy
//!
//! Serves `POST /api/spell-check`: takes `{ "text": ... }`, forwards it to the
//! remote speller and answers `{ "corrected": ..., "errorCount": ... }`.
//! Browsers may call it from any origin.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::spell_check::{Corrector, SpellCheckRequest, UpstreamSpeller};

#[derive(Clone)]
pub struct ProxyState {
    pub speller: Arc<UpstreamSpeller>,
}

impl ProxyState {
    pub fn new(speller: UpstreamSpeller) -> Self {
        Self {
            speller: Arc::new(speller),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

/// Build the proxy router
pub fn build_router(state: ProxyState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/spell-check", any(spell_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the proxy on `addr`
pub async fn start_server(addr: &str, state: ProxyState) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Spell-check proxy listening on {} (upstream {})",
        listener.local_addr()?,
        state.speller.url()
    );

    axum::serve(listener, build_router(state)).await
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn spell_check(State(state): State<ProxyState>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None);
    }

    let text = serde_json::from_slice::<SpellCheckRequest>(&body)
        .ok()
        .and_then(|request| request.text)
        .filter(|text| !text.is_empty());
    let Some(text) = text else {
        return error_response(StatusCode::BAD_REQUEST, "Text is required.", None);
    };

    match state.speller.correct(&text).await {
        Ok(correction) => (StatusCode::OK, Json(correction)).into_response(),
        Err(e) => {
            error!("Spell check failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred during spell checking.",
                Some(e.to_string()),
            )
        }
    }
}
