//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::core::confirm::AutoConfirm;
use crate::core::errors::TranslateError;
use crate::core::models::{HistoryRecord, TranslationOutcome, TranslationRequest};
use crate::core::orchestrator::Orchestrator;

/// Application state
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Supported languages response
#[derive(Serialize)]
struct LanguagesResponse {
    languages: Vec<LanguageInfo>,
}

#[derive(Serialize)]
struct LanguageInfo {
    display_name: String,
    code: String,
}

/// Translation request body.
///
/// Selections default to the same values the interactive surface starts
/// with: auto-detected source, English target.
#[derive(Deserialize)]
pub struct TranslateApiRequest {
    pub text: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_source() -> String {
    "Auto Detect".to_string()
}

fn default_target() -> String {
    "English".to_string()
}

/// Translation response body
#[derive(Serialize)]
pub struct TranslateApiResponse {
    pub translated_text: String,
    pub target: String,
}

/// History snapshot response
#[derive(Serialize)]
pub struct HistoryResponse {
    pub records: Vec<HistoryRecord>,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, code: &str) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code: Some(code.to_string()),
            },
        }
    }
}

/// Map an orchestrator error to an HTTP status and error body
fn error_response(err: &TranslateError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = if err.is_input_error() {
        (StatusCode::BAD_REQUEST, "invalid_request")
    } else {
        match err {
            TranslateError::Detection { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "detection_failed")
            }
            _ => (StatusCode::BAD_GATEWAY, "translation_failed"),
        }
    };

    (status, Json(ErrorResponse::new(err.to_string(), code)))
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List supported languages
async fn get_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    let languages = state
        .orchestrator
        .catalog()
        .entries()
        .iter()
        .map(|e| LanguageInfo {
            display_name: e.display_name.clone(),
            code: e.code.clone(),
        })
        .collect();

    Json(LanguagesResponse { languages })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateApiRequest>,
) -> Result<Json<TranslateApiResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = TranslationRequest::new(payload.text, payload.source, payload.target.clone());

    match state.orchestrator.translate(&request).await {
        Ok(TranslationOutcome::Translated(translated_text)) => Ok(Json(TranslateApiResponse {
            translated_text,
            target: payload.target,
        })),
        // Unreachable with the auto-approving confirmer, but the outcome
        // contract includes it.
        Ok(TranslationOutcome::Cancelled) => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("translation cancelled", "cancelled")),
        )),
        Err(e) => {
            warn!("translation failed: {}", e);
            Err(error_response(&e))
        }
    }
}

/// History snapshot handler
async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let records = state.orchestrator.history().snapshot().await;
    Json(HistoryResponse { records })
}

/// Clear history handler
async fn clear_history(State(state): State<Arc<AppState>>) -> StatusCode {
    state.orchestrator.clear_history().await;
    StatusCode::NO_CONTENT
}

/// Build the router over shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/languages", get(get_languages))
        .route("/translate", post(translate))
        .route("/history", get(get_history).delete(clear_history))
        .with_state(state)
}

/// Run the HTTP server.
///
/// The HTTP surface is not interactive, so detected languages are accepted
/// without a confirmation round-trip.
pub async fn run_server(host: String, port: u16, config: AppConfig) -> anyhow::Result<()> {
    let orchestrator = Arc::new(Orchestrator::from_config(&config, Arc::new(AutoConfirm))?);
    let state = Arc::new(AppState { orchestrator });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let payload: TranslateApiRequest =
            serde_json::from_value(json!({"text": "Bonjour le monde"})).unwrap();

        assert_eq!(payload.source, "Auto Detect");
        assert_eq!(payload.target, "English");
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::new("source language 'Klingon' is not supported", "invalid_request");

        assert_json_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "error": {
                    "message": "source language 'Klingon' is not supported",
                    "code": "invalid_request"
                }
            })
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let input = TranslateError::EmptyInput;
        assert_eq!(error_response(&input).0, StatusCode::BAD_REQUEST);

        let detection = TranslateError::Detection {
            message: "please enter more text".to_string(),
        };
        assert_eq!(error_response(&detection).0, StatusCode::UNPROCESSABLE_ENTITY);

        let provider = TranslateError::Provider {
            message: "service unavailable".to_string(),
        };
        assert_eq!(error_response(&provider).0, StatusCode::BAD_GATEWAY);
    }
}
