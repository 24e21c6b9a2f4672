//! Axum transport shell for the moderation pipeline.
//!
//! One router carries the whole HTTP surface: the moderation route, a
//! liveness endpoint, a JSON 404 fallback, and a permissive CORS layer
//! that answers preflight requests. Request validation happens here, at
//! the transport boundary; the pipeline itself never rejects input.
#![deny(unsafe_code)]

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use modgate_core::{ModerationCapability, ModerationRequest};

/// Service identifier reported by the liveness endpoint.
pub const SERVICE_NAME: &str = "modgate";

#[derive(Clone)]
struct AppState {
    backend: Arc<dyn ModerationCapability>,
}

/// Build the complete application router.
pub fn app(backend: Arc<dyn ModerationCapability>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/moderation/check", post(moderation_check))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(cors)
        .with_state(AppState { backend })
}

async fn moderation_check(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = payload else {
        return validation_failure(vec![json!({
            "path": [],
            "message": "请求体必须为 JSON 对象"
        })]);
    };

    let request = match validate_request(&body) {
        Ok(request) => request,
        Err(issues) => return validation_failure(issues),
    };

    match state.backend.check(&request).await {
        Ok(verdict) => {
            tracing::info!(has_violation = verdict.has_violation, "moderation check completed");
            (StatusCode::OK, Json(verdict)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "moderation check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": err.to_string()})),
            )
                .into_response()
        }
    }
}

/// Shape checks on the inbound body. The text must be a non-empty string
/// after trimming; custom banned terms, when present, must each be a
/// non-empty string. Validation failures never reach the model call.
fn validate_request(body: &Value) -> Result<ModerationRequest, Vec<Value>> {
    let mut issues = Vec::new();

    let text = match body.get("text") {
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                issues.push(json!({"path": ["text"], "message": "text 不能为空"}));
            }
            text.clone()
        }
        _ => {
            issues.push(json!({"path": ["text"], "message": "text 必须为非空字符串"}));
            String::new()
        }
    };

    let custom_banned = match body.get("customBanned") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let mut terms = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(term) if !term.is_empty() => terms.push(term.to_string()),
                    _ => issues.push(json!({
                        "path": ["customBanned", index],
                        "message": "违禁词必须为非空字符串"
                    })),
                }
            }
            Some(terms)
        }
        Some(_) => {
            issues.push(json!({
                "path": ["customBanned"],
                "message": "customBanned 必须为字符串数组"
            }));
            None
        }
    };

    if !issues.is_empty() {
        return Err(issues);
    }

    Ok(ModerationRequest {
        text,
        custom_banned,
    })
}

fn validation_failure(issues: Vec<Value>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "参数校验失败", "issues": issues})),
    )
        .into_response()
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response()
}
