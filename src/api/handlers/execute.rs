use crate::{
    types::{AppError, ExecuteRequest, Result},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// Crude shape check that a submission is Python and not arbitrary text.
fn looks_like_python(code: &str) -> bool {
    let trimmed = code.trim();
    trimmed.starts_with("import ")
        || code.contains("def ")
        || code.contains("print(")
        || code.contains("for ")
        || code.contains("while ")
        || code.contains("if ")
}

/// Proxy a code submission to the execution sandbox
///
/// Same discipline as agent dispatch: a single timeout-bound call, no
/// retries. The client timeout is twice the requested execution timeout so
/// the sandbox can finish before the proxy gives up.
#[utoipa::path(
    post,
    path = "/api/execute",
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "Execution result from the sandbox"),
        (status = 400, description = "Missing code or invalid format"),
        (status = 503, description = "Execution service unreachable")
    ),
    tag = "execute"
)]
pub async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteRequest>,
) -> Result<axum::response::Response> {
    use axum::response::IntoResponse;

    if payload.code.trim().is_empty() {
        return Err(AppError::InvalidInput("code is required".to_string()));
    }
    if !looks_like_python(&payload.code) {
        return Err(AppError::InvalidInput(
            "Invalid Python code format".to_string(),
        ));
    }

    let body = json!({
        "code": payload.code,
        "user_id": payload.user_id,
        "timeout": payload.timeout,
        "memory_limit": payload.memory_limit,
    });

    let started = Instant::now();
    let response = state
        .http
        .post(&state.config.execution.service_url)
        .json(&body)
        .timeout(Duration::from_secs(payload.timeout * 2))
        .send()
        .await;

    match response {
        Err(err) => {
            tracing::error!(error = %err, "code execution service unreachable");
            let body = json!({
                "output": "",
                "error": "Unable to reach code execution service",
                "execution_time": 0,
                "success": false,
                "timestamp": Utc::now(),
            });
            Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response())
        }
        Ok(upstream) => {
            let status = upstream.status();
            let execution_time = started.elapsed().as_millis() as u64;
            let upstream_body: Value = upstream.json().await.unwrap_or_else(|_| json!({}));

            if !status.is_success() {
                let error = upstream_body
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("Code execution failed")
                    .to_string();
                let body = json!({
                    "output": "",
                    "error": error,
                    "execution_time": 0,
                    "success": false,
                    "timestamp": Utc::now(),
                });
                return Ok((status, Json(body)).into_response());
            }

            let mut body = upstream_body;
            if let Value::Object(map) = &mut body {
                map.insert("executionTime".to_string(), json!(execution_time));
                map.insert("timestamp".to_string(), json!(Utc::now()));
            }
            Ok((StatusCode::OK, Json(body)).into_response())
        }
    }
}
