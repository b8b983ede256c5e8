//! Startup configuration.
//!
//! Everything the gateway needs is read from the environment exactly once
//! at process start and carried in an explicit [`Config`] struct; business
//! logic never does ambient lookups.

use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub agents: AgentEndpoints,
    pub dispatch: DispatchConfig,
    pub fallback: FallbackConfig,
    pub execution: ExecutionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Downstream service endpoint per agent. Defaults match the reference
/// deployment's port layout.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentEndpoints {
    pub triage_url: String,
    pub concepts_url: String,
    pub debug_url: String,
    pub exercise_url: String,
    pub progress_url: String,
    pub code_review_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Per-call bound for specialist dispatch, in milliseconds.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    pub api_base: String,
    /// Credential for the fallback model. Absent means the fallback call
    /// is skipped and failures degrade straight to the static message.
    pub api_key: Option<String>,
    pub model: String,
    /// Independent bound for the fallback call, in milliseconds. Not
    /// extended by however long dispatch took.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    pub service_url: String,
}

impl Config {
    /// Reads configuration from the environment, applying defaults for
    /// everything but the fallback credential.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 3000)?,
            },
            agents: AgentEndpoints {
                triage_url: env::var("TRIAGE_AGENT_URL")
                    .unwrap_or_else(|_| "http://localhost:8000/triage".to_string()),
                concepts_url: env::var("CONCEPTS_AGENT_URL")
                    .unwrap_or_else(|_| "http://localhost:8001/explain".to_string()),
                code_review_url: env::var("CODE_REVIEW_AGENT_URL")
                    .unwrap_or_else(|_| "http://localhost:8002/review".to_string()),
                debug_url: env::var("DEBUG_AGENT_URL")
                    .unwrap_or_else(|_| "http://localhost:8003/debug".to_string()),
                exercise_url: env::var("EXERCISE_AGENT_URL")
                    .unwrap_or_else(|_| "http://localhost:8004/generate".to_string()),
                progress_url: env::var("PROGRESS_AGENT_URL")
                    .unwrap_or_else(|_| "http://localhost:8005/progress".to_string()),
            },
            dispatch: DispatchConfig {
                timeout_ms: parse_var("DISPATCH_TIMEOUT_MS", 10_000)?,
            },
            fallback: FallbackConfig {
                api_base: env::var("FALLBACK_API_BASE")
                    .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
                api_key: env::var("GROQ_API_KEY").ok(),
                model: env::var("FALLBACK_MODEL")
                    .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string()),
                timeout_ms: parse_var("FALLBACK_TIMEOUT_MS", 10_000)?,
            },
            execution: ExecutionConfig {
                service_url: env::var("CODE_EXECUTION_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8006/execute".to_string()),
            },
        })
    }
}

impl Default for Config {
    /// The reference deployment layout, with no fallback credential.
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            agents: AgentEndpoints {
                triage_url: "http://localhost:8000/triage".to_string(),
                concepts_url: "http://localhost:8001/explain".to_string(),
                code_review_url: "http://localhost:8002/review".to_string(),
                debug_url: "http://localhost:8003/debug".to_string(),
                exercise_url: "http://localhost:8004/generate".to_string(),
                progress_url: "http://localhost:8005/progress".to_string(),
            },
            dispatch: DispatchConfig { timeout_ms: 10_000 },
            fallback: FallbackConfig {
                api_base: "https://api.groq.com/openai/v1".to_string(),
                api_key: None,
                model: "llama-3.1-8b-instant".to_string(),
                timeout_ms: 10_000,
            },
            execution: ExecutionConfig {
                service_url: "http://localhost:8006/execute".to_string(),
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("invalid value for {}: {}", name, raw))),
    }
}
