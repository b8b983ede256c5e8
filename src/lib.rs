//! # LearnFlow Tutor Gateway
//!
//! Routes a learner's natural-language message to one of several
//! specialized tutoring agents, estimates whether the learner is
//! struggling from conversational signals, and guarantees a best-effort
//! response even when the chosen specialist service is unreachable.
//!
//! ## Overview
//!
//! The gateway can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `learnflow-gateway` binary
//! 2. **As a library** - Import the routing core into your own project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use learnflow::agents::classifier;
//! use learnflow::agents::struggle;
//!
//! let agent = classifier::classify("why does my for loop throw an error");
//! let signal = struggle::detect("I'm stuck and confused", &[], 0);
//! assert!(signal.is_struggling);
//! ```
//!
//! ## Request Flow
//!
//! Every `POST /api/tutor` request runs the same single-shot pipeline:
//! classify, dispatch to the classified specialist with a hard timeout,
//! fall back to one generic model call when dispatch fails, and finally
//! degrade to a static apology when that fails too. The struggle signal
//! is computed off the same inputs and merged into the result; the caller
//! always gets exactly one [`types::RoutedResult`].
//!
//! ## Modules
//!
//! - [`agents`] - Classification, struggle scoring, dispatch, fallback
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - Fallback model client
//! - [`types`] - Common types and error handling
//! - [`utils`] - Startup configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// The classification-and-dispatch core.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Fallback model client.
pub mod llm;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{
    AgentDispatcher, AgentRegistry, FallbackResponder, RequestCoordinator, DEGRADED_MESSAGE,
};
pub use llm::{ModelClient, OpenAICompatClient};
pub use types::{AgentId, AppError, Result, RoutedResult, StruggleSignal};
pub use utils::Config;

use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers.
///
/// Everything here is read-only after startup; concurrent requests share
/// nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration.
    pub config: Arc<Config>,
    /// Agent-to-service registry.
    pub registry: Arc<AgentRegistry>,
    /// Shared HTTP connection pool for dispatch and proxying.
    pub http: reqwest::Client,
    /// Fallback model, present only when a credential was configured.
    pub fallback_model: Option<Arc<dyn ModelClient>>,
}

impl AppState {
    /// Wires up process-wide state from configuration.
    pub fn from_config(config: Config) -> Self {
        let http = reqwest::Client::new();

        let fallback_model: Option<Arc<dyn ModelClient>> =
            config.fallback.api_key.as_ref().map(|key| {
                Arc::new(OpenAICompatClient::new(
                    http.clone(),
                    config.fallback.api_base.clone(),
                    key.clone(),
                    config.fallback.model.clone(),
                    Duration::from_millis(config.fallback.timeout_ms),
                )) as Arc<dyn ModelClient>
            });

        let registry = Arc::new(AgentRegistry::from_config(&config));

        Self {
            config: Arc::new(config),
            registry,
            http,
            fallback_model,
        }
    }
}
