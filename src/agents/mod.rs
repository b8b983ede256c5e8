//! The classification-and-dispatch core.
//!
//! Data flows strictly downward: [`coordinator`] sequences
//! [`classifier`] (decision), [`dispatcher`] (I/O) and [`fallback`]
//! (I/O, conditional), while [`struggle`] runs independently off the same
//! inputs and is merged into the final result. [`registry`] is the only
//! process-wide state and is read-only after startup.

/// Keyword-rule classification to an agent.
pub mod classifier;
/// Request coordination state machine.
pub mod coordinator;
/// Timeout-bound dispatch to downstream services.
pub mod dispatcher;
/// Generic-model fallback and the static degraded message.
pub mod fallback;
/// Static agent-to-service registry.
pub mod registry;
/// Struggle scoring heuristics.
pub mod struggle;

pub use coordinator::RequestCoordinator;
pub use dispatcher::AgentDispatcher;
pub use fallback::{FallbackResponder, DEGRADED_MESSAGE, TUTOR_SYSTEM_PROMPT};
pub use registry::{AgentRegistry, HttpMethod, ServiceDescriptor};
