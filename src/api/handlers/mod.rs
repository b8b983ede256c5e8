/// Agent listing and health endpoints.
pub mod agents;
/// Code-execution proxy endpoint.
pub mod execute;
/// Tutor routing endpoint.
pub mod tutor;
