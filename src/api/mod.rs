//! HTTP API Handlers and Routes
//!
//! The REST surface of the gateway, built on Axum.
//!
//! # API Endpoints
//!
//! - `POST /api/tutor` - Route a learner message; always answers with a
//!   [`RoutedResult`](crate::types::RoutedResult) unless validation fails
//! - `POST /api/execute` - Proxy a code submission to the execution sandbox
//! - `GET /api/agents` - List registered agents and their addresses
//! - `GET /health` - Health check

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
