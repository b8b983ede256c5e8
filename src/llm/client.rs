//! Model client abstraction for the fallback path.

use crate::types::Result;
use async_trait::async_trait;

/// Generic conversational model client.
///
/// The gateway only ever needs one call shape: a fixed system instruction
/// plus the learner's raw text as the single user turn. Keeping this a
/// trait lets tests substitute a scripted client.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a completion from a system instruction and one user turn.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
