// src/providers/mod.rs

use crate::errors::Result;

pub mod openai;

/// A common trait for chat completion providers.
///
/// The grading pipeline always sends a two-message exchange: a system message
/// carrying the rubric prompt and a user message carrying the essay verbatim.
///
/// Note: We're not using async_trait here, so implementers must handle async directly.
pub trait LlmProvider: Send + Sync {
    /// Requests a single completion for a system/user message pair.
    ///
    /// # Arguments
    /// * `model` - The model to use for the completion (e.g., "gpt-4o").
    /// * `system` - The instruction prompt sent with the system role.
    /// * `user` - The essay text sent with the user role.
    ///
    /// # Returns
    /// A `Result` containing a tuple of the completion text (`String`) and the
    /// latency in milliseconds (`u64`).
    fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> impl std::future::Future<Output = Result<(String, u64)>> + Send;
}
