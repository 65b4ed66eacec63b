// src/grader.rs
use crate::providers::LlmProvider;
use crate::rubric::{EvaluationLevel, build_prompt};

/// The grading client: one configured provider plus the model to grade with.
///
/// Generic over the provider so tests can substitute scripted transports.
pub struct EssayGrader<P: LlmProvider> {
    provider: P,
    model: String,
}

impl<P: LlmProvider> EssayGrader<P> {
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Grades one essay and returns the feedback text.
    ///
    /// This never returns an error: any transport or service failure is
    /// converted into a readable "Error grading essay: ..." string, so
    /// callers iterating a batch need no per-item failure branch. The model's
    /// output is returned unmodified; it is opaque to this crate.
    pub async fn grade(&self, essay_text: &str, level: EvaluationLevel) -> String {
        match self.try_grade(essay_text, level).await {
            Ok((feedback, latency_ms)) => {
                log::info!("✅ Essay graded in {}ms", latency_ms);
                feedback
            }
            Err(e) => {
                log::warn!("❌ Grading failed: {}", e);
                format!("Error grading essay: {}", e)
            }
        }
    }

    async fn try_grade(
        &self,
        essay_text: &str,
        level: EvaluationLevel,
    ) -> crate::errors::Result<(String, u64)> {
        let prompt = build_prompt(level);
        self.provider.complete(&self.model, &prompt, essay_text).await
    }
}
