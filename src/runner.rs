// src/runner.rs
use crate::grader::EssayGrader;
use crate::providers::LlmProvider;
use crate::rubric::EvaluationLevel;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Number of characters of essay text kept in the exported excerpt.
pub const EXCERPT_CHARS: usize = 30;

/// One graded essay: a short label for the row plus the model's feedback.
///
/// Created once per processed essay, appended in processing order, never
/// mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GradingResult {
    pub excerpt: String,
    pub feedback: String,
}

impl GradingResult {
    pub fn new(essay_text: &str, feedback: String) -> Self {
        Self {
            excerpt: excerpt_of(essay_text),
            feedback,
        }
    }
}

/// First `EXCERPT_CHARS` characters of the essay plus an ellipsis marker.
///
/// The marker is appended unconditionally, also for texts shorter than the
/// cutoff. Truncation counts characters, not bytes, so multi-byte text never
/// splits a code point.
pub fn excerpt_of(text: &str) -> String {
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head)
}

/// Grades a batch of essays strictly sequentially, in input order.
///
/// `progress` is invoked with `(completed, total)` after each essay. Because
/// the grader converts every failure into feedback text, a bad row degrades
/// to an error-annotated cell and never drops or blocks subsequent rows.
pub async fn run_batch<P, F>(
    grader: &EssayGrader<P>,
    essays: &[String],
    level: EvaluationLevel,
    mut progress: F,
) -> Vec<GradingResult>
where
    P: LlmProvider,
    F: FnMut(usize, usize),
{
    let batch_start = Instant::now();
    let total = essays.len();
    let mut results = Vec::with_capacity(total);

    for (idx, essay) in essays.iter().enumerate() {
        let feedback = grader.grade(essay, level).await;
        results.push(GradingResult::new(essay, feedback));
        progress(idx + 1, total);
    }

    log::info!(
        "📊 Batch of {} graded in {}ms",
        total,
        batch_start.elapsed().as_millis()
    );

    results
}

/// Bounded-concurrency variant of [`run_batch`].
///
/// At most `limit` completion requests are in flight at once. Results are
/// collected by input index, so output order always matches input order
/// regardless of completion order. `progress` fires once per completed essay;
/// counts are monotonic but not tied to input positions.
pub async fn run_batch_concurrent<P, F>(
    grader: &EssayGrader<P>,
    essays: &[String],
    level: EvaluationLevel,
    limit: usize,
    progress: F,
) -> Vec<GradingResult>
where
    P: LlmProvider,
    F: Fn(usize, usize) + Sync,
{
    let batch_start = Instant::now();
    let total = essays.len();
    let completed = AtomicUsize::new(0);

    let results: Vec<GradingResult> = stream::iter(essays)
        .map(|essay| {
            let completed = &completed;
            let progress = &progress;
            async move {
                let feedback = grader.grade(essay, level).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(done, total);
                GradingResult::new(essay, feedback)
            }
        })
        .buffered(limit.max(1))
        .collect()
        .await;

    log::info!(
        "📊 Batch of {} graded concurrently (limit {}) in {}ms",
        total,
        limit.max(1),
        batch_start.elapsed().as_millis()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{GradeError, Result};
    use std::time::Duration;

    /// Echoes the essay back; fails whenever the essay contains `FAIL`.
    struct EchoProvider;

    impl LlmProvider for EchoProvider {
        async fn complete(&self, _model: &str, _system: &str, user: &str) -> Result<(String, u64)> {
            if user.contains("FAIL") {
                return Err(GradeError::ApiError {
                    status: 500,
                    body: "upstream exploded".to_string(),
                });
            }
            Ok((format!("graded: {}", user), 1))
        }
    }

    /// Sleeps briefly for the first essay so later items finish first.
    struct SlowFirstProvider;

    impl LlmProvider for SlowFirstProvider {
        async fn complete(&self, _model: &str, _system: &str, user: &str) -> Result<(String, u64)> {
            if user == "first" {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok((format!("graded: {}", user), 1))
        }
    }

    fn grader<P: LlmProvider>(provider: P) -> EssayGrader<P> {
        EssayGrader::new(provider, "gpt-4o")
    }

    #[tokio::test]
    async fn one_bad_row_never_drops_subsequent_rows() {
        let essays = vec![
            "alpha essay".to_string(),
            "FAIL essay".to_string(),
            "gamma essay".to_string(),
        ];
        let results = run_batch(&grader(EchoProvider), &essays, EvaluationLevel::College, |_, _| {}).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].feedback, "graded: alpha essay");
        assert!(results[1].feedback.contains("Error grading essay:"));
        assert!(results[1].feedback.contains("upstream exploded"));
        assert_eq!(results[2].feedback, "graded: gamma essay");
    }

    #[tokio::test]
    async fn progress_fires_once_per_essay_in_order() {
        let essays = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut calls = Vec::new();
        run_batch(&grader(EchoProvider), &essays, EvaluationLevel::HighSchool, |done, total| {
            calls.push((done, total));
        })
        .await;

        assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_results_and_no_progress() {
        let mut calls = 0;
        let results = run_batch(&grader(EchoProvider), &[], EvaluationLevel::Professional, |_, _| {
            calls += 1;
        })
        .await;

        assert!(results.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn concurrent_batch_preserves_input_order() {
        let essays = vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];
        let results =
            run_batch_concurrent(&grader(SlowFirstProvider), &essays, EvaluationLevel::College, 3, |_, _| {})
                .await;

        let feedback: Vec<&str> = results.iter().map(|r| r.feedback.as_str()).collect();
        assert_eq!(feedback, vec!["graded: first", "graded: second", "graded: third"]);
    }

    #[tokio::test]
    async fn concurrent_batch_tolerates_failures() {
        let essays = vec!["ok".to_string(), "FAIL".to_string(), "also ok".to_string()];
        let results =
            run_batch_concurrent(&grader(EchoProvider), &essays, EvaluationLevel::College, 2, |_, _| {})
                .await;

        assert_eq!(results.len(), 3);
        assert!(results[1].feedback.contains("Error grading essay:"));
        assert_eq!(results[2].feedback, "graded: also ok");
    }

    #[test]
    fn excerpt_truncates_long_text_at_thirty_chars() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running.";
        assert_eq!(excerpt_of(text), "The quick brown fox jumps over...");
    }

    #[test]
    fn excerpt_at_exactly_thirty_chars_keeps_whole_text() {
        let text = "a".repeat(30);
        assert_eq!(excerpt_of(&text), format!("{}...", text));
    }

    #[test]
    fn excerpt_of_short_text_still_gets_marker() {
        assert_eq!(excerpt_of("short"), "short...");
        assert_eq!(excerpt_of(""), "...");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(40);
        let expected = format!("{}...", "é".repeat(30));
        assert_eq!(excerpt_of(&text), expected);
    }
}
