// src/api/handlers/essays.rs
use actix_web::{HttpResponse, Result, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::handlers::ws::{GradeProgress, WsBroker};
use crate::errors::GradeError;
use crate::export;
use crate::grader::EssayGrader;
use crate::ingest;
use crate::providers::openai::OpenAIProvider;
use crate::rubric::EvaluationLevel;
use crate::runner::{self, GradingResult};

#[derive(Clone, Deserialize)]
pub struct GradeEssayRequest {
    pub essay_text: String,
    pub level: EvaluationLevel,
}

#[derive(Serialize)]
pub struct GradeEssayResponse {
    pub id: String,
    pub status: String,
    pub result: GradingResult,
    pub latency_ms: u64,
}

#[derive(Deserialize)]
pub struct BatchParams {
    pub level: EvaluationLevel,
    /// Optional cap on in-flight requests; absent or 1 grades strictly
    /// sequentially.
    #[serde(default)]
    pub concurrency: Option<usize>,
}

#[derive(Serialize)]
pub struct BatchGradeResponse {
    pub batch_id: String,
    pub status: String,
    pub total: usize,
    pub results: Vec<GradingResult>,
    pub completed_at: String,
    pub duration_ms: u64,
}

/// One grader per request, wired from the shared transport client and the
/// process-wide configuration.
fn build_grader(state: &AppState) -> EssayGrader<OpenAIProvider> {
    let openai = state.config.openai.clone();
    let model = openai.model.clone();
    EssayGrader::new(OpenAIProvider::new(state.client.clone(), openai), model)
}

pub async fn grade_essay(
    state: web::Data<AppState>,
    req: web::Json<GradeEssayRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    // Single-essay validation happens before any model call.
    if req.essay_text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": GradeError::EmptyEssay.to_string()
        })));
    }

    let grader = build_grader(&state);
    let start = Instant::now();
    let feedback = grader.grade(&req.essay_text, req.level).await;

    Ok(HttpResponse::Ok().json(GradeEssayResponse {
        id: Uuid::new_v4().to_string(),
        status: "completed".to_string(),
        result: GradingResult::new(&req.essay_text, feedback),
        latency_ms: start.elapsed().as_millis() as u64,
    }))
}

pub async fn grade_batch(
    state: web::Data<AppState>,
    broker: web::Data<WsBroker>,
    params: web::Query<BatchParams>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let batch_id = Uuid::new_v4().to_string();

    let essays = match ingest::essays_from_csv(&body) {
        Ok(essays) => essays,
        Err(e @ GradeError::MissingEssayColumn) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() })));
        }
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": format!("Error processing CSV: {}", e)
            })));
        }
    };

    log::info!("📊 Batch {}: {} essays to process", batch_id, essays.len());

    let grader = build_grader(&state);
    let start = Instant::now();
    let total = essays.len();

    let results = match params.concurrency {
        Some(limit) if limit > 1 => {
            let broker = broker.get_ref().clone();
            let id = batch_id.clone();
            runner::run_batch_concurrent(&grader, &essays, params.level, limit, move |done, total| {
                broker.broadcast(GradeProgress::new(id.clone(), done, total));
            })
            .await
        }
        _ => {
            let broker = broker.get_ref().clone();
            let id = batch_id.clone();
            runner::run_batch(&grader, &essays, params.level, move |done, total| {
                broker.broadcast(GradeProgress::new(id.clone(), done, total));
            })
            .await
        }
    };

    Ok(HttpResponse::Ok().json(BatchGradeResponse {
        batch_id,
        status: "completed".to_string(),
        total,
        results,
        completed_at: chrono::Utc::now().to_rfc3339(),
        duration_ms: start.elapsed().as_millis() as u64,
    }))
}

pub async fn export_results(results: web::Json<Vec<GradingResult>>) -> Result<HttpResponse> {
    match export::export_csv(&results) {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", export::EXPORT_FILENAME),
            ))
            .body(bytes)),
        Err(e) => {
            log::error!("Failed to export feedback CSV: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to export feedback as CSV."
            })))
        }
    }
}

#[derive(Serialize)]
pub struct LevelsResponse {
    pub levels: Vec<String>,
}

pub async fn get_levels() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(LevelsResponse {
        levels: EvaluationLevel::ALL.iter().map(ToString::to_string).collect(),
    }))
}
