//! Axum route handlers for the Analysis API.

use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::engine::{self, AnalysisResult, AnalyzeRequest};
use crate::analysis::suggestion::StructuredPrompt;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::state::AppState;

/// User-visible note attached when the AI collaborator could not answer.
const SUGGESTIONS_UNAVAILABLE: &str =
    "AI suggestions are unavailable right now; the analysis results are complete without them.";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
    /// Free-text advice from the AI collaborator, when it answered in time.
    pub suggestions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions_note: Option<String>,
}

/// POST /api/v1/analyze
///
/// Runs the deterministic pipeline over raw text. Empty resume text is a
/// valid degenerate input, not a validation error — extraction upstream may
/// legitimately produce it.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    Ok(Json(run_analysis(&state, request).await))
}

/// POST /api/v1/analyze/upload
///
/// Multipart variant: `resume` (PDF file, required) plus optional `jd_text`
/// and `target_role` fields. Extraction failure degrades to empty text.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume_bytes: Option<Bytes> = None;
    let mut jd_text: Option<String> = None;
    let mut target_role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable resume field: {e}")))?;
                resume_bytes = Some(bytes);
            }
            Some("jd_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable jd_text field: {e}")))?;
                jd_text = Some(text);
            }
            Some("target_role") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("unreadable target_role field: {e}"))
                })?;
                target_role = Some(text);
            }
            _ => {}
        }
    }

    let resume_bytes =
        resume_bytes.ok_or_else(|| AppError::Validation("missing 'resume' file field".into()))?;
    let resume_text = extract_text(&resume_bytes);
    info!(
        "extracted {} chars from uploaded resume ({} bytes)",
        resume_text.len(),
        resume_bytes.len()
    );

    let request = AnalyzeRequest {
        resume_text,
        jd_text: jd_text.filter(|t| !t.trim().is_empty()),
        target_role: target_role.filter(|t| !t.trim().is_empty()),
    };
    Ok(Json(run_analysis(&state, request).await))
}

async fn run_analysis(state: &AppState, request: AnalyzeRequest) -> AnalyzeResponse {
    let analysis = engine::analyze(&state.lexicon, &request);

    let (suggestions, suggestions_note) = match &analysis.suggestion_payload {
        Some(payload) => request_suggestions(state, payload).await,
        None => (None, None),
    };

    AnalyzeResponse {
        analysis,
        suggestions,
        suggestions_note,
    }
}

/// Calls the suggestion backend under a bounded timeout. Any failure is
/// absorbed here: the deterministic analysis is returned either way.
async fn request_suggestions(
    state: &AppState,
    payload: &StructuredPrompt,
) -> (Option<String>, Option<String>) {
    let limit = Duration::from_secs(state.config.ai_timeout_secs);
    match tokio::time::timeout(limit, state.suggester.generate(payload)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => (Some(text), None),
        Ok(Ok(_)) => {
            warn!("suggestion backend returned empty text");
            (None, Some(SUGGESTIONS_UNAVAILABLE.to_string()))
        }
        Ok(Err(e)) => {
            warn!("suggestion backend failed: {e}");
            (None, Some(SUGGESTIONS_UNAVAILABLE.to_string()))
        }
        Err(_) => {
            warn!(
                "suggestion call timed out after {}s",
                state.config.ai_timeout_secs
            );
            (None, Some(SUGGESTIONS_UNAVAILABLE.to_string()))
        }
    }
}
