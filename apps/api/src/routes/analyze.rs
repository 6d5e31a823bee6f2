//! Axum route handlers for the analysis page and the JSON API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::AnalysisResult;
use crate::errors::{pipeline_status, AppError};
use crate::pipeline::{run_pipeline, PipelineError, Submission};
use crate::render::html::{render_landing_page, render_notice_page, render_report_page, Notice};
use crate::render::{build_report, ReportView};
use crate::state::AppState;

// Multipart field names posted by the sidebar form.
pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_RESUME: &str = "resume";
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub report: ReportView,
}

/// Maps a multipart failure to an `AppError`, naming the upload cap when it was hit.
fn upload_error(err: MultipartError, limit: usize, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// Reads the form into a `Submission`. Unknown fields are skipped.
async fn read_submission(mut multipart: Multipart, limit: usize) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit, "invalid form upload"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_API_KEY | FIELD_JOB_DESCRIPTION => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| upload_error(e, limit, &format!("invalid field '{name}'")))?;
                if name == FIELD_API_KEY {
                    submission.credential = Some(text);
                } else {
                    submission.job_description = Some(text);
                }
            }
            FIELD_RESUME => {
                let bytes: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(e, limit, "invalid resume upload"))?;
                submission.resume_pdf = Some(bytes);
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// GET /
pub async fn handle_landing() -> Html<String> {
    Html(render_landing_page())
}

/// POST /analyze
///
/// Runs the pipeline and renders the report page. Failures render the same page
/// with a single warning or error banner and no partial report.
pub async fn handle_analyze_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let submission = match read_submission(multipart, state.config.max_upload_bytes).await {
        Ok(submission) => submission,
        Err(e) => {
            return (
                e.status(),
                Html(render_notice_page(Notice::Error, &e.to_string())),
            )
        }
    };

    match run_pipeline(&submission, state.extractor.as_ref(), state.llm.as_ref()).await {
        Ok(output) => {
            let report = build_report(&output.result, &state.render_options());
            (StatusCode::OK, Html(render_report_page(&report)))
        }
        Err(e) => {
            let notice = match &e {
                PipelineError::MissingInput(_) => Notice::Warning,
                _ => Notice::Error,
            };
            (
                pipeline_status(&e),
                Html(render_notice_page(notice, &e.to_string())),
            )
        }
    }
}

/// POST /api/v1/analyze
///
/// Same pipeline, JSON in the response: the raw analysis plus the presentation model.
pub async fn handle_analyze_json(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let submission = read_submission(multipart, state.config.max_upload_bytes).await?;
    let output = run_pipeline(&submission, state.extractor.as_ref(), state.llm.as_ref()).await?;
    let report = build_report(&output.result, &state.render_options());

    Ok(Json(AnalyzeResponse {
        analysis_id: output.analysis_id,
        generated_at: Utc::now(),
        result: output.result,
        report,
    }))
}
