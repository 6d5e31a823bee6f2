//! Collector → Extractor → Requester, strictly in that order.
//!
//! One `run_pipeline` call is one user trigger. Any error ends the run; nothing
//! partial is returned.

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::{analyze, AnalysisError, AnalysisRequest, AnalysisResult, MissingInput};
use crate::extraction::{ExtractionError, TextExtractor};
use crate::llm_client::StructuredCompletion;

/// Raw form input as submitted. Any field may be absent.
#[derive(Default)]
pub struct Submission {
    pub credential: Option<String>,
    pub resume_pdf: Option<Bytes>,
    pub job_description: Option<String>,
}

impl Submission {
    /// Input Collector: all three present and non-blank, or a single `MissingInput`.
    fn collect(&self) -> Result<(&str, &Bytes, &str), MissingInput> {
        let credential = non_blank(self.credential.as_deref()).ok_or(MissingInput)?;
        let resume_pdf = self
            .resume_pdf
            .as_ref()
            .filter(|b| !b.is_empty())
            .ok_or(MissingInput)?;
        let job_description = non_blank(self.job_description.as_deref()).ok_or(MissingInput)?;
        Ok((credential, resume_pdf, job_description))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    MissingInput(#[from] MissingInput),

    #[error("Error reading PDF: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Error calling the analysis service: {0}")]
    RemoteFailure(String),

    #[error("The analysis service returned an unexpected response: {0}")]
    MalformedResponse(String),
}

impl From<AnalysisError> for PipelineError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::RemoteFailure(cause) => PipelineError::RemoteFailure(cause.to_string()),
            AnalysisError::MalformedResponse(reason) => PipelineError::MalformedResponse(reason),
        }
    }
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub analysis_id: Uuid,
    pub result: AnalysisResult,
}

pub async fn run_pipeline(
    submission: &Submission,
    extractor: &dyn TextExtractor,
    llm: &dyn StructuredCompletion,
) -> Result<PipelineOutput, PipelineError> {
    let analysis_id = Uuid::new_v4();
    let span = info_span!("analysis", %analysis_id);

    async move {
        let (credential, resume_pdf, job_description) = submission.collect().map_err(|e| {
            warn!("Rejected submission with missing input");
            e
        })?;

        info!(pdf_bytes = resume_pdf.len(), "Extracting resume text");
        let resume_text = extractor.extract(resume_pdf).await.map_err(|e| {
            warn!("Resume extraction failed: {e}");
            e
        })?;

        let request = AnalysisRequest::new(resume_text, job_description, credential)?;
        info!(?request, "Requesting analysis");

        let result = analyze(&request, llm).await.map_err(|e| {
            warn!("Analysis failed: {e}");
            PipelineError::from(e)
        })?;

        Ok::<_, PipelineError>(PipelineOutput {
            analysis_id,
            result,
        })
    }
    .instrument(span)
    .await
}
