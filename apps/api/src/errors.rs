use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Application-level error type for the JSON API.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("The uploaded PDF exceeds the {} limit", format_limit(.limit))]
    PayloadTooLarge { limit: usize },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Pipeline(e) => pipeline_status(e),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::Pipeline(PipelineError::MissingInput(_)) => "MISSING_INPUT",
            AppError::Pipeline(PipelineError::Extraction(_)) => "EXTRACTION_ERROR",
            AppError::Pipeline(PipelineError::RemoteFailure(_)) => "REMOTE_FAILURE",
            AppError::Pipeline(PipelineError::MalformedResponse(_)) => "MALFORMED_RESPONSE",
        }
    }
}

/// Renders a byte count the way the upload cap is configured: whole MiB or KiB when exact.
fn format_limit(bytes: &usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    match *bytes {
        b if b >= MIB && b % MIB == 0 => format!("{} MiB", b / MIB),
        b if b >= KIB && b % KIB == 0 => format!("{} KiB", b / KIB),
        b => format!("{b} bytes"),
    }
}

/// Status code shared by the HTML and JSON surfaces.
pub fn pipeline_status(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::MissingInput(_) => StatusCode::BAD_REQUEST,
        PipelineError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::RemoteFailure(_) | PipelineError::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Analysis error: {self}");
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MissingInput;
    use crate::extraction::ExtractionError;

    #[test]
    fn test_status_codes_per_error_class() {
        assert_eq!(
            AppError::from(PipelineError::MissingInput(MissingInput)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(PipelineError::Extraction(ExtractionError::NoText)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(PipelineError::RemoteFailure("timeout".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(PipelineError::MalformedResponse("bad".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_payload_too_large_names_the_limit() {
        let err = AppError::PayloadTooLarge {
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.code(), "PAYLOAD_TOO_LARGE");
        assert_eq!(err.to_string(), "The uploaded PDF exceeds the 10 MiB limit");
    }

    #[test]
    fn test_format_limit_units() {
        assert_eq!(format_limit(&(2 * 1024 * 1024)), "2 MiB");
        assert_eq!(format_limit(&1024), "1 KiB");
        assert_eq!(format_limit(&1500), "1500 bytes");
    }

    #[test]
    fn test_missing_input_message_is_single_warning() {
        let err = AppError::from(PipelineError::MissingInput(MissingInput));
        assert_eq!(
            err.to_string(),
            "Please fill in all fields (API Key, PDF, and Job Description) to proceed."
        );
        assert_eq!(err.code(), "MISSING_INPUT");
    }
}
