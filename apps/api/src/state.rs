use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::StructuredCompletion;
use crate::render::RenderOptions;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable: nothing here changes between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable LLM backend. Default: `OpenAiClient`.
    pub llm: Arc<dyn StructuredCompletion>,
    /// Pluggable document extractor. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            course_enroll_url: self.config.course_enroll_url.clone(),
        }
    }
}
