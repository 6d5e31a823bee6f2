// Analysis Requester: prompt construction, the single structured LLM call,
// and validation of the reply against the AnalysisResult contract.
// All LLM calls go through llm_client::StructuredCompletion.

pub mod models;
pub mod prompts;
pub mod requester;

pub use models::{AnalysisRequest, AnalysisResult, MissingInput};
pub use requester::{analyze, AnalysisError};
