use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when any of the three inputs is absent or blank. Reported once, never per field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all fields (API Key, PDF, and Job Description) to proceed.")]
pub struct MissingInput;

/// One analysis trigger. Built fresh per request and never mutated; the only way to
/// obtain one is `AnalysisRequest::new`, which guarantees all fields are non-blank.
#[derive(Clone)]
pub struct AnalysisRequest {
    resume_text: String,
    job_description: String,
    credential: String,
}

impl AnalysisRequest {
    pub fn new(
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, MissingInput> {
        let resume_text = resume_text.into();
        let job_description = job_description.into();
        let credential = credential.into().trim().to_string();

        if resume_text.trim().is_empty()
            || job_description.trim().is_empty()
            || credential.is_empty()
        {
            return Err(MissingInput);
        }

        Ok(Self {
            resume_text,
            job_description,
            credential,
        })
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("resume_chars", &self.resume_text.chars().count())
            .field("job_description_chars", &self.job_description.chars().count())
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// An (original, optimized) résumé line pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenBullet {
    pub original: String,
    pub optimized: String,
}

/// Structured gap analysis returned by the LLM. Wire keys match the prompt contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0 – 100, checked by `validate` after deserialization.
    pub match_score: u8,
    pub missing_hard_skills: Vec<String>,
    pub missing_soft_skills: Vec<String>,
    pub recommended_courses: Vec<String>,
    #[serde(rename = "rewritten_bullet_points")]
    pub rewritten_bullets: Vec<RewrittenBullet>,
}

impl AnalysisResult {
    pub const MAX_SCORE: u8 = 100;

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.match_score > Self::MAX_SCORE {
            return Err(format!(
                "match_score must be between 0 and 100, got {}",
                self.match_score
            ));
        }
        Ok(())
    }
}
