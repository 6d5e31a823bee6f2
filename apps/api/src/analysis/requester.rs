//! Analysis Requester — one structured LLM call per `AnalysisRequest`.

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::prompts::{analysis_user_prompt, ANALYSIS_SYSTEM};
use crate::llm_client::{LlmError, StructuredCompletion};

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Network, auth, rate limit, timeout or provider-side failure.
    #[error("{0}")]
    RemoteFailure(#[from] LlmError),

    /// The provider answered, but not with a JSON object of the expected shape.
    #[error("{0}")]
    MalformedResponse(String),
}

/// Sends the request to the LLM and validates the reply.
pub async fn analyze(
    request: &AnalysisRequest,
    llm: &dyn StructuredCompletion,
) -> Result<AnalysisResult, AnalysisError> {
    let user_prompt = analysis_user_prompt(request.resume_text(), request.job_description());

    let reply = llm
        .complete_json(request.credential(), ANALYSIS_SYSTEM, &user_prompt)
        .await?;

    let result = parse_result(&reply).map_err(|reason| {
        warn!("Rejected LLM reply: {reason}");
        AnalysisError::MalformedResponse(reason)
    })?;

    info!(
        match_score = result.match_score,
        hard_gaps = result.missing_hard_skills.len(),
        soft_gaps = result.missing_soft_skills.len(),
        rewrites = result.rewritten_bullets.len(),
        "Analysis completed"
    );
    Ok(result)
}

/// Parses and validates the raw reply text.
pub fn parse_result(reply: &str) -> Result<AnalysisResult, String> {
    let value: serde_json::Value =
        serde_json::from_str(reply).map_err(|e| format!("reply is not valid JSON: {e}"))?;
    if !value.is_object() {
        return Err("reply is not a JSON object".to_string());
    }
    let result: AnalysisResult = serde_json::from_value(value)
        .map_err(|e| format!("reply does not match the expected shape: {e}"))?;
    result.validate()?;
    Ok(result)
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, StructuredCompletion};

    /// Fixed-response provider that counts calls and records the last prompts.
    pub struct FakeLlm {
        reply: Result<String, (u16, String)>,
        pub calls: AtomicUsize,
        pub last_call: Mutex<Option<(String, String, String)>>,
    }

    impl FakeLlm {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_call: Mutex::new(None),
            }
        }

        pub fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                calls: AtomicUsize::new(0),
                last_call: Mutex::new(None),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StructuredCompletion for FakeLlm {
        async fn complete_json(
            &self,
            credential: &str,
            system: &str,
            user: &str,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_call.lock().unwrap() =
                Some((credential.to_string(), system.to_string(), user.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    pub const SCENARIO_REPLY: &str = r#"{
        "match_score": 45,
        "missing_hard_skills": ["Agile", "JIRA"],
        "missing_soft_skills": [],
        "recommended_courses": ["Provider: Agile Fundamentals"],
        "rewritten_bullet_points": [
            {
                "original": "Led a team of 5 engineers",
                "optimized": "Led a cross-functional team of 5 engineers using Agile methodologies"
            }
        ]
    }"#;
}

#[cfg(test)]
mod tests {
    use super::fakes::{FakeLlm, SCENARIO_REPLY};
    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(
            "Led a team of 5 engineers",
            "Seeking a project manager with Agile certification",
            "sk-test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_reply_is_parsed() {
        let llm = FakeLlm::replying(SCENARIO_REPLY);
        let result = analyze(&request(), &llm).await.unwrap();

        assert_eq!(result.match_score, 45);
        assert_eq!(result.missing_hard_skills, vec!["Agile", "JIRA"]);
        assert_eq!(result.recommended_courses[0], "Provider: Agile Fundamentals");
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompts_and_credential_are_forwarded() {
        let llm = FakeLlm::replying(SCENARIO_REPLY);
        analyze(&request(), &llm).await.unwrap();

        let (credential, system, user) = llm.last_call.lock().unwrap().clone().unwrap();
        assert_eq!(credential, "sk-test");
        assert_eq!(system, ANALYSIS_SYSTEM);
        assert_eq!(
            user,
            "RESUME:\nLed a team of 5 engineers\n\nJOB DESCRIPTION:\nSeeking a project manager with Agile certification"
        );
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let llm = FakeLlm::replying("Sure! Here is your analysis: great fit.");
        let err = analyze(&request(), &llm).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_required_key_is_malformed() {
        let llm = FakeLlm::replying(r#"{"match_score": 80}"#);
        let err = analyze(&request(), &llm).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_malformed() {
        let reply = SCENARIO_REPLY.replace("\"match_score\": 45", "\"match_score\": 140");
        let llm = FakeLlm::replying(&reply);
        let err = analyze(&request(), &llm).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_provider_failure_is_remote_failure() {
        let llm = FakeLlm::failing(401, "Incorrect API key provided");
        let err = analyze(&request(), &llm).await.unwrap_err();
        match err {
            AnalysisError::RemoteFailure(cause) => {
                assert!(cause.to_string().contains("Incorrect API key provided"))
            }
            other => panic!("expected RemoteFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_result_rejects_json_array() {
        assert!(parse_result("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_parse_result_rejects_fractional_score() {
        let reply = SCENARIO_REPLY.replace("\"match_score\": 45", "\"match_score\": 45.5");
        assert!(parse_result(&reply).is_err());
    }
}
