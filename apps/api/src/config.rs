use anyhow::{bail, Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_COURSE_ENROLL_URL: &str = "https://www.udemy.com";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
///
/// The LLM credential is not part of the config; it arrives with each request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub llm_timeout_secs: u64,
    /// Total attempts per analysis call. 1 means a single attempt, no retry.
    pub llm_max_attempts: u32,
    pub max_upload_bytes: usize,
    pub course_enroll_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            llm_timeout_secs: 120,
            llm_max_attempts: 1,
            max_upload_bytes: 10 * 1024 * 1024,
            course_enroll_url: DEFAULT_COURSE_ENROLL_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let temperature = parse_or(&lookup, "OPENAI_TEMPERATURE", defaults.temperature)?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("OPENAI_TEMPERATURE must be between 0.0 and 2.0, got {temperature}");
        }

        let llm_max_attempts = parse_or(&lookup, "LLM_MAX_ATTEMPTS", defaults.llm_max_attempts)?;
        if llm_max_attempts == 0 {
            bail!("LLM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            model: lookup("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature,
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?,
            llm_max_attempts,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            course_enroll_url: lookup("COURSE_ENROLL_URL").unwrap_or(defaults.course_enroll_url),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
