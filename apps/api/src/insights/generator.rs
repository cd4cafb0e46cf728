//! Insight generation: prompt the model, then parse, validate, and decode the reply.
//!
//! Bounded retry with linear backoff. Any failure inside an attempt (model call,
//! empty text, malformed JSON, failed validation) is treated the same way.
//! The result is all-or-nothing.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::insights::models::InsightPayload;
use crate::insights::prompts::build_insight_prompt;
use crate::insights::validation::validate_insight;
use crate::llm_client::{strip_json_fences, InsightModel, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Sleep after failed attempt `n` is `n * backoff_step`.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

/// Why a single attempt failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("JSON parse error: {0}")]
    Parse(serde_json::Error),

    #[error("validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("decode error: {0}")]
    Decode(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("all {attempts} attempts failed; last error: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

#[derive(Clone)]
pub struct InsightGenerator {
    model: Arc<dyn InsightModel>,
    policy: RetryPolicy,
}

impl InsightGenerator {
    pub fn new(model: Arc<dyn InsightModel>, policy: RetryPolicy) -> Self {
        Self { model, policy }
    }

    /// Returns the first payload that parses and validates.
    pub async fn generate(&self, industry: &str) -> Result<InsightPayload, InsightError> {
        let prompt = build_insight_prompt(industry);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.attempt(&prompt).await {
                Ok(payload) => {
                    info!("Generated insights for '{industry}' on attempt {attempt}/{max_attempts}");
                    return Ok(payload);
                }
                Err(e) => {
                    warn!("Insight attempt {attempt}/{max_attempts} for '{industry}' failed: {e}");
                    last_error = e.to_string();
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.policy.delay_after(attempt)).await;
            }
        }

        Err(InsightError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }

    async fn attempt(&self, prompt: &str) -> Result<InsightPayload, AttemptError> {
        let text = self.model.generate_text(prompt).await?;
        parse_insight_reply(&text)
    }
}

/// Parses one raw model reply into a validated payload.
pub fn parse_insight_reply(text: &str) -> Result<InsightPayload, AttemptError> {
    if text.trim().is_empty() {
        return Err(AttemptError::Model(LlmError::EmptyContent));
    }
    let value: serde_json::Value =
        serde_json::from_str(strip_json_fences(text)).map_err(AttemptError::Parse)?;

    let report = validate_insight(&value);
    if !report.is_valid {
        return Err(AttemptError::Invalid(report.errors));
    }

    serde_json::from_value(value).map_err(AttemptError::Decode)
}
