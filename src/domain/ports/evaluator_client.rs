//! Evaluator client port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{SignalReport, SignalType};

/// Why an individual evaluator call could not produce a report.
///
/// All variants are recovered locally by the orchestrator via neutral-report
/// substitution; they never surface to qualification callers.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("evaluator timed out after {0}s")]
    Timeout(u64),

    #[error("unusable response body: {0}")]
    MalformedResponse(String),
}

/// Client port for one request/response round to an external signal
/// evaluator.
///
/// The evaluator is a black box; only its contract matters here: a request
/// carrying the raw field for one signal type, and a JSON response that the
/// implementation must interpret into a [`SignalReport`] (substituting the
/// neutral score when the `score` field is absent or the body unparseable).
#[async_trait]
pub trait EvaluatorClient: Send + Sync {
    /// Evaluate one raw field. `value` may be empty or absent; evaluators
    /// are expected to score such inputs low rather than error.
    async fn evaluate(
        &self,
        signal: SignalType,
        value: Option<&str>,
    ) -> Result<SignalReport, EvaluatorError>;
}
