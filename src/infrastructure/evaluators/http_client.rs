//! HTTP evaluator client facade.
//!
//! One POST per signal type against the evaluator service's tool routes.
//! The facade owns response interpretation: any body it can parse as a
//! JSON object becomes a report (with the neutral 0.5 substituted for a
//! missing `score`); anything else is an error for the orchestrator to
//! recover from. It deliberately does no retrying of its own.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::models::{SignalReport, SignalType};
use crate::domain::ports::{EvaluatorClient, EvaluatorError};

/// Configuration for the evaluator HTTP client.
#[derive(Debug, Clone)]
pub struct EvaluatorClientConfig {
    /// Base URL of the evaluator service.
    pub base_url: String,
    /// Request timeout; the shared batch budget, inherited per call.
    pub timeout_secs: u64,
}

/// HTTP client for the five external signal evaluators.
///
/// Uses one pooled reqwest client; holds no per-request state.
pub struct HttpEvaluatorClient {
    http_client: ReqwestClient,
    base_url: String,
    timeout_secs: u64,
}

impl HttpEvaluatorClient {
    pub fn new(config: EvaluatorClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Tool route for one signal type.
    fn endpoint(&self, signal: SignalType) -> String {
        let route = match signal {
            SignalType::Email => "email_reputation",
            SignalType::Phone => "phone_check",
            SignalType::Name => "name_check",
            SignalType::Company => "company_enrich",
            SignalType::Message => "intent",
        };
        format!("{}/tools/{route}", self.base_url)
    }
}

#[async_trait]
impl EvaluatorClient for HttpEvaluatorClient {
    async fn evaluate(
        &self,
        signal: SignalType,
        value: Option<&str>,
    ) -> Result<SignalReport, EvaluatorError> {
        // Request body carries one field named after the signal type.
        let mut payload = Map::new();
        payload.insert(
            signal.as_str().to_string(),
            value.map_or(Value::Null, |v| Value::String(v.to_string())),
        );

        let response = self
            .http_client
            .post(self.endpoint(signal))
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    EvaluatorError::Timeout(self.timeout_secs)
                } else {
                    EvaluatorError::Request(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvaluatorError::Request(format!(
                "evaluator returned {status}"
            )));
        }

        // Report-or-default: an unparseable body is still a usable neutral
        // report rather than a failed leg.
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                debug!(signal = %signal, error = %err, "non-JSON evaluator body, using neutral report");
                return Ok(SignalReport::neutral());
            }
        };

        Ok(SignalReport::from_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_follow_tool_routes() {
        let client = HttpEvaluatorClient::new(EvaluatorClientConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout_secs: 40,
        })
        .unwrap();

        assert_eq!(
            client.endpoint(SignalType::Email),
            "http://localhost:9000/tools/email_reputation"
        );
        assert_eq!(
            client.endpoint(SignalType::Company),
            "http://localhost:9000/tools/company_enrich"
        );
        assert_eq!(
            client.endpoint(SignalType::Message),
            "http://localhost:9000/tools/intent"
        );
    }
}
