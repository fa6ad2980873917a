//! Webhook message transport.
//!
//! Posts rendered follow-up messages to a configured webhook. Delivery is
//! best-effort: every path resolves to a receipt, never an error, so the
//! dispatcher's status update cannot be dragged down by transport trouble.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::domain::models::{DeliveryReceipt, FollowUpMessage};
use crate::domain::ports::MessageTransport;

/// Configuration for the webhook transport.
#[derive(Debug, Clone)]
pub struct WebhookTransportConfig {
    /// Target URL; empty disables delivery (messages are skipped).
    pub webhook_url: String,
    /// Per-delivery timeout.
    pub timeout_secs: u64,
}

pub struct WebhookTransport {
    http_client: ReqwestClient,
    webhook_url: String,
}

impl WebhookTransport {
    pub fn new(config: WebhookTransportConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            webhook_url: config.webhook_url,
        })
    }
}

#[async_trait]
impl MessageTransport for WebhookTransport {
    async fn deliver(&self, message: &FollowUpMessage) -> DeliveryReceipt {
        if self.webhook_url.is_empty() {
            return DeliveryReceipt::Skipped {
                reason: "transport not configured".to_string(),
            };
        }

        let result = self
            .http_client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(lead_id = message.lead_id, to = %message.to, "follow-up delivered");
                DeliveryReceipt::Sent {
                    to: message.to.clone(),
                }
            }
            Ok(response) => DeliveryReceipt::Failed {
                reason: format!("webhook returned {}", response.status()),
            },
            Err(err) => DeliveryReceipt::Failed {
                reason: err.to_string(),
            },
        }
    }
}
