//! Message transport port.

use async_trait::async_trait;

use crate::domain::models::{DeliveryReceipt, FollowUpMessage};

/// Boundary port that actually moves a rendered follow-up message.
///
/// Delivery is best-effort and reported synchronously as a receipt; the
/// call itself is infallible so callers consume outcomes instead of
/// handling transport exceptions.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn deliver(&self, message: &FollowUpMessage) -> DeliveryReceipt;
}
