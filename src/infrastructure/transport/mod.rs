pub mod webhook;

pub use webhook::{WebhookTransport, WebhookTransportConfig};
