mod http;
mod inmemory;

pub use http::HttpPushGateway;
pub use inmemory::{InMemoryPushGateway, PushMessage};

use helsa_notify_domain::PushToken;
use thiserror::Error;

/// External push transport provider. Everything beyond handing over
/// `(token, title, body)` is a black box: the provider either accepts
/// the delivery or it does not.
#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn deliver(
        &self,
        token: &PushToken,
        title: &str,
        body: &str,
    ) -> Result<(), PushTransportError>;
}

#[derive(Error, Debug)]
pub enum PushTransportError {
    /// The provider could not be reached or did not answer within the
    /// configured timeout
    #[error("Push gateway could not be reached: {0}")]
    Unreachable(String),
    #[error("Push gateway rejected the delivery with status code: {0}")]
    Rejected(u16),
}
