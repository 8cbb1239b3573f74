use super::{IPushGateway, PushTransportError};
use crate::Config;
use helsa_notify_domain::PushToken;
use serde::Serialize;
use std::time::Duration;

/// Delivers push notifications by POSTing to the configured push
/// gateway. The gateway authenticates this service through the
/// `helsa-push-key` header.
pub struct HttpPushGateway {
    client: reqwest::Client,
    url: String,
    key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct PushRequestBody<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
}

impl HttpPushGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.push_gateway_url.clone(),
            key: config.push_gateway_key.clone(),
            timeout: Duration::from_millis(config.push_timeout_millis),
        }
    }
}

#[async_trait::async_trait]
impl IPushGateway for HttpPushGateway {
    async fn deliver(
        &self,
        token: &PushToken,
        title: &str,
        body: &str,
    ) -> Result<(), PushTransportError> {
        let res = self
            .client
            .post(&self.url)
            .header("helsa-push-key", &self.key)
            .timeout(self.timeout)
            .json(&PushRequestBody {
                to: token.as_str(),
                title,
                body,
            })
            .send()
            .await
            .map_err(|err| PushTransportError::Unreachable(err.to_string()))?;

        if !res.status().is_success() {
            return Err(PushTransportError::Rejected(res.status().as_u16()));
        }
        Ok(())
    }
}
