use super::{IPushGateway, PushTransportError};
use helsa_notify_domain::PushToken;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

/// Push gateway that records deliveries instead of transmitting them.
/// Used when testing, the `broken` toggle simulates an unreachable
/// provider.
pub struct InMemoryPushGateway {
    pub sent: Mutex<Vec<PushMessage>>,
    pub broken: AtomicBool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub token: String,
    pub title: String,
    pub body: String,
}

impl InMemoryPushGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            broken: AtomicBool::new(false),
        }
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IPushGateway for InMemoryPushGateway {
    async fn deliver(
        &self,
        token: &PushToken,
        title: &str,
        body: &str,
    ) -> Result<(), PushTransportError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(PushTransportError::Unreachable(
                "Simulated gateway outage".into(),
            ));
        }
        self.sent.lock().unwrap().push(PushMessage {
            token: token.as_str().to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
