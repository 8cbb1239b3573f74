mod push;

pub use push::{HttpPushGateway, IPushGateway, InMemoryPushGateway, PushMessage, PushTransportError};
