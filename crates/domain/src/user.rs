use crate::shared::entity::{Entity, ID};
use std::str::FromStr;
use thiserror::Error;

/// A `User` as supplied by the external identity service. The
/// scheduler only reads the registered push delivery token, it never
/// mutates user state.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    /// Push delivery token as registered by the identity service.
    /// Stored raw, format validation happens at send time.
    pub device_token: Option<String>,
}

impl User {
    pub fn new(id: ID, device_token: Option<String>) -> Self {
        Self { id, device_token }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

pub const PUSH_TOKEN_MAX_LEN: usize = 4096;

/// A validated push delivery token. The transport provider treats
/// tokens as opaque, so validation is limited to rejecting values that
/// can never be a deliverable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushToken(String);

impl PushToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPushTokenError {
    #[error("Push token is empty")]
    Empty,
    #[error("Push token is longer than {0} characters")]
    TooLong(usize),
    #[error("Push token contains whitespace or non printable characters")]
    MalformedCharacters,
}

impl FromStr for PushToken {
    type Err = InvalidPushTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidPushTokenError::Empty);
        }
        if s.len() > PUSH_TOKEN_MAX_LEN {
            return Err(InvalidPushTokenError::TooLong(PUSH_TOKEN_MAX_LEN));
        }
        if !s.chars().all(|c| c.is_ascii_graphic()) {
            return Err(InvalidPushTokenError::MalformedCharacters);
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_opaque_tokens() {
        assert!("ExponentPushToken[abc123]".parse::<PushToken>().is_ok());
        assert!("fcm:device-token-1".parse::<PushToken>().is_ok());
    }

    #[test]
    fn rejects_undeliverable_tokens() {
        assert_eq!(
            "".parse::<PushToken>(),
            Err(InvalidPushTokenError::Empty)
        );
        assert_eq!(
            "has whitespace".parse::<PushToken>(),
            Err(InvalidPushTokenError::MalformedCharacters)
        );
        assert_eq!(
            "line\nbreak".parse::<PushToken>(),
            Err(InvalidPushTokenError::MalformedCharacters)
        );
        assert_eq!(
            "a".repeat(4097).parse::<PushToken>(),
            Err(InvalidPushTokenError::TooLong(PUSH_TOKEN_MAX_LEN))
        );
    }
}
