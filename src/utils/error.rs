/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use thiserror::Error;

/// Errors surfaced by the QuoteCast client.
///
/// Only `SessionExpired` is a protocol signal: it tells the caller that the current
/// `SessionId` must be discarded and a new one acquired. Every other variant is a local
/// or transport failure and is logged before it is returned.
#[derive(Debug, Error)]
pub enum QuotecastError {
    /// Network-level failure while sending a request or reading its body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session endpoint answered with a body that is not valid JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The feed answered a poll with the subscription reset payload.
    #[error("a new session id is required")]
    SessionExpired,

    /// A subscription action outside of SUBSCRIBE / UNSUBSCRIBE.
    #[error("unknown subscription action: {0}")]
    InvalidAction(String),

    /// The client configuration cannot be used to build requests.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The session request query string could not be encoded.
    #[error("failed to encode query: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl QuotecastError {
    /// Returns `true` when the session id used for the failing call is no longer valid.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_session_expired() {
        assert!(QuotecastError::SessionExpired.is_session_expired());
        assert!(!QuotecastError::InvalidAction("3".to_string()).is_session_expired());
        assert!(!QuotecastError::InvalidConfig("bad".to_string()).is_session_expired());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QuotecastError::SessionExpired.to_string(),
            "a new session id is required"
        );
        assert_eq!(
            QuotecastError::InvalidAction("PAUSE".to_string()).to_string(),
            "unknown subscription action: PAUSE"
        );
    }

    #[test]
    fn test_decode_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: QuotecastError = err.into();
        assert!(matches!(err, QuotecastError::Decode(_)));
    }
}
