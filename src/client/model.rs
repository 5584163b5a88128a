/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Opaque token returned by the session endpoint.
///
/// It authorizes polling and subscription calls until the server resets it; the only way to
/// find out is a poll failing with `QuotecastError::SessionExpired`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an already known session id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the token as sent in request paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Timing information attached to a poll response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    response_datetime: String,
    request_duration: Duration,
}

impl Metadata {
    pub(crate) fn new(response_datetime: String, request_duration: Duration) -> Self {
        Self {
            response_datetime,
            request_duration,
        }
    }

    /// Local time at which the response was read, formatted `YYYY-MM-DD HH:MM:SS`.
    pub fn response_datetime(&self) -> &str {
        &self.response_datetime
    }

    /// Wall-clock time spent on the request.
    pub fn request_duration(&self) -> Duration {
        self.request_duration
    }

    /// Same as `request_duration`, in fractional seconds.
    pub fn request_duration_secs(&self) -> f64 {
        self.request_duration.as_secs_f64()
    }
}

/// Verbatim body of a poll together with its timing metadata.
///
/// The body is not decoded: it usually holds a JSON array of update messages, but
/// interpreting it is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    response_json: String,
    metadata: Metadata,
}

impl RawResponse {
    pub(crate) fn new(response_json: String, metadata: Metadata) -> Self {
        Self {
            response_json,
            metadata,
        }
    }

    /// The response body, exactly as received.
    pub fn response_json(&self) -> &str {
        &self.response_json
    }

    /// Timing information of the poll.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consumes the response and returns the body.
    pub fn into_response_json(self) -> String {
        self.response_json
    }
}

/// Lifecycle of a session id as seen by the caller.
///
/// `NoSession -> Active -> Expired -> NoSession`. An expired id is never reactivated: the
/// only way back to `Active` is a fresh acquisition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No session id has been acquired yet, or the expired one was dropped.
    #[default]
    NoSession,
    /// A session id usable for polling and subscriptions.
    Active(SessionId),
    /// The feed reset this session id.
    Expired(SessionId),
}

impl SessionState {
    /// Returns the session id when the state is `Active`.
    pub fn active_session(&self) -> Option<&SessionId> {
        match self {
            SessionState::Active(session_id) => Some(session_id),
            _ => None,
        }
    }

    /// Moves to `Active` with a freshly acquired id, replacing whatever was there.
    pub fn activate(&mut self, session_id: SessionId) {
        *self = SessionState::Active(session_id);
    }

    /// Marks the active id as expired. Does nothing in any other state.
    pub fn expire(&mut self) {
        let expired = match self {
            SessionState::Active(session_id) => SessionState::Expired(session_id.clone()),
            _ => return,
        };
        *self = expired;
    }

    /// Drops an expired id. Does nothing in any other state.
    pub fn reset(&mut self) {
        if matches!(self, SessionState::Expired(_)) {
            *self = SessionState::NoSession;
        }
    }

    /// Returns `true` when a session id is usable.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display_and_as_str() {
        let session_id = SessionId::new("abc-123");
        assert_eq!(session_id.as_str(), "abc-123");
        assert_eq!(session_id.to_string(), "abc-123");
        assert_eq!(SessionId::from("abc-123"), session_id);
    }

    #[test]
    fn test_raw_response_getters() {
        let metadata = Metadata::new(
            "2026-10-19 10:00:00".to_string(),
            Duration::from_millis(1500),
        );
        let response = RawResponse::new(r#"[{"m":"h"}]"#.to_string(), metadata.clone());

        assert_eq!(response.response_json(), r#"[{"m":"h"}]"#);
        assert_eq!(response.metadata(), &metadata);
        assert_eq!(response.metadata().response_datetime(), "2026-10-19 10:00:00");
        assert_eq!(response.metadata().request_duration_secs(), 1.5);
        assert_eq!(response.into_response_json(), r#"[{"m":"h"}]"#);
    }

    #[test]
    fn test_raw_response_serializes() {
        let metadata = Metadata::new("2026-10-19 10:00:00".to_string(), Duration::from_secs(2));
        let response = RawResponse::new("[]".to_string(), metadata);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["response_json"], "[]");
        assert_eq!(value["metadata"]["response_datetime"], "2026-10-19 10:00:00");
        assert_eq!(value["metadata"]["request_duration"]["secs"], 2);
    }

    mod session_state_tests {
        use super::*;

        #[test]
        fn test_default_is_no_session() {
            let state = SessionState::default();
            assert_eq!(state, SessionState::NoSession);
            assert!(state.active_session().is_none());
        }

        #[test]
        fn test_full_lifecycle() {
            let mut state = SessionState::NoSession;

            state.activate(SessionId::new("first"));
            assert!(state.is_active());
            assert_eq!(state.active_session(), Some(&SessionId::new("first")));

            state.expire();
            assert_eq!(state, SessionState::Expired(SessionId::new("first")));
            assert!(state.active_session().is_none());

            state.reset();
            assert_eq!(state, SessionState::NoSession);

            state.activate(SessionId::new("second"));
            assert_eq!(state.active_session(), Some(&SessionId::new("second")));
        }

        #[test]
        fn test_expire_without_session_is_noop() {
            let mut state = SessionState::NoSession;
            state.expire();
            assert_eq!(state, SessionState::NoSession);
        }

        #[test]
        fn test_reset_active_is_noop() {
            let mut state = SessionState::Active(SessionId::new("live"));
            state.reset();
            assert!(state.is_active());
        }

        #[test]
        fn test_expired_session_is_not_reactivated_by_expire() {
            let mut state = SessionState::Expired(SessionId::new("old"));
            state.expire();
            assert_eq!(state, SessionState::Expired(SessionId::new("old")));
        }
    }
}
