/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::client::builder::ClientConfig;
use crate::client::model::{Metadata, RawResponse, SessionId};
use crate::client::request::SubscriptionRequest;
use crate::utils::{QuotecastError, format_response_datetime, is_session_reset};
use chrono::Local;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

#[derive(Serialize)]
struct SessionQuery<'a> {
    version: &'a str,
    #[serde(rename = "userToken")]
    user_token: u64,
}

/// Client for the QuoteCast long-polling feed.
///
/// The client keeps no session state: the caller owns the `SessionId` returned by
/// `get_session_id` and passes it to `fetch_data` and `subscribe`. Each call performs
/// exactly one HTTP round trip; nothing is retried. Cloning is cheap and the clones share
/// the underlying connection pool.
#[derive(Debug, Clone)]
pub struct QuotecastClient {
    http: reqwest::Client,
    base_url: Url,
    version: String,
    referrer: String,
}

impl QuotecastClient {
    /// Creates a client for the production feed with default headers.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, QuotecastError> {
        ClientConfig::default().build()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: Url,
        version: String,
        referrer: String,
    ) -> Self {
        Self {
            http,
            base_url,
            version,
            referrer,
        }
    }

    /// Feed base URL the endpoints are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API version sent with session requests.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Requests a new session id for `user_token`.
    ///
    /// Returns `Ok(None)` when the feed answers without a `sessionId` field, which is not a
    /// transport failure but leaves the caller without a usable session.
    ///
    /// # Errors
    ///
    /// `Transport` when the request cannot be sent or read, `Decode` when the body is not
    /// JSON, `InvalidConfig` or `Encode` when the request URL cannot be built. Every error is
    /// logged before being returned.
    pub async fn get_session_id(
        &self,
        user_token: u64,
    ) -> Result<Option<SessionId>, QuotecastError> {
        let response_dict = match self.send_session_request(user_token).await {
            Ok(value) => value,
            Err(e) => {
                error!("get_session_id: {}", e);
                return Err(e);
            }
        };

        info!("get_session_id:response_dict: {}", response_dict);

        Ok(extract_session_id(&response_dict))
    }

    fn session_url(&self, user_token: u64) -> Result<Url, QuotecastError> {
        let query = SessionQuery {
            version: &self.version,
            user_token,
        };
        let mut url = self.endpoint("request_session")?;
        url.set_query(Some(&serde_urlencoded::to_string(&query)?));
        Ok(url)
    }

    async fn send_session_request(&self, user_token: u64) -> Result<Value, QuotecastError> {
        let url = self.session_url(user_token)?;
        let body = json!({ "referrer": self.referrer }).to_string();
        let response = self.http.post(url).body(body).send().await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Polls the feed once for the updates buffered on `session_id`.
    ///
    /// The body is returned verbatim, without any JSON validation.
    ///
    /// # Errors
    ///
    /// `SessionExpired` when the body is exactly `[{"m":"sr"}]`: the session id must be
    /// dropped and a new one acquired. `Transport` on network failure.
    pub async fn fetch_data(&self, session_id: &SessionId) -> Result<RawResponse, QuotecastError> {
        let start = Instant::now();
        let text = match self.send_poll_request(session_id).await {
            Ok(text) => text,
            Err(e) => {
                error!("fetch_data: {}", e);
                return Err(e);
            }
        };
        let request_duration = start.elapsed();
        let response_datetime = format_response_datetime(&Local::now());

        if is_session_reset(&text) {
            warn!("fetch_data: session {} was reset by the feed", session_id);
            return Err(QuotecastError::SessionExpired);
        }

        let raw_response = RawResponse::new(
            text,
            Metadata::new(response_datetime, request_duration),
        );

        debug!(
            "fetch_data:raw_response.response_json: {}",
            raw_response.response_json()
        );
        debug!(
            "fetch_data:raw_response.response_datetime: {}",
            raw_response.metadata().response_datetime()
        );
        debug!(
            "fetch_data:raw_response.request_duration: {:?}",
            raw_response.metadata().request_duration()
        );

        Ok(raw_response)
    }

    async fn send_poll_request(&self, session_id: &SessionId) -> Result<String, QuotecastError> {
        let url = self.endpoint(session_id.as_str())?;
        let response = self.http.get(url).send().await?;
        Ok(response.text().await?)
    }

    /// Sends the control data of `subscription_request` on `session_id`.
    ///
    /// Returns `true` only when the feed answers with status 200. Any other status, or a
    /// transport failure (logged), yields `false`. Sending the same request twice issues two
    /// identical requests.
    pub async fn subscribe(
        &self,
        subscription_request: &SubscriptionRequest,
        session_id: &SessionId,
    ) -> bool {
        let data = subscription_request.control_data();
        info!("subscribe:payload: {}", data);

        match self.send_control_data(session_id, data).await {
            Ok(status) => status == StatusCode::OK,
            Err(e) => {
                error!("subscribe: {}", e);
                false
            }
        }
    }

    async fn send_control_data(
        &self,
        session_id: &SessionId,
        data: String,
    ) -> Result<StatusCode, QuotecastError> {
        let url = self.endpoint(session_id.as_str())?;
        let response = self.http.post(url).body(data).send().await?;
        let status = response.status();

        match response.text().await {
            Ok(text) => debug!("subscribe:response.text: {}", text),
            Err(e) => debug!("subscribe:response.text unavailable: {}", e),
        }
        debug!("subscribe:response.status_code: {}", status.as_u16());

        Ok(status)
    }

    /// `base_url` with `segment` appended as a single, percent-encoded path segment.
    fn endpoint(&self, segment: &str) -> Result<Url, QuotecastError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QuotecastError::InvalidConfig(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

/// Reads `sessionId` out of the session response. Non string values are kept in their
/// JSON form; `null` counts as absent.
fn extract_session_id(response_dict: &Value) -> Option<SessionId> {
    match response_dict.get("sessionId")? {
        Value::Null => None,
        Value::String(id) => Some(SessionId::new(id.as_str())),
        other => Some(SessionId::new(other.to_string())),
    }
}
