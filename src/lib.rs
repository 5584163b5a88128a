//! # QuoteCast Rust Client
//!
//! This project is a Rust client for the Degiro QuoteCast feed, a real-time quote stream
//! delivered over long-polling HTTP. It acquires a session, polls the feed for batched
//! update messages and sends subscribe/unsubscribe control messages for the fields of a
//! product.
//!
//! ## About QuoteCast
//!
//! The feed is driven by a single token, the session id:
//! - `POST {base_url}/request_session?version=..&userToken=..` returns `{"sessionId": ".."}`
//! - `GET {base_url}/{session_id}` returns the updates buffered since the previous poll
//! - `POST {base_url}/{session_id}` with `{"controlData":"req(123.LastPrice);"}` adjusts
//!   the subscriptions of the session
//!
//! The server invalidates a session silently. The only way to notice it is a poll answered
//! with the literal body `[{"m":"sr"}]`, which this crate reports as
//! `QuotecastError::SessionExpired`.
//!
//! ## Features
//!
//! - **Session acquisition**: `QuotecastClient::get_session_id`, distinguishing a missing
//!   `sessionId` (`Ok(None)`) from transport or decoding failures (`Err`).
//! - **Data polling**: `QuotecastClient::fetch_data`, returning the verbatim body together
//!   with the response time and the request duration.
//! - **Subscription control**: `QuotecastClient::subscribe`, encoding labels in order and
//!   reporting whether the feed answered with status 200.
//! - **Session lifecycle**: `SessionState`, a small state machine a polling loop can own.
//!
//! Every operation performs exactly one HTTP round trip. There is no retry, no backoff and
//! no background task: re-acquiring a session after expiry is up to the caller.
//!
//! ## Usage
//!
//! ```ignore
//! use quotecast_rs::client::{Action, QuotecastClient, SessionState, SubscriptionRequest};
//!
//! async fn run(user_token: u64) -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QuotecastClient::new()?;
//!     let mut state = SessionState::NoSession;
//!     let request = SubscriptionRequest::new(
//!         Action::Subscribe,
//!         360148977,
//!         ["LastDate", "LastTime", "LastPrice", "LastVolume"],
//!     );
//!
//!     loop {
//!         let session_id = match state.active_session() {
//!             Some(session_id) => session_id.clone(),
//!             None => {
//!                 state.reset();
//!                 let session_id = client
//!                     .get_session_id(user_token)
//!                     .await?
//!                     .ok_or("no session id returned")?;
//!                 client.subscribe(&request, &session_id).await;
//!                 state.activate(session_id.clone());
//!                 session_id
//!             }
//!         };
//!
//!         match client.fetch_data(&session_id).await {
//!             Ok(raw_response) => println!("{}", raw_response.response_json()),
//!             Err(e) if e.is_session_expired() => state.expire(),
//!             Err(e) => return Err(e.into()),
//!         }
//!     }
//! }
//! ```
//!
//! ## Configuration
//!
//! `ClientConfig` points the client at another endpoint, changes the API version or the
//! referrer, replaces the default header set or injects a shared `reqwest::Client`:
//!
//! ```ignore
//! use quotecast_rs::client::ClientConfig;
//!
//! let client = ClientConfig::new("https://degiro.quotecast.vwdservices.com/CORS")
//!     .version("1.0.20201211")
//!     .headers_from_pairs([("user-agent", "my-app/1.0")])?
//!     .build()?;
//! ```
//!
//! TLS certificate verification is disabled by default on the HTTP client this crate
//! builds, matching what the feed has historically required.

/// Module containing the QuoteCast client and its data records.
///
/// This module provides `QuotecastClient`, its `ClientConfig` builder, the
/// `SubscriptionRequest` control message and the `RawResponse` poll result.
pub mod client;

/// Module containing utility functions and error types.
///
/// This module provides `QuotecastError`, logger setup, the session reset sentinel check
/// and a signal hook for polling loops.
pub mod utils;
