/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Polls the QuoteCast feed for one product until SIGINT or SIGTERM.
//!
//! Usage: `QUOTECAST_USER_TOKEN=<token> poll <product_id> [label...]`

use colored::*;
use quotecast_rs::client::{
    Action, QuotecastClient, SessionId, SessionState, SubscriptionRequest,
};
use quotecast_rs::utils::{setup_logger, setup_signal_hook};
use std::env;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};

const DEFAULT_LABELS: [&str; 4] = ["LastDate", "LastTime", "LastPrice", "LastVolume"];

async fn acquire(
    client: &QuotecastClient,
    user_token: u64,
    request: &SubscriptionRequest,
) -> Result<SessionId, Box<dyn Error>> {
    let session_id = client
        .get_session_id(user_token)
        .await?
        .ok_or("the feed did not return a session id")?;

    if !client.subscribe(request, &session_id).await {
        warn!("subscription was not accepted for session {}", session_id);
    }
    Ok(session_id)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logger();

    let user_token: u64 = env::var("QUOTECAST_USER_TOKEN")?.parse()?;
    let mut args = env::args().skip(1);
    let product_id: u64 = args.next().ok_or("missing product id")?.parse()?;
    let labels: Vec<String> = args.collect();
    let request = if labels.is_empty() {
        SubscriptionRequest::new(Action::Subscribe, product_id, DEFAULT_LABELS)
    } else {
        SubscriptionRequest::new(Action::Subscribe, product_id, labels)
    };

    let shutdown_signal = Arc::new(Notify::new());
    setup_signal_hook(shutdown_signal.clone()).await?;

    let client = QuotecastClient::new()?;
    let mut state = SessionState::NoSession;

    loop {
        let session_id = match state.active_session() {
            Some(session_id) => session_id.clone(),
            None => {
                state.reset();
                let session_id = acquire(&client, user_token, &request).await?;
                info!("session {} acquired", session_id);
                state.activate(session_id.clone());
                session_id
            }
        };

        tokio::select! {
            _ = shutdown_signal.notified() => {
                info!("shutting down");
                break;
            }
            result = client.fetch_data(&session_id) => match result {
                Ok(raw_response) => {
                    let metadata = raw_response.metadata();
                    info!(
                        "{} {} {}",
                        metadata.response_datetime().cyan(),
                        format!("{:.3}s", metadata.request_duration_secs()).yellow(),
                        raw_response.response_json()
                    );
                }
                Err(e) if e.is_session_expired() => {
                    warn!("{}", "session expired, acquiring a new one".red());
                    state.expire();
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let release = SubscriptionRequest::new(
        Action::Unsubscribe,
        request.product_id,
        request.label_list.clone(),
    );
    if let Some(session_id) = state.active_session() {
        client.subscribe(&release, session_id).await;
    }

    Ok(())
}
