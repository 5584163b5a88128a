use chrono::{DateTime, Local};
use signal_hook::low_level::signal_name;
use signal_hook::{consts::SIGINT, consts::SIGTERM, iterator::Signals};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

/// Body sent by the feed when the session has been reset server side.
pub const SESSION_RESET_PAYLOAD: &str = r#"[{"m":"sr"}]"#;

/// Format used for `Metadata::response_datetime`.
pub const RESPONSE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns `true` when `body` is exactly the subscription reset payload.
///
/// The comparison is a literal string equality on purpose: the feed is only known to emit
/// this one sentinel, so surrounding whitespace or any other JSON layout does not match.
pub fn is_session_reset(body: &str) -> bool {
    body == SESSION_RESET_PAYLOAD
}

/// Formats a local timestamp the way poll metadata reports it, e.g. `2026-10-19 08:15:02`.
pub fn format_response_datetime(at: &DateTime<Local>) -> String {
    at.format(RESPONSE_DATETIME_FORMAT).to_string()
}

/// Sets up a signal hook for SIGINT and SIGTERM.
///
/// Spawns a blocking task waiting on the signals; the first one received is logged and
/// `shutdown_signal` is notified so a polling loop can stop between two requests.
///
/// # Errors
///
/// Returns the underlying I/O error when the signal iterator cannot be registered.
pub async fn setup_signal_hook(shutdown_signal: Arc<Notify>) -> std::io::Result<()> {
    let signals = &[SIGINT, SIGTERM];
    let mut signals_iterator = Signals::new(signals)?;

    tokio::task::spawn_blocking(move || {
        if let Some(signal) = signals_iterator.forever().next() {
            info!(
                "Received signal: {}",
                signal_name(signal).unwrap_or("UNKNOWN")
            );
            shutdown_signal.notify_one();
        }
    });

    Ok(())
}
