/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

/// Module containing the error type used throughout the library.
///
/// This module provides `QuotecastError`, which distinguishes transport failures from the
/// session reset signal that requires acquiring a new session id.
pub mod error;
mod util;

mod logger;

pub use error::QuotecastError;
pub use logger::{setup_logger, setup_logger_with_level};
pub use util::{
    RESPONSE_DATETIME_FORMAT, SESSION_RESET_PAYLOAD, format_response_datetime, is_session_reset,
    setup_signal_hook,
};
