/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

mod builder;
mod implementation;
mod model;
mod request;

pub use builder::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_REFERRER, DEFAULT_VERSION, default_headers,
};
pub use implementation::QuotecastClient;
pub use model::{Metadata, RawResponse, SessionId, SessionState};
pub use request::{Action, SubscriptionRequest};
