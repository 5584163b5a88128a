/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Builder API for creating QuoteCast clients.
//!
//! Every setting has a default matching the production feed, so
//! `ClientConfig::default().build()` is enough to talk to it.

use crate::client::QuotecastClient;
use crate::utils::QuotecastError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Base URL of the production QuoteCast feed.
pub const DEFAULT_BASE_URL: &str = "https://degiro.quotecast.vwdservices.com/CORS";
/// API version sent when requesting a session.
pub const DEFAULT_VERSION: &str = "1.0.20201211";
/// Referrer sent in the body of the session request.
pub const DEFAULT_REFERRER: &str = "https://trader.degiro.nl";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Header set sent with every request unless replaced through `ClientConfig::headers`.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json;charset=UTF-8"),
    );
    headers.insert(
        reqwest::header::ORIGIN,
        HeaderValue::from_static(DEFAULT_REFERRER),
    );
    headers.insert(
        reqwest::header::REFERER,
        HeaderValue::from_static("https://trader.degiro.nl/"),
    );
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(DEFAULT_USER_AGENT),
    );
    headers
}

/// Configuration for a QuoteCast client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Feed base URL; session, poll and control endpoints live below it.
    pub base_url: String,
    /// API version sent with the session request.
    pub version: String,
    /// Referrer sent in the session request body.
    pub referrer: String,
    /// Headers of the default HTTP client. `None` means `default_headers()`.
    pub headers: Option<HeaderMap>,
    /// Skip TLS certificate verification on the default HTTP client.
    pub accept_invalid_certs: bool,
    /// Caller owned HTTP client, shared instead of building a new one.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Creates a new configuration pointing at `base_url`, every other field defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            version: DEFAULT_VERSION.to_string(),
            referrer: DEFAULT_REFERRER.to_string(),
            headers: None,
            accept_invalid_certs: true,
            http_client: None,
        }
    }

    /// Sets the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the referrer sent when requesting a session.
    #[must_use]
    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    /// Replaces the default header set.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Replaces the default header set from string pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when a name or value is not a valid HTTP header.
    pub fn headers_from_pairs<'a, I>(self, pairs: I) -> Result<Self, QuotecastError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| QuotecastError::InvalidConfig(format!("header {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| QuotecastError::InvalidConfig(format!("header {name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(self.headers(headers))
    }

    /// Enables or disables TLS certificate verification on the default client.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Uses an existing HTTP client. Headers and TLS settings of this config are then
    /// ignored: the client is used as configured by its owner.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validates the configuration and creates the client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the base URL cannot carry path segments, or `Transport`
    /// if the default HTTP client cannot be built.
    pub fn build(self) -> Result<QuotecastClient, QuotecastError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            QuotecastError::InvalidConfig(format!("base url {}: {e}", self.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(QuotecastError::InvalidConfig(format!(
                "base url {} cannot be a base",
                self.base_url
            )));
        }

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .default_headers(self.headers.unwrap_or_else(default_headers))
                .danger_accept_invalid_certs(self.accept_invalid_certs)
                .build()?,
        };

        Ok(QuotecastClient::from_parts(
            http,
            base_url,
            self.version,
            self.referrer,
        ))
    }
}
