//! Async client for the reply generation service.

use crate::error::{Failure, server_message};
use crate::models::{GenerateRequest, Tone};
use crate::{Error, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};

/// Async client for the email reply generation endpoint.
///
/// Use [`Client::new`] for defaults, [`Client::from_env`] to honour the
/// `REPLY_API_URL` / `REPLY_API_TIMEOUT_MS` environment variables, or
/// [`Client::builder`] for custom settings like proxies, timeouts, and a
/// custom user agent.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    endpoint: String,
    timeout: Duration,
    proxy: Option<String>,
    user_agent: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client pointed at `http://localhost:8080`.
    ///
    /// # Examples
    /// ```no_run
    /// # use reply_generator_client::Client;
    /// # fn main() -> Result<(), reply_generator_client::Error> {
    /// let client = Client::new()?;
    /// assert_eq!(client.base_url(), "http://localhost:8080");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Create a client configured from the process environment.
    ///
    /// See [`ClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// Base URL of the service, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Total per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Ask the service for a reply to `email_content` in the given tone.
    ///
    /// The content is trimmed before sending; empty content is rejected with
    /// [`Error::EmptyContent`] without touching the network. Exactly one
    /// attempt is made.
    ///
    /// # Returns
    /// The response body as text. A JSON string body is unwrapped, any other
    /// JSON value is serialized, and a non-JSON body is returned verbatim.
    ///
    /// # Examples
    /// ```no_run
    /// # use reply_generator_client::{Client, Tone};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), reply_generator_client::Error> {
    /// let client = Client::new()?;
    /// let reply = client
    ///     .generate_reply("Hi, are you available tomorrow?", Some(Tone::Friendly))
    ///     .await?;
    /// println!("{reply}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate_reply(&self, email_content: &str, tone: Option<Tone>) -> Result<String> {
        let content = email_content.trim();
        if content.is_empty() {
            return Err(Error::EmptyContent);
        }

        let body = GenerateRequest::new(content, tone);
        debug!(
            endpoint = %self.endpoint,
            tone = body.tone,
            chars = content.chars().count(),
            "requesting reply"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers())
            .json(&body)
            .send()
            .await
            .map_err(Failure::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(Failure::Transport)?;

        if !status.is_success() {
            let err = Error::from(Failure::Status {
                status,
                message: server_message(&text),
            });
            warn!(status = status.as_u16(), error = %err, "reply generation rejected");
            return Err(err);
        }

        debug!(status = status.as_u16(), bytes = text.len(), "reply received");
        Ok(coerce_reply_text(text))
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers
    }
}

/// Turn a success body into display text.
fn coerce_reply_text(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(value) => value.to_string(),
        Err(_) => body,
    }
}

/// Path of the generation endpoint relative to the base URL.
pub const GENERATE_PATH: &str = "/api/email/generate";
/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
/// Environment variable holding the base URL.
pub const BASE_URL_ENV: &str = "REPLY_API_URL";
/// Environment variable holding the timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "REPLY_API_TIMEOUT_MS";

const USER_AGENT_VALUE: &str = concat!("reply-generator-client/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a reply generation client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    proxy: Option<String>,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Base URL `http://localhost:8080`
    /// - 30 second timeout
    /// - No proxy
    /// - Crate user agent
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Start from defaults, then apply `REPLY_API_URL` and
    /// `REPLY_API_TIMEOUT_MS` when they are set and non-empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::new();
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = present(BASE_URL_ENV) {
            builder = builder.base_url(url.trim());
        }
        if let Some(raw) = present(TIMEOUT_ENV) {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{TIMEOUT_ENV} is not a number: {raw:?}")))?;
            builder = builder.timeout(Duration::from_millis(millis));
        }
        Ok(builder)
    }

    /// Override the service base URL (e.g., "https://replies.example.com").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// No network traffic happens here.
    pub fn build(self) -> Result<Client> {
        let parsed = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base url {:?}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base url must be http or https: {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".into()));
        }

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(proxy_url) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("invalid proxy url {proxy_url:?}: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let http = builder.build()?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let endpoint = format!("{base_url}{GENERATE_PATH}");

        Ok(Client {
            http,
            base_url,
            endpoint,
            timeout: self.timeout,
            proxy: self.proxy,
            user_agent: self.user_agent,
        })
    }
}
