//! # Reply Generator Client
//! Asynchronous client and form controller for an email reply generation HTTP service: paste an email, pick a tone, get a generated reply back through [`Client`], and drive the surrounding form with [`ReplyController`].
//!
//! ## Audience and uses
//! For front ends (TUI, desktop, web via a thin bridge) that need the request lifecycle of a "generate reply" form without re-implementing validation, error mapping, and stale-response handling: configure with [`ClientBuilder`], hold a [`ReplyController`], render its [`FormState`], and show the [`Notice`] each action returns.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Log events are emitted through `tracing`; install a subscriber to see them.
//!
//! ## Configuration
//! The service base URL defaults to `http://localhost:8080` and the timeout to 30 seconds. [`Client::from_env`] reads `REPLY_API_URL` and `REPLY_API_TIMEOUT_MS`.
//!
//! ## Out of scope
//! Not the generation service itself, and not a renderer: notices and banners are returned as data. No retries and no persistence.
//!
//! ## Errors
//! Empty input is [`Error::EmptyContent`] and never reaches the network. Timeouts, HTTP 500, and 429 map to [`Error::Timeout`], [`Error::Server`], and [`Error::RateLimited`]; other statuses (including other 5xx) become [`Error::Request`] carrying the server's `message` when present. [`Error::user_message`] yields the text to display. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use reply_generator_client::{Client, ReplyController, Tone};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), reply_generator_client::Error> {
//!     let client = Client::from_env()?;
//!     let mut form = ReplyController::new();
//!     form.set_email_content("Hi, are you available tomorrow?");
//!     form.set_tone(Some(Tone::Friendly));
//!
//!     let notice = form.submit(&client).await;
//!     println!("{notice}");
//!     if let Some(error) = &form.state().outcome.error_message {
//!         eprintln!("{error}");
//!     } else {
//!         println!("{}", form.state().outcome.reply_text);
//!     }
//!
//!     form.reset_all();
//!     Ok(())
//! }
//! ```

mod client;
mod clipboard;
mod controller;
mod error;
mod models;

pub use client::{
    BASE_URL_ENV, Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GENERATE_PATH,
    TIMEOUT_ENV,
};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::Clipboard;
pub use controller::{PendingRequest, ReplyController, RequestHandle, RequestId};
pub use error::Error;
pub use models::{DraftState, FormState, Notice, NoticeLevel, RequestOutcome, RequestStatus, Tone};

/// Result type alias for reply generation operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
