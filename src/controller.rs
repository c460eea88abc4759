//! Reply request controller: owns the form state and drives its lifecycle.
//!
//! The controller is a plain state machine. Network calls happen outside of
//! it; results are fed back through [`ReplyController::complete`] tagged with
//! the [`RequestId`] they belong to. Resetting or resubmitting invalidates
//! older ids, so a late response can never overwrite newer state.

use crate::clipboard::Clipboard;
use crate::error::CLIPBOARD_MESSAGE;
use crate::models::{FormState, Notice, RequestStatus, Tone};
use crate::{Client, Error, Result};
use std::fmt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const GENERATED_NOTICE: &str = "Email reply generated successfully!";
const COPIED_NOTICE: &str = "Copied to clipboard!";
const CLEARED_NOTICE: &str = "All fields cleared!";

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated submission, ready to be sent.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    id: RequestId,
    email_content: String,
    tone: Option<Tone>,
}

impl PendingRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Trimmed content that will be sent.
    pub fn email_content(&self) -> &str {
        &self.email_content
    }

    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    /// Perform the single HTTP attempt for this submission.
    pub async fn send(&self, client: &Client) -> Result<String> {
        client.generate_reply(&self.email_content, self.tone).await
    }
}

/// A submission running on a Tokio task.
///
/// Dropping the handle detaches the task; it keeps running.
#[derive(Debug)]
pub struct RequestHandle {
    id: RequestId,
    task: JoinHandle<Result<String>>,
}

impl RequestHandle {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Abort the underlying network call.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the task and return its result tagged with the request id.
    ///
    /// An aborted task yields [`Error::Cancelled`].
    pub async fn join(self) -> (RequestId, Result<String>) {
        let result = match self.task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(Error::Cancelled),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        };
        (self.id, result)
    }
}

/// Owns the form state and applies user actions and network results to it.
///
/// # Examples
/// ```no_run
/// # use reply_generator_client::{Client, ReplyController, Tone};
/// # #[tokio::main]
/// # async fn main() -> Result<(), reply_generator_client::Error> {
/// let client = Client::from_env()?;
/// let mut controller = ReplyController::new();
/// controller.set_email_content("Hi, are you available tomorrow?");
/// controller.set_tone(Some(Tone::Friendly));
///
/// let notice = controller.submit(&client).await;
/// println!("{notice}");
/// println!("{}", controller.state().outcome.reply_text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ReplyController {
    state: FormState,
    last_id: u64,
    pending: Option<RequestId>,
}

impl ReplyController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form state for rendering.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Id of the request whose result is currently awaited, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn set_email_content(&mut self, content: impl Into<String>) {
        self.state.draft.email_content = content.into();
    }

    pub fn set_tone(&mut self, tone: Option<Tone>) {
        self.state.draft.tone = tone;
    }

    /// Validate the draft and move to `Pending`.
    ///
    /// Fails with [`Error::RequestInFlight`] while a request is pending and
    /// with [`Error::EmptyContent`] for blank content; neither changes state.
    pub fn begin_submit(&mut self) -> Result<PendingRequest> {
        if self.pending.is_some() {
            return Err(Error::RequestInFlight);
        }
        if !self.state.draft.is_submittable() {
            debug!("submit rejected: empty email content");
            return Err(Error::EmptyContent);
        }

        self.last_id += 1;
        let id = RequestId(self.last_id);
        self.pending = Some(id);
        self.state.outcome.status = RequestStatus::Pending;
        self.state.outcome.error_message = None;

        debug!(request_id = %id, "reply request started");
        Ok(PendingRequest {
            id,
            email_content: self.state.draft.trimmed().to_string(),
            tone: self.state.draft.tone,
        })
    }

    /// Apply the result of request `id`.
    ///
    /// Returns `None` and leaves state untouched when `id` is not the
    /// request currently pending (superseded by a reset or never issued).
    pub fn complete(&mut self, id: RequestId, result: Result<String>) -> Option<Notice> {
        if self.pending != Some(id) {
            debug!(request_id = %id, "dropping stale reply result");
            return None;
        }
        self.pending = None;
        Some(self.apply(id, result))
    }

    fn apply(&mut self, id: RequestId, result: Result<String>) -> Notice {
        let outcome = &mut self.state.outcome;
        match result {
            Ok(reply) => {
                info!(request_id = %id, "reply generated");
                outcome.status = RequestStatus::Success;
                outcome.reply_text = reply;
                outcome.error_message = None;
                Notice::success(GENERATED_NOTICE)
            }
            Err(err) => {
                warn!(request_id = %id, error = %err, "reply generation failed");
                let message = err.user_message();
                outcome.status = RequestStatus::Failed;
                outcome.error_message = Some(message.clone());
                Notice::error(message)
            }
        }
    }

    /// Validate, send, and apply the result in one step.
    ///
    /// Validation failures are returned as error notices without any
    /// network call.
    pub async fn submit(&mut self, client: &Client) -> Notice {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(err) => return Notice::error(err.user_message()),
        };
        let result = request.send(client).await;
        self.pending = None;
        self.apply(request.id(), result)
    }

    /// Validate and start the request on a Tokio task.
    ///
    /// Feed the joined result back through [`ReplyController::complete`].
    /// Must be called from within a Tokio runtime.
    pub fn spawn_submit(&mut self, client: &Client) -> Result<RequestHandle> {
        let request = self.begin_submit()?;
        let id = request.id();
        let client = client.clone();
        let task = tokio::spawn(async move { request.send(&client).await });
        Ok(RequestHandle { id, task })
    }

    /// Copy the current reply to `clipboard`, reporting the outcome.
    pub fn copy_result<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> Notice {
        match self.try_copy_result(clipboard) {
            Ok(()) => Notice::success(COPIED_NOTICE),
            Err(err) => {
                warn!(error = %err, "copy to clipboard failed");
                Notice::error(CLIPBOARD_MESSAGE)
            }
        }
    }

    /// Like [`ReplyController::copy_result`] but returns the error.
    pub fn try_copy_result<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> Result<()> {
        if !self.state.outcome.has_reply() {
            return Err(Error::Clipboard("no generated reply to copy".into()));
        }
        clipboard.write_text(&self.state.outcome.reply_text)
    }

    /// Hide the inline error banner.
    pub fn dismiss_error(&mut self) {
        self.state.outcome.error_message = None;
    }

    /// Clear draft and outcome, and invalidate any in-flight request.
    ///
    /// The network call itself is not aborted; use
    /// [`RequestHandle::abort`] for that.
    pub fn reset_all(&mut self) -> Notice {
        if let Some(id) = self.pending.take() {
            debug!(request_id = %id, "reset while request in flight");
        }
        self.state = FormState::default();
        Notice::success(CLEARED_NOTICE)
    }
}
