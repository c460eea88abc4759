//! Form state and wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Style hint sent to the reply generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Casual,
    Formal,
}

impl Tone {
    /// All tones in display order.
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Casual,
        Tone::Formal,
    ];

    /// Wire value of the tone.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Formal => "formal",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Casual => "Casual",
            Tone::Formal => "Formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone: {s}"))
    }
}

/// User-entered input awaiting submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    pub email_content: String,
    /// `None` when no tone has been selected.
    pub tone: Option<Tone>,
}

impl DraftState {
    /// Content with surrounding whitespace removed, as it is sent.
    pub fn trimmed(&self) -> &str {
        self.email_content.trim()
    }

    /// Whether the draft holds anything worth submitting.
    pub fn is_submittable(&self) -> bool {
        !self.trimmed().is_empty()
    }

    /// Character count of the untrimmed content.
    pub fn char_count(&self) -> usize {
        self.email_content.chars().count()
    }
}

/// Lifecycle of a generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

/// In-flight or terminal result of the latest request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status: RequestStatus,
    /// Last generated reply. Only written by a successful response.
    pub reply_text: String,
    /// Inline error banner text. Only set while `status` is `Failed`.
    pub error_message: Option<String>,
}

impl RequestOutcome {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Whether there is a reply to show and copy.
    pub fn has_reply(&self) -> bool {
        !self.reply_text.is_empty()
    }
}

/// Complete form state, rendered as a whole after every update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub draft: DraftState,
    pub outcome: RequestOutcome,
}

impl FormState {
    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.draft.is_submittable() && !self.outcome.is_pending()
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient notification produced by a form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// JSON body of `POST /api/email/generate`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    #[serde(rename = "emailContent")]
    pub email_content: &'a str,
    /// Empty string when unset.
    pub tone: &'a str,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(email_content: &'a str, tone: Option<Tone>) -> Self {
        Self {
            email_content,
            tone: tone.map(|t| t.as_str()).unwrap_or(""),
        }
    }
}
