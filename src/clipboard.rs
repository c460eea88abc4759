//! Clipboard access used by the copy action.

use crate::Result;

/// Write-text clipboard capability.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// Implementations report platform refusals as [`crate::Error::Clipboard`].
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, via `arboard`.
///
/// A fresh handle is opened per write so a missing display server only
/// fails the copy, not construction.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| crate::Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| crate::Error::Clipboard(e.to_string()))
    }
}
