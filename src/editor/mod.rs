//! Interfaces to the host editing surface and its surroundings.
//!
//! The core never owns document content. It re-reads the buffer through
//! [`Editor::get_value`] whenever it needs current text, which is what lets
//! a resolution survive edits made during the asynchronous gap.

use anyhow::Result;

use crate::markdown::{CursorContext, Position};

/// The text-editing surface. Positions are line/character coordinates as
/// produced by [`crate::markdown::offset_to_position`].
pub trait Editor {
    fn get_selected_text(&self) -> String;
    fn replace_selection(&mut self, text: &str);
    fn replace_range(&mut self, text: &str, start: Position, end: Position);
    fn get_value(&self) -> String;
    fn cursor_context(&self) -> CursorContext;
}

/// System clipboard access. Reading suspends in real hosts, so the call is
/// fallible rather than defaulting to empty.
pub trait Clipboard {
    fn read_text(&self) -> Result<String>;
}

/// Fire-and-forget transient user notice.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Connectivity probe consulted before any fetch is started.
pub trait NetworkStatus {
    fn is_online(&self) -> bool;
}

/// A paste or drop event as handed over by the host. `default_prevented`
/// set on arrival means another handler already claimed the event.
#[derive(Debug, Clone, Default)]
pub struct ClipboardEvent {
    text: Option<String>,
    default_prevented: bool,
}

impl ClipboardEvent {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), default_prevented: false }
    }

    /// An event with no plain-text payload (e.g. files or rich content).
    pub fn non_text() -> Self {
        Self { text: None, default_prevented: false }
    }

    pub fn already_handled(mut self) -> Self {
        self.default_prevented = true;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Suppress the host's default handling. Must happen synchronously,
    /// before the first suspension point.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
