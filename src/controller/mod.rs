//! Optimistic paste/drop protocol.
//!
//! A placeholder link goes into the document immediately; the title fetch
//! runs afterwards and replaces the placeholder wherever it ended up. The
//! document stays fully editable in between. Replacement works by content
//! search over the current buffer, never by snapshot positions, so a
//! placeholder the user edited away simply makes the resolution a no-op.

use tracing::{debug, warn};
use url::Url;

use crate::blacklist;
use crate::config::Config;
use crate::editor::{Clipboard, ClipboardEvent, Editor, Notifier, NetworkStatus};
use crate::markdown::{
    self, escape_markdown, is_after_quote, is_inside_markdown_link, offset_to_position,
    shorten_title,
};
use crate::placeholder::{self, PlaceholderToken};
use crate::resolve::TitlePipeline;

const OFFLINE_NOTICE: &str = "No network connection, cannot fetch page title.";

/// States of one paste/drop flow. The value returned by the controller is
/// the state the flow terminated in:
///
/// - `Idle`: the event was not intercepted; default handling applies.
/// - `Intercepted`: intercepted but resolved without a fetch (verbatim
///   insert, or selection preserved as the title).
/// - `Replaced`: the placeholder was found and swapped for the title.
/// - `Abandoned`: offline, or the placeholder vanished before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Intercepted,
    PlaceholderInserted,
    Resolving,
    Replaced,
    Abandoned,
}

pub struct PasteController<'a> {
    cfg: Config,
    pipeline: &'a TitlePipeline,
    notifier: &'a dyn Notifier,
    network: &'a dyn NetworkStatus,
}

impl<'a> PasteController<'a> {
    pub fn new(
        cfg: Config,
        pipeline: &'a TitlePipeline,
        notifier: &'a dyn Notifier,
        network: &'a dyn NetworkStatus,
    ) -> Self {
        Self { cfg, pipeline, notifier, network }
    }

    /// Default paste interception. Leaves the event alone unless enhancement
    /// is enabled, nothing claimed the event upstream, and the payload is a
    /// plain-text non-image URL.
    pub async fn handle_paste(
        &self,
        editor: &mut dyn Editor,
        event: &mut ClipboardEvent,
    ) -> FlowState {
        if !self.cfg.enhance_default_paste() {
            return FlowState::Idle;
        }
        self.intercept(editor, event).await
    }

    /// Drop interception; identical to paste apart from the gating setting.
    pub async fn handle_drop(
        &self,
        editor: &mut dyn Editor,
        event: &mut ClipboardEvent,
    ) -> FlowState {
        if !self.cfg.enhance_drop_events() {
            return FlowState::Idle;
        }
        self.intercept(editor, event).await
    }

    async fn intercept(&self, editor: &mut dyn Editor, event: &mut ClipboardEvent) -> FlowState {
        if event.default_prevented() {
            return FlowState::Idle;
        }
        let text = match event.text() {
            Some(t) => t.trim().to_string(),
            None => return FlowState::Idle,
        };
        if !markdown::is_url(&text) || markdown::is_image_url(&text) {
            return FlowState::Idle;
        }

        // Claim the event before the first await; the host runs its default
        // handler otherwise.
        event.prevent_default();

        if !self.network.is_online() {
            self.notifier.notify(OFFLINE_NOTICE);
            return FlowState::Abandoned;
        }

        self.insert_and_resolve(editor, &text).await
    }

    /// Command variant: take the URL from the clipboard instead of an event.
    pub async fn paste_url_with_title(
        &self,
        editor: &mut dyn Editor,
        clipboard: &dyn Clipboard,
    ) -> FlowState {
        let text = match clipboard.read_text() {
            Ok(t) => t.trim().to_string(),
            Err(err) => {
                warn!("clipboard read failed: {err}");
                return FlowState::Idle;
            }
        };
        if !markdown::is_url(&text) || markdown::is_image_url(&text) {
            // Not a fetchable URL; behave like a plain paste.
            editor.replace_selection(&text);
            return FlowState::Idle;
        }
        if !self.network.is_online() {
            self.notifier.notify(OFFLINE_NOTICE);
            return FlowState::Abandoned;
        }
        self.insert_and_resolve(editor, &text).await
    }

    /// Escape hatch: verbatim clipboard insert, no interception.
    pub fn normal_paste(&self, editor: &mut dyn Editor, clipboard: &dyn Clipboard) -> FlowState {
        match clipboard.read_text() {
            Ok(text) => editor.replace_selection(&text),
            Err(err) => warn!("clipboard read failed: {err}"),
        }
        FlowState::Idle
    }

    /// Command variant over already-present text: a selected bare URL is
    /// converted in place; a selected `[label](url)` construct has its URL
    /// extracted and the whole construct replaced with a fresh titled link.
    pub async fn add_title_to_link(&self, editor: &mut dyn Editor) -> FlowState {
        let selection = editor.get_selected_text().trim().to_string();

        let url = if markdown::is_url(&selection) {
            selection
        } else if markdown::is_linked_url(&self.cfg.link_regex(), &selection) {
            match markdown::linked_url(&self.cfg.link_regex(), &selection) {
                Some(u) => u,
                None => return FlowState::Idle,
            }
        } else {
            return FlowState::Idle;
        };

        if !self.network.is_online() {
            self.notifier.notify(OFFLINE_NOTICE);
            return FlowState::Abandoned;
        }

        self.resolve_over_selection(editor, &url).await
    }

    async fn insert_and_resolve(&self, editor: &mut dyn Editor, url: &str) -> FlowState {
        let ctx = editor.cursor_context();
        if is_inside_markdown_link(&ctx) || is_after_quote(&ctx) {
            // Inserting a link here would corrupt surrounding syntax;
            // paste the text verbatim and end the flow.
            editor.replace_selection(url);
            return FlowState::Intercepted;
        }

        let selection = editor.get_selected_text();
        if !selection.is_empty() && self.cfg.preserve_selection_as_title() {
            editor.replace_selection(&format!("[{}]({})", selection, url));
            return FlowState::Intercepted;
        }

        self.resolve_over_selection(editor, url).await
    }

    /// The shared tail of every flow: placeholder in, title fetched,
    /// placeholder located and replaced.
    async fn resolve_over_selection(&self, editor: &mut dyn Editor, url: &str) -> FlowState {
        let token =
            placeholder::generate(&mut rand::thread_rng(), self.cfg.use_better_paste_id());
        editor.replace_selection(&format!("[{}]({})", token.literal, url));
        // state: PlaceholderInserted

        // state: Resolving
        let title = if blacklist::is_blacklisted(&self.cfg, url) {
            debug!("{url} is blacklisted, using hostname as title");
            hostname(url).unwrap_or_else(|| url.to_string())
        } else {
            self.pipeline.resolve(url).await
        };

        let title = shorten_title(&escape_markdown(&title), self.cfg.maximum_title_length());
        self.replace_placeholder(editor, &token, &title)
    }

    fn replace_placeholder(
        &self,
        editor: &mut dyn Editor,
        token: &PlaceholderToken,
        title: &str,
    ) -> FlowState {
        // Search the current buffer, not any earlier snapshot; the user may
        // have kept editing during the fetch.
        let text = editor.get_value();
        match text.find(&token.literal) {
            Some(byte_idx) => {
                let start_off = text[..byte_idx].chars().count();
                let end_off = start_off + token.literal.chars().count();
                let start = offset_to_position(&text, start_off);
                let end = offset_to_position(&text, end_off);
                editor.replace_range(title, start, end);
                FlowState::Replaced
            }
            None => {
                debug!("placeholder no longer present, abandoning replacement");
                FlowState::Abandoned
            }
        }
    }
}

fn hostname(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}
