use tui_textarea::TextArea;

use crate::api::Content;
use crate::core::conversation::Conversation;
use crate::core::session::ChatError;
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

/// A submit accepted by [`App::try_begin_send`]: the outgoing text plus a
/// snapshot of every prior turn for the request payload.
pub struct PendingSend {
    pub text: String,
    pub history: Vec<Content>,
}

/// All mutable UI state. Mutated only from the event loop's thread; the
/// network round trip reports back over a channel.
pub struct App {
    pub conversation: Conversation,
    pub composer: TextArea<'static>,
    pub theme: Theme,
    pub theme_name: String,
    /// Single error slot: a new error overwrites the old one, Esc dismisses.
    pub error: Option<String>,
    /// Set while a request is outstanding; a second submit is refused until
    /// the first resolves, so replies cannot interleave.
    pub in_flight: bool,
    pub scroll_offset: u16,
    /// Largest valid scroll offset for the current frame; updated by the
    /// renderer once it knows the transcript height.
    pub scroll_max: u16,
    pub auto_scroll: bool,
    pub transcript_log: LoggingState,
}

impl App {
    pub fn new(theme_name: &str, log_file: Option<String>) -> Self {
        // Theme lookup is case-insensitive; keep the stored name lowercase
        // so the toggle comparison agrees with it.
        let theme_name = theme_name.to_ascii_lowercase();
        App {
            conversation: Conversation::new(),
            composer: TextArea::default(),
            theme: Theme::from_name(&theme_name),
            theme_name,
            error: None,
            in_flight: false,
            scroll_offset: 0,
            scroll_max: 0,
            auto_scroll: true,
            transcript_log: LoggingState::new(log_file),
        }
    }

    /// Current composer contents and clear them. Whitespace-only drafts
    /// yield `None`; the draft is cleared either way.
    pub fn take_draft(&mut self) -> Option<String> {
        let draft = self.composer.lines().join("\n");
        self.composer = TextArea::default();
        let trimmed = draft.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Begin a send if the composer holds text and no request is already in
    /// flight. Appends the user's turn and latches `in_flight`; the history
    /// snapshot excludes the new turn, which travels as the request's final
    /// content. Enter and the send shortcut both route here, so both input
    /// methods mutate the store identically.
    pub fn try_begin_send(&mut self) -> Option<PendingSend> {
        if self.in_flight {
            return None;
        }
        let text = self.take_draft()?;
        let history = self.conversation.api_history();
        self.push_user(&text);
        self.in_flight = true;
        Some(PendingSend { text, history })
    }

    pub fn finish_send_ok(&mut self, reply: &str) {
        self.push_bot(reply);
        self.in_flight = false;
    }

    /// The user's already-appended turn is not rolled back; the transcript
    /// keeps the unanswered turn and the banner explains why.
    pub fn finish_send_err(&mut self, err: &ChatError) {
        self.report_error(err);
        self.in_flight = false;
    }

    pub fn report_error(&mut self, err: &ChatError) {
        self.error = Some(banner_text(&err.to_string()));
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn toggle_theme(&mut self) {
        let next = if self.theme_name == "dark" { "light" } else { "dark" };
        self.theme_name = next.to_string();
        self.theme = Theme::from_name(next);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.scroll_max);
        if self.scroll_offset == self.scroll_max {
            self.auto_scroll = true;
        }
    }

    fn push_user(&mut self, text: &str) {
        self.conversation.push_user(text);
        let _ = self.transcript_log.log_turn("You", text);
    }

    fn push_bot(&mut self, text: &str) {
        self.conversation.push_bot(text);
        let _ = self.transcript_log.log_turn("Bot", text);
    }
}

const BANNER_MAX_CHARS: usize = 160;

/// Collapse an error message onto one line and cap its length. Send errors
/// embed full service response bodies, which would otherwise overflow the
/// one-row banner.
fn banner_text(message: &str) -> String {
    let single_line = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= BANNER_MAX_CHARS {
        return single_line;
    }
    let mut truncated: String = single_line.chars().take(BANNER_MAX_CHARS).collect();
    truncated.push('…');
    truncated
}
