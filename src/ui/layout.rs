//! Transcript layout.
//!
//! Messages are pre-wrapped here rather than by ratatui's `Paragraph` so the
//! number of visual lines is known exactly; the scroll bounds depend on it.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use super::theme::Theme;
use crate::core::message::{DisplayLog, Message, Sender};

/// Display names for the two senders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderNames {
    pub user: String,
    pub responder: String,
}

impl SenderNames {
    pub fn new(user: impl Into<String>, responder: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            responder: responder.into(),
        }
    }

    pub fn for_sender(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => &self.user,
            Sender::Responder => &self.responder,
        }
    }
}

/// Lay out the whole log for a pane `width` columns wide. A width of zero
/// disables wrapping.
pub fn layout_transcript(
    log: &DisplayLog,
    names: &SenderNames,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in log {
        layout_message(&mut lines, message, names, theme, width as usize);
    }
    lines
}

/// Wrapped transcript lines, kept across frames.
///
/// The log is append-only, so new messages are laid out onto the end of the
/// cached lines. A width change or a shorter log rebuilds from scratch. The
/// cache assumes the names and theme stay fixed for its lifetime; call
/// [`invalidate`](Self::invalidate) if they change.
#[derive(Debug, Clone, Default)]
pub struct TranscriptCache {
    width: u16,
    messages_len: usize,
    lines: Vec<Line<'static>>,
}

impl TranscriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(
        &mut self,
        log: &DisplayLog,
        names: &SenderNames,
        theme: &Theme,
        width: u16,
    ) -> &[Line<'static>] {
        if width != self.width || log.len() < self.messages_len {
            self.invalidate();
            self.width = width;
        }

        for message in log.iter().skip(self.messages_len) {
            layout_message(&mut self.lines, message, names, theme, width as usize);
        }
        self.messages_len = log.len();
        &self.lines
    }

    /// Number of messages already laid out.
    pub fn cached_messages(&self) -> usize {
        self.messages_len
    }

    pub fn invalidate(&mut self) {
        self.lines.clear();
        self.messages_len = 0;
    }
}

fn layout_message(
    out: &mut Vec<Line<'static>>,
    message: &Message,
    names: &SenderNames,
    theme: &Theme,
    width: usize,
) {
    let (prefix_style, text_style) = match message.sender {
        Sender::User => (theme.user_prefix_style, theme.user_text_style),
        Sender::Responder => (theme.responder_prefix_style, theme.responder_text_style),
    };
    let prefix = format!("{}: ", names.for_sender(message.sender));

    for (index, text_line) in message.text.split('\n').enumerate() {
        if index == 0 {
            wrap_segments(out, &[(&prefix, prefix_style), (text_line, text_style)], width);
        } else {
            wrap_segments(out, &[(text_line, text_style)], width);
        }
    }

    // Spacer between messages
    out.push(Line::from(""));
}

/// Hard-wrap styled segments at `width` display columns.
fn wrap_segments(out: &mut Vec<Line<'static>>, segments: &[(&str, Style)], width: usize) {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut used = 0usize;

    for &(text, style) in segments {
        if !run.is_empty() && run_style != style {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;

        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if width > 0 && used > 0 && used + ch_width > width {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                out.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            run.push(ch);
            used += ch_width;
        }
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    out.push(Line::from(spans));
}
