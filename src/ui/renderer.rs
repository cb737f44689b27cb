use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::layout::{SenderNames, TranscriptCache};
use super::theme::Theme;
use crate::core::widget::ChatWidget;

/// Tallest the input box grows before it scrolls internally.
const MAX_INPUT_LINES: usize = 5;

/// Everything the frame needs besides the widget itself.
#[derive(Debug, Clone)]
pub struct ViewChrome {
    pub title: String,
    pub names: SenderNames,
    pub theme: Theme,
    pub started: Instant,
    transcript: TranscriptCache,
}

impl ViewChrome {
    pub fn new(title: impl Into<String>, names: SenderNames, theme: Theme) -> Self {
        Self {
            title: title.into(),
            names,
            theme,
            started: Instant::now(),
            transcript: TranscriptCache::new(),
        }
    }

    fn activity_symbol(&self) -> &'static str {
        let elapsed = self.started.elapsed().as_millis() as f32 / 1000.0;
        let pulse_phase = (elapsed * 2.0) % 2.0;
        let pulse_intensity = if pulse_phase < 1.0 {
            pulse_phase
        } else {
            2.0 - pulse_phase
        };

        if pulse_intensity < 0.33 {
            "○"
        } else if pulse_intensity < 0.66 {
            "◐"
        } else {
            "●"
        }
    }
}

fn input_title(widget: &ChatWidget, chrome: &ViewChrome) -> Line<'static> {
    let theme = &chrome.theme;
    let mut spans = vec![Span::styled(
        "Type your message (Enter to send, Ctrl+C to quit)",
        theme.input_title_style,
    )];

    match widget.in_flight() {
        0 => {}
        1 => spans.push(Span::styled(
            format!(" {} waiting for a reply", chrome.activity_symbol()),
            theme.activity_indicator_style,
        )),
        n => spans.push(Span::styled(
            format!(" {} waiting for {n} replies", chrome.activity_symbol()),
            theme.activity_indicator_style,
        )),
    }

    Line::from(spans)
}

pub fn ui(f: &mut Frame, widget: &mut ChatWidget, chrome: &mut ViewChrome) {
    let input_lines = widget.input().line_count().clamp(1, MAX_INPUT_LINES) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_lines + 2), // +2 for borders
        ])
        .split(f.area());

    let transcript_block =
        Block::default().title(Span::styled(chrome.title.clone(), chrome.theme.title_style));
    let transcript_area = transcript_block.inner(chunks[0]);

    let lines = chrome.transcript.lines(
        widget.log(),
        &chrome.names,
        &chrome.theme,
        transcript_area.width,
    );
    widget
        .scroll_mut()
        .update_bounds(lines.len(), transcript_area.height);

    // Only the visible page goes to the paragraph, so the offset never has
    // to fit ratatui's u16 scroll position.
    let start = widget.scroll().offset().min(lines.len());
    let end = (start + transcript_area.height as usize).min(lines.len());
    let transcript = Paragraph::new(lines[start..end].to_vec()).block(transcript_block);
    f.render_widget(transcript, chunks[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(chrome.theme.input_border_style)
        .title(input_title(widget, chrome));
    let input_area = input_block.inner(chunks[1]);
    f.render_widget(input_block, chunks[1]);
    f.render_widget(widget.input().textarea(), input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{DisplayLog, Message};
    use crate::core::widget::WidgetEvent;
    use crate::utils::test_utils::{create_test_widget, create_test_widget_with_log};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn chrome() -> ViewChrome {
        ViewChrome::new(
            "poncho-chat",
            SenderNames::new("You", "Poncho"),
            Theme::dark_default(),
        )
    }

    fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn seeded_widget(messages: Vec<Message>) -> ChatWidget {
        let mut log = DisplayLog::new();
        for message in messages {
            log.push(message);
        }
        let (widget, _requests, _events) = create_test_widget_with_log(log, "");
        widget
    }

    #[test]
    fn renders_exchange_with_prefixes() {
        let mut widget = seeded_widget(vec![
            Message::user("hello"),
            Message::responder("hi there"),
        ]);
        let mut terminal = Terminal::new(TestBackend::new(50, 10)).expect("terminal");
        let mut chrome = chrome();

        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");

        let rows = rows(&terminal);
        assert_eq!(rows[0], "poncho-chat");
        assert_eq!(rows[1], "You: hello");
        assert_eq!(rows[3], "Poncho: hi there");
        assert!(rows[7].contains("Type your message"));
    }

    #[test]
    fn draft_text_is_shown_in_input_box() {
        let (mut widget, _requests, _events) = create_test_widget("draft");
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).expect("terminal");
        let mut chrome = chrome();

        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");

        let rows = rows(&terminal);
        assert!(rows[6].starts_with("│draft"), "row was {:?}", rows[6]);
    }

    #[test]
    fn scroll_tick_after_render_shows_latest_lines() {
        let messages = (0..10).map(|i| Message::user(format!("line {i}"))).collect();
        let mut widget = seeded_widget(messages);
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).expect("terminal");
        let mut chrome = chrome();

        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");
        assert_eq!(rows(&terminal)[1], "You: line 0");

        assert!(widget.apply(WidgetEvent::ScrollTick));
        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");

        // 20 transcript lines in a 4-line pane: the last page is a message
        // followed by its spacer, twice.
        let rows = rows(&terminal);
        assert_eq!(rows[1], "You: line 8");
        assert_eq!(rows[3], "You: line 9");
        assert_eq!(widget.scroll().offset(), 16);
    }

    #[tokio::test]
    async fn activity_indicator_counts_outstanding_requests() {
        let (mut widget, _requests, _events) = create_test_widget("one");
        widget.submit();
        widget.input_mut().set_text("two");
        widget.submit();

        let mut terminal = Terminal::new(TestBackend::new(100, 8)).expect("terminal");
        let mut chrome = chrome();
        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");

        let rows = rows(&terminal);
        assert!(
            rows[5].contains("waiting for 2 replies"),
            "title row was {:?}",
            rows[5]
        );
    }

    #[test]
    fn scroll_tick_reaches_the_end_of_a_very_long_transcript() {
        // 80,000 wrapped lines, more than a u16 scroll position can address.
        let messages = (0..40_000).map(|i| Message::user(format!("m{i}"))).collect();
        let mut widget = seeded_widget(messages);
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("terminal");
        let mut chrome = chrome();

        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");
        assert!(widget.apply(WidgetEvent::ScrollTick));
        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");

        let rows = rows(&terminal);
        assert_eq!(widget.scroll().offset(), 80_000 - 6);
        assert_eq!(rows[1], "You: m39997");
        assert_eq!(rows[3], "You: m39998");
        assert_eq!(rows[5], "You: m39999");
    }

    #[test]
    fn appended_messages_show_up_on_the_next_frame() {
        let mut widget = seeded_widget(vec![Message::user("hello")]);
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("terminal");
        let mut chrome = chrome();

        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");
        widget.apply(WidgetEvent::Reply {
            id: 1,
            text: "hi there".to_string(),
        });
        terminal
            .draw(|f| ui(f, &mut widget, &mut chrome))
            .expect("draw");

        let rows = rows(&terminal);
        assert_eq!(rows[1], "You: hello");
        assert_eq!(rows[3], "Poncho: hi there");
    }
}
