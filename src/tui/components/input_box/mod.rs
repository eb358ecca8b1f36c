//! # InputBox Component
//!
//! Renders the core `InputBuffer` and translates key events into edits.
//!
//! ## Responsibilities
//!
//! - Map editing keys to `InputEdit` values (the core applies them)
//! - Emit `Submit` on Enter; Shift+Enter / Ctrl+J become a literal newline
//! - Show the placeholder when empty and a disabled look while a reply is pending
//! - Keep the cursor visible when the text grows past the visible lines
//!
//! ## State Management
//!
//! The text and cursor offset are core state (`App::input`). Only the
//! internal scroll offset lives here, in `InputBoxState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::input::{InputBuffer, InputEdit};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::Viewport;
use text_wrap::{MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, wrap_line_count, wrap_options};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Change the buffer or cursor
    Edit(InputEdit),
    /// User asked to send (Enter pressed)
    Submit,
}

/// Persistent presentation state for the input box.
#[derive(Debug, Default)]
pub struct InputBoxState {
    viewport: Viewport,
}

impl InputBoxState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Text input component.
///
/// # Props
///
/// - `buffer`: text and cursor from `App::input`
/// - `placeholder`: hint shown while the buffer is empty
/// - `disabled`: true while a reply is pending
pub struct InputBox<'a> {
    pub state: &'a mut InputBoxState,
    pub buffer: &'a InputBuffer,
    pub placeholder: &'a str,
    pub disabled: bool,
}

impl<'a> InputBox<'a> {
    pub fn new(
        state: &'a mut InputBoxState,
        buffer: &'a InputBuffer,
        placeholder: &'a str,
        disabled: bool,
    ) -> Self {
        Self {
            state,
            buffer,
            placeholder,
            disabled,
        }
    }

    /// Required height for `buffer`, clamped to the visible-line limit.
    /// Returns a value in `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(buffer: &InputBuffer, content_width: u16) -> u16 {
        let content_lines = wrap_line_count(buffer.as_str(), inner_width(content_width));
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// The wrapped lines currently scrolled into view. Wrapping here rather
    /// than in `Paragraph` keeps the text aligned with the cursor math.
    fn visible_text(&self, content_width: u16) -> String {
        let text = self.buffer.as_str();
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(text, wrap_options(width));
        let start = (self.state.viewport.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }
}

impl Component for InputBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = self.buffer.as_str();
        let pos = self.buffer.cursor();
        self.state.viewport.follow_cursor(text, pos, area.width);

        let (title, style) = if self.disabled {
            (
                "Waiting for reply…",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            )
        } else {
            ("Message", Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(title)
            .title_bottom(Line::from("⏎ send · ⇧⏎ newline").right_aligned())
            .border_style(style)
            .padding(Padding::horizontal(1));

        let paragraph = if text.is_empty() {
            Paragraph::new(self.placeholder.to_string()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.visible_text(area.width)).style(style)
        };

        frame.render_widget(paragraph.block(block), area);

        if !self.disabled {
            frame.set_cursor_position(self.state.viewport.screen_pos(text, pos, area));
        }
    }
}

/// Lives on the persistent state since `InputBox` is rebuilt every frame.
impl EventHandler for InputBoxState {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let edit = match event {
            TuiEvent::Submit => return Some(InputEvent::Submit),
            TuiEvent::InputChar(c) => InputEdit::Insert(*c),
            TuiEvent::Paste(text) => InputEdit::Paste(text.clone()),
            TuiEvent::Newline => InputEdit::Newline,
            TuiEvent::Backspace => InputEdit::Backspace,
            TuiEvent::Delete => InputEdit::Delete,
            TuiEvent::CursorLeft => InputEdit::Left,
            TuiEvent::CursorRight => InputEdit::Right,
            TuiEvent::CursorHome => InputEdit::Home,
            TuiEvent::CursorEnd => InputEdit::End,
            _ => return None,
        };
        Some(InputEvent::Edit(edit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(buffer: &InputBuffer, disabled: bool) -> String {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = InputBoxState::new();
        terminal
            .draw(|f| {
                InputBox::new(&mut state, buffer, "Type a message...", disabled).render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_event_maps_edits() {
        let mut state = InputBoxState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::Edit(InputEdit::Insert('a')))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Newline),
            Some(InputEvent::Edit(InputEdit::Newline))
        );
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(InputEvent::Submit));
        assert_eq!(state.handle_event(&TuiEvent::ScrollUp), None);
    }

    #[test]
    fn test_calculate_height_clamps() {
        let mut buffer = InputBuffer::new();
        assert_eq!(InputBox::calculate_height(&buffer, 40), 1 + VERTICAL_OVERHEAD);

        buffer.insert_str("1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(
            InputBox::calculate_height(&buffer, 40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let text = render_text(&InputBuffer::new(), false);
        assert!(text.contains("Type a message..."));
    }

    #[test]
    fn test_buffer_replaces_placeholder() {
        let mut buffer = InputBuffer::new();
        buffer.insert_str("hello");
        let text = render_text(&buffer, false);
        assert!(text.contains("hello"));
        assert!(!text.contains("Type a message"));
    }

    #[test]
    fn test_disabled_title() {
        let text = render_text(&InputBuffer::new(), true);
        assert!(text.contains("Waiting for reply"));
    }
}
