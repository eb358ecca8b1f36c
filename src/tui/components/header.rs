//! # Header Component
//!
//! Top bar with the assistant icon, title, and status line.
//!
//! Stateless: all data arrives as props. While a reply is pending the status
//! text is replaced by a typing notice so the header mirrors the lifecycle.
//!
//! ```text
//!  ◉ AI Assistant
//!    Online
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Rows occupied by the header (title line + status line).
pub const HEADER_HEIGHT: u16 = 2;

const ICON: &str = "◉";
const PENDING_STATUS: &str = "typing…";

pub struct Header<'a> {
    pub title: &'a str,
    pub status: &'a str,
    pub is_pending: bool,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, status: &'a str, is_pending: bool) -> Self {
        Self {
            title,
            status,
            is_pending,
        }
    }

    fn status_text(&self) -> &str {
        if self.is_pending {
            PENDING_STATUS
        } else {
            self.status
        }
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = Style::default().fg(Color::Cyan);
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {ICON} "), accent.add_modifier(Modifier::BOLD)),
                Span::styled(
                    self.title.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("   {}", self.status_text()),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(header: &mut Header) -> String {
        let backend = TestBackend::new(40, HEADER_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_title_and_status() {
        let text = render_text(&mut Header::new("AI Assistant", "Online", false));
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("Online"));
    }

    #[test]
    fn test_header_shows_typing_while_pending() {
        let text = render_text(&mut Header::new("AI Assistant", "Online", true));
        assert!(text.contains("typing"));
        assert!(!text.contains("Online"));
    }
}
