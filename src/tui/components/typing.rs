//! # Typing Indicator
//!
//! One-line "bot is typing" affordance shown while a reply is pending.
//! The dots advance with the event loop's animation frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const DOT_COUNT: usize = 3;
/// Animation frames each dot stays lit.
const FRAMES_PER_DOT: usize = 4;

pub struct TypingIndicator {
    pub frame_index: usize,
}

impl TypingIndicator {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    /// Which dot is highlighted for the current frame.
    fn lit_dot(&self) -> usize {
        (self.frame_index / FRAMES_PER_DOT) % DOT_COUNT
    }
}

impl Component for TypingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lit = self.lit_dot();
        let mut spans = vec![Span::styled(
            " bot is typing ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )];
        spans.extend((0..DOT_COUNT).map(|i| {
            if i == lit {
                Span::styled("● ", Style::default().fg(Color::Blue))
            } else {
                Span::styled("● ", Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
            }
        }));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
