use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::chat::{ChatTurn, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
pub(crate) const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub(crate) const VERTICAL_OVERHEAD: u16 = 2;
/// Narrowest bubble: room for the sender title and the `HH:MM` label.
const MIN_BUBBLE_WIDTH: u16 = 12;

/// A stateless component that renders one chat turn as a bubble.
///
/// User bubbles hug the right edge in green, bot bubbles the left edge in
/// blue. The sender is the top title and the `HH:MM` time label sits in the
/// bottom border.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match `Paragraph` wrapping, so the parent
/// `MessageList` can lay out the scroll canvas without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ChatTurn,
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ChatTurn) -> Self {
        Self { turn }
    }

    /// Width of the bubble for `turn` inside a row `available` columns wide.
    ///
    /// Bubbles shrink to their content, capped at four fifths of the row.
    pub fn bubble_width(turn: &ChatTurn, available: u16) -> u16 {
        let cap = ((available as u32 * 4 / 5) as u16)
            .max(MIN_BUBBLE_WIDTH)
            .min(available);
        let widest = turn
            .content
            .trim()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let natural = u16::try_from(widest)
            .unwrap_or(u16::MAX)
            .saturating_add(HORIZONTAL_OVERHEAD)
            .max(MIN_BUBBLE_WIDTH);
        natural.min(cap)
    }

    /// Height of the bubble for `turn` inside a row `available` columns wide.
    pub fn calculate_height(turn: &ChatTurn, available: u16) -> u16 {
        let content_width = Self::bubble_width(turn, available).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }

        let content = turn.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    /// Where the bubble sits inside `row`: right-aligned for the user.
    pub fn bubble_rect(turn: &ChatTurn, row: Rect) -> Rect {
        let width = Self::bubble_width(turn, row.width);
        let x = match turn.sender {
            Sender::User => row.x + row.width.saturating_sub(width),
            Sender::Bot => row.x,
        };
        Rect::new(x, row.y, width, row.height)
    }
}

fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Bot => Style::default().fg(Color::Blue),
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.turn.sender);
        let border_style = style.add_modifier(Modifier::DIM);
        let bubble = Self::bubble_rect(self.turn, area);

        let block = Block::bordered()
            .title(sender_label(self.turn.sender))
            .title_bottom(Line::from(self.turn.time_label()).right_aligned())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.turn.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
