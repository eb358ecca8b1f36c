//! Cursor placement and internal scrolling for the InputBox.
//!
//! The cursor byte offset belongs to the core `InputBuffer`; this module only
//! works out where that offset lands on screen and which wrapped lines are
//! visible.

use super::text_wrap::{
    BORDER_OFFSET, CONTENT_OFFSET_X, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;

#[derive(Debug, Default)]
pub(super) struct Viewport {
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
}

impl Viewport {
    /// Which wrapped line (0-based) the cursor at byte `pos` is on.
    pub fn cursor_line(buffer: &str, pos: usize, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let text_before_cursor = &buffer[..pos];
        let lines = textwrap::wrap(text_before_cursor, wrap_options(width));
        let mut cursor_line = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);

        // Cursor right after a newline that textwrap didn't represent
        if pos > 0
            && buffer.as_bytes()[pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            cursor_line = cursor_line.saturating_add(1);
        }

        cursor_line
    }

    /// Update scroll offset to keep the cursor visible.
    pub fn follow_cursor(&mut self, buffer: &str, pos: usize, content_width: u16) {
        let total_lines = wrap_line_count(buffer, inner_width(content_width));
        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = Self::cursor_line(buffer, pos, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset.saturating_add(MAX_VISIBLE_LINES) {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position `(column, row)` of the cursor at byte `pos`.
    pub fn screen_pos(&self, buffer: &str, pos: usize, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET_X, area.y + BORDER_OFFSET);
        }

        let options = wrap_options(width);
        let text_before_cursor = &buffer[..pos];
        let cursor_line = Self::cursor_line(buffer, pos, area.width);

        // Count columns from the last newline; textwrap trims trailing
        // whitespace so wrapped line lengths can't be used directly.
        let last_newline = text_before_cursor
            .rfind('\n')
            .map(|p| p + 1)
            .unwrap_or(0);
        let logical_line_to_cursor = &text_before_cursor[last_newline..];
        let logical_line_wrapped = textwrap::wrap(logical_line_to_cursor, options);

        let cursor_col = if logical_line_wrapped.is_empty() {
            0
        } else {
            let chars_in_prev_segments: usize = logical_line_wrapped
                .iter()
                .take(logical_line_wrapped.len() - 1)
                .map(|seg| seg.chars().count())
                .sum();
            let total_chars = logical_line_to_cursor.chars().count();
            u16::try_from(total_chars.saturating_sub(chars_in_prev_segments)).unwrap_or(u16::MAX)
        };

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);
        (
            (area.x + CONTENT_OFFSET_X).saturating_add(cursor_col),
            (area.y + BORDER_OFFSET).saturating_add(visible_line),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_line_after_newline() {
        assert_eq!(Viewport::cursor_line("ab\n", 3, 40), 1);
        assert_eq!(Viewport::cursor_line("ab", 2, 40), 0);
    }

    #[test]
    fn screen_pos_single_line() {
        let viewport = Viewport::default();
        let area = Rect::new(0, 10, 40, 3);
        assert_eq!(viewport.screen_pos("hello", 5, area), (7, 11));
        assert_eq!(viewport.screen_pos("hello", 0, area), (2, 11));
    }

    #[test]
    fn screen_pos_second_line() {
        let viewport = Viewport::default();
        let area = Rect::new(0, 0, 40, 4);
        assert_eq!(viewport.screen_pos("ab\ncd", 5, area), (4, 2));
    }

    #[test]
    fn follow_cursor_scrolls_past_visible_lines() {
        let mut viewport = Viewport::default();
        let text = "1\n2\n3\n4\n5\n6\n7";
        viewport.follow_cursor(text, text.len(), 40);
        assert_eq!(viewport.scroll_offset, 2);
        viewport.follow_cursor(text, 0, 40);
        assert_eq!(viewport.scroll_offset, 0);
    }

    #[test]
    fn cursor_line_saturates_on_huge_buffer() {
        let text = format!("{}\n", vec!["x"; 65_536].join("\n"));
        assert_eq!(Viewport::cursor_line(&text, text.len(), 40), u16::MAX);

        let mut viewport = Viewport::default();
        viewport.follow_cursor(&text, text.len(), 40);
        assert_eq!(viewport.scroll_offset, u16::MAX - (MAX_VISIBLE_LINES - 1));
    }
}
