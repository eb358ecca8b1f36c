//! Pure text wrapping utilities and dimensional constants for the InputBox.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content rows (border width)
pub(super) const BORDER_OFFSET: u16 = 1;
/// Offset from area edge to content columns (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;

/// Build textwrap options configured for the input box inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after border/padding overhead. 0 if too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines for the given text, accounting for trailing newlines
/// that textwrap may not represent as empty lines.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);

    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count = count.saturating_add(1);
    }

    count
}
