//! # MessageList Component
//!
//! Scrollable view of the chat log, followed by the last error (if any).
//!
//! ## Responsibilities
//!
//! - Display the turns top-to-bottom in log order
//! - Keep the view pinned to the newest turn until the user scrolls away
//! - Cache bubble heights so only new turns are measured
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `MessageLog` (props).
//! The log is append-only, so cached heights stay valid until the width
//! changes; new turns are measured and appended to the cache.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::MessageLog;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::Message;
use crate::tui::event::TuiEvent;

const ERROR_PREFIX: &str = "⚠ ";

/// Scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Last known canvas height (turns + error line)
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable chat view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub log: &'a MessageLog,
    pub last_error: Option<&'a str>,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, log: &'a MessageLog, last_error: Option<&'a str>) -> Self {
        Self {
            state,
            log,
            last_error,
        }
    }
}

fn error_text(error: &str) -> String {
    format!("{ERROR_PREFIX}{error}")
}

fn error_height(error: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    u16::try_from(textwrap::wrap(&error_text(error), options).len())
        .unwrap_or(u16::MAX)
        .max(1)
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure new turns
        self.state.layout.sync(self.log, content_width);
        let turns_height = self.state.layout.total_height();
        let error_rows = self
            .last_error
            .map(|e| error_height(e, content_width))
            .unwrap_or(0);
        let canvas_height = turns_height.saturating_add(error_rows);

        // 2. Pin to the bottom or clamp, before picking what to render
        self.state.viewport_height = area.height;
        self.state.content_height = canvas_height;
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible turns into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = self.state.layout.top_of(visible.start);
        for i in visible {
            let (Some(turn), Some(&height)) = (self.log.get(i), self.state.layout.heights.get(i))
            else {
                break;
            };
            scroll_view.render_widget(Message::new(turn), Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        if let Some(error) = self.last_error
            && error_rows > 0
        {
            let error_rect = Rect::new(0, turns_height, content_width, error_rows);
            scroll_view.render_widget(
                Paragraph::new(error_text(error))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                error_rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is recreated
/// every frame and can't hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights, indexed like the log.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// `prefix_heights[i]` is the bottom edge of turn `i`.
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// Bring the cache up to date with `log` at `content_width`.
    ///
    /// A width change invalidates everything; otherwise only turns past the
    /// cached prefix are measured.
    pub fn sync(&mut self, log: &MessageLog, content_width: u16) {
        if self.content_width != content_width || log.len() < self.heights.len() {
            self.heights.clear();
            self.prefix_heights.clear();
            self.content_width = content_width;
        }

        for turn in log.iter().skip(self.heights.len()) {
            let height = Message::calculate_height(turn, content_width);
            let bottom = self.total_height().saturating_add(height);
            self.heights.push(height);
            self.prefix_heights.push(bottom);
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas row where turn `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self
                .prefix_heights
                .get(i - 1)
                .copied()
                .unwrap_or_else(|| self.total_height()),
        }
    }

    /// Indices of turns that intersect the viewport `[offset, offset + height)`.
    pub fn visible_range(&self, offset: u16, viewport_height: u16) -> Range<usize> {
        let end_row = offset.saturating_add(viewport_height);
        let start = self.prefix_heights.partition_point(|&bottom| bottom <= offset);
        let end = self.prefix_heights.partition_point(|&bottom| bottom < end_row);
        start..(end + 1).min(self.prefix_heights.len())
    }
}
