use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    HEADER_HEIGHT, Header, InputBox, MessageList, TypingIndicator,
};

/// Draws the whole widget:
///
/// ```text
/// ┌ header ──────────────┐  HEADER_HEIGHT rows
/// │ message list         │  fills the rest
/// │ typing indicator     │  1 row, only while pending
/// └ input box ───────────┘  grows with the text
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let pending = app.is_pending();
    let typing_height = u16::from(pending);
    let input_height = InputBox::calculate_height(&app.input, area.width);

    let layout = Layout::vertical([
        Length(HEADER_HEIGHT),
        Min(0),
        Length(typing_height),
        Length(input_height),
    ]);
    let [header_area, main_area, typing_area, input_area] = layout.areas(area);

    Header::new(&app.ui.title, &app.ui.status, pending).render(frame, header_area);

    MessageList::new(&mut tui.message_list, &app.log, app.last_error.as_deref())
        .render(frame, main_area);

    if pending {
        TypingIndicator::new(spinner_frame).render(frame, typing_area);
    }

    InputBox::new(&mut tui.input_box, &app.input, &app.ui.placeholder, pending)
        .render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, GENERIC_ERROR_MESSAGE, update};
    use crate::core::input::InputEdit;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_idle() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("Online"));
        assert!(text.contains("Type a message..."));
        assert!(!text.contains("typing"));
    }

    #[test]
    fn test_draw_pending_shows_typing_and_user_turn() {
        let mut app = test_app();
        update(&mut app, Action::Edit(InputEdit::Paste("What is hookchat?".into())));
        update(&mut app, Action::Submit);

        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("What is hookchat?"));
        assert!(text.contains("bot is typing"));
        assert!(text.contains("Waiting for reply"));
    }

    #[test]
    fn test_draw_error_line() {
        let mut app = test_app();
        app.last_error = Some(GENERIC_ERROR_MESSAGE.to_string());
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("something went wrong"));
    }
}
