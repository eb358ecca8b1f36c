//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the widget,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Everything that changes `App` runs on this loop, one event at a time:
//! key presses become actions, and finished webhook calls come back as
//! `Action::ReplySettled` over an mpsc channel. The webhook call itself runs
//! on the tokio runtime and never touches `App`.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending): draws every ~80ms for the typing indicator.
//! - **Idle**: sleeps up to 500ms, only redraws on events or completions.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, OutboundMessage, update};
use crate::core::config::ResolvedConfig;
use crate::core::dispatch;
use crate::core::state::App;
use crate::transport::{ReplyTransport, TransportError, WebhookClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBoxState, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core chat state)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBoxState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBoxState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals that don't support it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the webhook transport from a resolved config.
pub fn build_transport(config: &ResolvedConfig) -> Result<Arc<dyn ReplyTransport>, TransportError> {
    let client = WebhookClient::new(config.webhook_url.clone(), config.timeout)?;
    info!("Using webhook endpoint {}", client.endpoint());
    Ok(Arc::new(client))
}

/// Translate a terminal event into a core action, routing scroll events to
/// the message list on the way.
fn route_event(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Resize => None,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
            None
        }
        _ => tui.input_box.handle_event(event).map(|input_event| match input_event {
            InputEvent::Edit(edit) => Action::Edit(edit),
            InputEvent::Submit => Action::Submit,
        }),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let transport = build_transport(&config).map_err(std::io::Error::other)?;
    let mut app = App::from_config(transport, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e));

    // Completed webhook calls come back on this channel
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        let animating = app.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&mut tui, &event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => break 'event_loop,
                Effect::SendMessage(outbound) => spawn_request(&app, outbound, tx.clone()),
                Effect::None => {}
            }
        }

        // Apply finished webhook calls
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    // Dropping `rx` here turns any in-flight completion into a no-op.
    drop(rx);
    info!("Shutting down with {} turns in the log", app.log.len());
    ratatui::restore();
    Ok(())
}

fn spawn_request(app: &App, outbound: OutboundMessage, tx: mpsc::Sender<Action>) {
    info!("Spawning webhook request {}", outbound.request_id);
    let transport = Arc::clone(&app.transport);
    tokio::spawn(async move {
        let action = dispatch::deliver(transport.as_ref(), outbound).await;
        if tx.send(action).is_err() {
            warn!("Discarding webhook result: event loop has shut down");
        }
    });
}
