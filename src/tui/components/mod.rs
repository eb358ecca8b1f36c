//! # TUI Components
//!
//! All UI components for the terminal chat widget.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `Header`: title and status line
//! - `Message`: one chat turn rendered as a bubble
//! - `TypingIndicator`: animated "bot is typing" line
//!
//! ### Stateful Components (Event-Driven)
//!
//! Transient components wrapping a `&mut` persistent state:
//! - `MessageList` / `MessageListState`: scrollable conversation view
//! - `InputBox` / `InputBoxState`: text input over the core `InputBuffer`
//!
//! Components receive data as props rather than reaching into `App`, so each
//! one can be rendered against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (title + status)
//! ├── message.rs       (single bubble)
//! ├── message_list.rs  (scrollable log + error line)
//! ├── typing.rs        (pending indicator)
//! └── input_box/       (text input)
//! ```

pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod typing;

pub use header::{HEADER_HEIGHT, Header};
pub use input_box::{InputBox, InputBoxState, InputEvent};
pub use message::Message;
pub use message_list::{MessageList, MessageListState};
pub use typing::TypingIndicator;
