//! # Core Application Logic
//!
//! This module contains hookchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (chat state)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Only deliver()  │
//!                    │  touches the network.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │ Transport  │
//!            │  Adapter   │            │ (webhook)  │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`chat`]: `ChatTurn` and the append-only `MessageLog`
//! - [`input`]: the `InputBuffer` being composed
//! - [`state`]: the `App` struct, all chat state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`dispatch`]: runs a transport call and turns it back into an `Action`
//! - [`config`]: layered configuration

pub mod action;
pub mod chat;
pub mod config;
pub mod dispatch;
pub mod input;
pub mod state;
