//! # Chat Turns
//!
//! The message log is the only history hookchat keeps. Turns are appended in
//! the order they happen and are never edited, removed, or reordered.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message exchanged between the user and the bot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub sender: Sender,
    pub content: String,
    pub time: DateTime<Local>,
}

impl ChatTurn {
    fn now(sender: Sender, content: String) -> Self {
        Self {
            sender,
            content,
            time: Local::now(),
        }
    }

    /// Time label shown under the bubble, `HH:MM` on a 24-hour clock.
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// Append-only sequence of turns. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    turns: Vec<ChatTurn>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: String) -> &ChatTurn {
        self.push(ChatTurn::now(Sender::User, content))
    }

    pub fn push_bot(&mut self, content: String) -> &ChatTurn {
        self.push(ChatTurn::now(Sender::Bot, content))
    }

    fn push(&mut self, turn: ChatTurn) -> &ChatTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChatTurn> {
        self.turns.get(index)
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.turns.iter()
    }

    pub fn as_slice(&self) -> &[ChatTurn] {
        &self.turns
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a ChatTurn;
    type IntoIter = std::slice::Iter<'a, ChatTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
