// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transport-neutral inbound events and outbound replies.

use crate::models::UserId;
use serde::{Deserialize, Serialize};

/// Kind of inbound event delivered by the chat front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Slash command such as `/start`
    Command,
    /// Button press carrying an action token
    Callback,
    /// Free text typed by the user
    Text,
}

/// Inbound event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub user_id: UserId,
    pub kind: EventKind,
    #[serde(default)]
    pub data: String,
}

impl InboundEvent {
    pub fn command(user_id: UserId, command: &str) -> Self {
        Self {
            user_id,
            kind: EventKind::Command,
            data: command.to_string(),
        }
    }

    pub fn callback(user_id: UserId, token: &str) -> Self {
        Self {
            user_id,
            kind: EventKind::Callback,
            data: token.to_string(),
        }
    }

    pub fn text(user_id: UserId, text: &str) -> Self {
        Self {
            user_id,
            kind: EventKind::Text,
            data: text.to_string(),
        }
    }
}

/// A single interactive control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Rows of buttons rendered by the front end.
pub type Keyboard = Vec<Vec<Button>>;

/// Outbound message: text plus an optional keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// All action tokens in keyboard order.
    pub fn actions(&self) -> Vec<&str> {
        self.keyboard
            .iter()
            .flatten()
            .flatten()
            .map(|b| b.action.as_str())
            .collect()
    }
}
