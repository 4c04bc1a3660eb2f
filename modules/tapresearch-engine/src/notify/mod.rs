//! Transient user notifications (toasts). Rendering belongs to the host;
//! the engine only decides what to say and how long it stays up.

pub mod backend;
pub mod log;
pub mod memory;
pub mod noop;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub position: NotificationPosition,
    /// When false the notification stays until the user dismisses it.
    pub auto_hide: bool,
    /// Pressing the notification hides it.
    pub hide_on_press: bool,
}

impl Notification {
    fn new(kind: NotificationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            position: NotificationPosition::Top,
            auto_hide: true,
            hide_on_press: false,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, text)
    }

    pub fn at(mut self, position: NotificationPosition) -> Self {
        self.position = position;
        self
    }

    /// Keep the notification up until the user presses it.
    pub fn persistent(mut self) -> Self {
        self.auto_hide = false;
        self.hide_on_press = true;
        self
    }
}
