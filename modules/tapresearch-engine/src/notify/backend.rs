use std::sync::Arc;

use super::Notification;

/// Pluggable notification backend.
pub trait NotifyBackend: Send + Sync {
    /// Show a notification.
    fn send(&self, notification: &Notification) -> anyhow::Result<()>;

    /// Hide the notification currently on screen.
    fn hide(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<B: NotifyBackend + ?Sized> NotifyBackend for Arc<B> {
    fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        (**self).send(notification)
    }

    fn hide(&self) -> anyhow::Result<()> {
        (**self).hide()
    }
}
