use tracing::info;

use super::backend::NotifyBackend;
use super::Notification;

/// Writes notifications to the log. Used by headless hosts and the demo.
pub struct LogBackend;

impl NotifyBackend for LogBackend {
    fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        info!(
            kind = ?notification.kind,
            position = ?notification.position,
            auto_hide = notification.auto_hide,
            "{}",
            notification.text
        );
        Ok(())
    }

    fn hide(&self) -> anyhow::Result<()> {
        info!("Notification hidden");
        Ok(())
    }
}
