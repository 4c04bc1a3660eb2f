use super::backend::NotifyBackend;
use super::Notification;

/// No-op notification backend.
pub struct NoopBackend;

impl NotifyBackend for NoopBackend {
    fn send(&self, _notification: &Notification) -> anyhow::Result<()> {
        Ok(())
    }
}
