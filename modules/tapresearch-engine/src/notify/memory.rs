use parking_lot::Mutex;

use super::backend::NotifyBackend;
use super::Notification;

/// Records notifications for assertions. Persistent notifications stay in
/// [`visible`](MemoryBackend::visible) until [`hide`](NotifyBackend::hide).
#[derive(Default)]
pub struct MemoryBackend {
    sent: Mutex<Vec<Notification>>,
    visible: Mutex<Vec<Notification>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.visible.lock().clone()
    }
}

impl NotifyBackend for MemoryBackend {
    fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        self.sent.lock().push(notification.clone());
        if !notification.auto_hide {
            self.visible.lock().push(notification.clone());
        }
        Ok(())
    }

    fn hide(&self) -> anyhow::Result<()> {
        self.visible.lock().pop();
        Ok(())
    }
}
