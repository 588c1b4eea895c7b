use common::Toast;
use tokio::sync::broadcast;
use tracing::debug;

/// How long the panel shows an invalid LED id message
pub const INVALID_LED_TOAST_MS: u64 = 3000;
/// How long the panel shows a connectivity failure
pub const DEVICE_ERROR_TOAST_MS: u64 = 5000;

const CHANNEL_CAPACITY: usize = 16;

/// Fire-and-forget side channel for toasts. Nobody listening is fine.
#[derive(Clone, Debug)]
pub struct Notifier {
    sender: broadcast::Sender<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn toast(&self, message: impl Into<String>, duration_ms: u64) {
        let toast = Toast {
            message: message.into(),
            duration_ms,
        };

        if self.sender.send(toast).is_err() {
            debug!("No one is listening for toasts");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
