use std::time::Duration;

use tokio::{sync::mpsc, time::timeout};
use tracing::debug;

use crate::state::PanelState;

/// Holds back edits to the device address until the user stops typing for
/// `window`, then commits only the latest one.
#[derive(Clone, Debug)]
pub struct AddressDebouncer {
    sender: mpsc::Sender<String>,
}

impl AddressDebouncer {
    pub fn spawn(state: PanelState, window: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);

        tokio::spawn(async move {
            debounce(receiver, state, window).await;
        });

        Self { sender }
    }

    pub async fn edit(&self, address: impl Into<String>) -> Result<(), mpsc::error::SendError<String>> {
        self.sender.send(address.into()).await
    }
}

async fn debounce(mut receiver: mpsc::Receiver<String>, state: PanelState, window: Duration) {
    while let Some(mut pending) = receiver.recv().await {
        // Keep replacing the pending edit until the field goes quiet. A closed
        // channel still commits whatever was typed last.
        while let Ok(Some(newer)) = timeout(window, receiver.recv()).await {
            pending = newer;
        }

        debug!("Device address set to {:?}", pending);
        state.set_device_address(pending);
    }
}
