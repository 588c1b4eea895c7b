use std::fmt;

use common::LedCommand;
use tracing::{info, warn};

use crate::{
    device::{command_url, DeviceClient},
    notify::{Notifier, DEVICE_ERROR_TOAST_MS, INVALID_LED_TOAST_MS},
    state::PanelState,
};

/// The two ways a toggle can fail. Both end up in `last_error` and in a toast;
/// neither is fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleError {
    /// Nothing in the registry has this id
    InvalidLedId(u32),
    /// Connection failure, timeout, or a non-2xx answer
    DeviceUnreachable,
}

impl ToggleError {
    pub fn toast_duration_ms(&self) -> u64 {
        match self {
            Self::InvalidLedId(_) => INVALID_LED_TOAST_MS,
            Self::DeviceUnreachable => DEVICE_ERROR_TOAST_MS,
        }
    }
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLedId(id) => write!(f, "Invalid LED ID: {id}"),
            Self::DeviceUnreachable => {
                f.write_str("Error connecting to ESP32. Check IP and network.")
            }
        }
    }
}

impl std::error::Error for ToggleError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The device confirmed and the LED now has `status`
    Toggled { id: u32, status: bool },
    /// The device confirmed, but the LED was gone from the registry by then
    Acknowledged { id: u32 },
    Failed(ToggleError),
}

/// Clears the busy flag when the toggle finishes, however it finishes.
struct BusyGuard<'a> {
    state: &'a PanelState,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.update(|view| view.busy = false);
    }
}

/// Turns a toggle intent into a device request and reconciles the view with
/// whatever the device said.
pub struct Orchestrator<C> {
    state: PanelState,
    notifier: Notifier,
    client: C,
}

impl<C: DeviceClient> Orchestrator<C> {
    pub fn new(state: PanelState, notifier: Notifier, client: C) -> Self {
        Self {
            state,
            notifier,
            client,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Ask the device to flip one LED.
    ///
    /// Errors are handled here: they are recorded in `last_error` and sent
    /// out as a toast. The returned outcome is informational only. `busy` is
    /// false again once this returns, or if it unwinds.
    ///
    /// Nothing stops a second toggle from running while one is in flight;
    /// use [`Orchestrator::try_toggle`] to refuse instead.
    pub async fn toggle(&self, led_id: u32) -> ToggleOutcome {
        self.state.update(|view| {
            view.busy = true;
            view.last_error.clear();
        });
        self.run(led_id).await
    }

    /// Like [`Orchestrator::toggle`], but only if nothing else is in flight.
    /// The busy check and setting the flag happen under one lock, so of two
    /// racing callers exactly one gets `Some`.
    pub async fn try_toggle(&self, led_id: u32) -> Option<ToggleOutcome> {
        if !self.state.try_begin() {
            return None;
        }
        Some(self.run(led_id).await)
    }

    async fn run(&self, led_id: u32) -> ToggleOutcome {
        let _busy = BusyGuard { state: &self.state };

        match self.send_command(led_id).await {
            Ok(Some(status)) => {
                info!("LED {}: now {}", led_id, if status { "on" } else { "off" });
                ToggleOutcome::Toggled { id: led_id, status }
            }
            Ok(None) => {
                warn!("LED {}: device confirmed but the LED is no longer listed", led_id);
                ToggleOutcome::Acknowledged { id: led_id }
            }
            Err(error) => {
                let message = error.to_string();
                self.state.update(|view| view.last_error = message.clone());
                self.notifier.toast(message, error.toast_duration_ms());
                ToggleOutcome::Failed(error)
            }
        }
    }

    async fn send_command(&self, led_id: u32) -> Result<Option<bool>, ToggleError> {
        let url = self
            .state
            .read(|view| {
                view.find_by_id(led_id).map(|led| {
                    command_url(
                        &view.device_address,
                        led.color,
                        LedCommand::toward(led.status),
                    )
                })
            })
            .ok_or_else(|| {
                warn!("LED {}: not in the registry", led_id);
                ToggleError::InvalidLedId(led_id)
            })?;

        if let Err(e) = self.client.send(&url).await {
            warn!("LED {}: {} ({})", led_id, e, url);
            return Err(ToggleError::DeviceUnreachable);
        }

        // Look the LED up again; the list may have changed while we waited.
        let status = self.state.update(|view| {
            view.find_by_id_mut(led_id).map(|led| {
                led.status = !led.status;
                led.status
            })
        });

        Ok(status)
    }
}
