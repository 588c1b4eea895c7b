use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde::{Deserialize, Serialize};

use crate::led::{LedColor, LedRecord};

/// Placeholder shown in the address field until the user types their own.
pub const DEFAULT_DEVICE_ADDRESS: &str = "192.168.1.100";

/// Everything the panel shows. There is one of these per session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// In display order
    pub leds: Vec<LedRecord>,
    pub device_address: String,
    /// Set while a toggle request is in flight
    pub busy: bool,
    /// Empty when there is no error
    pub last_error: String,
}

impl ViewState {
    pub fn new(device_address: impl Into<String>) -> Self {
        Self {
            leds: default_leds(),
            device_address: device_address.into(),
            busy: false,
            last_error: String::new(),
        }
    }

    pub fn find_by_id(&self, id: u32) -> Option<&LedRecord> {
        self.leds.iter().find(|led| led.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: u32) -> Option<&mut LedRecord> {
        self.leds.iter_mut().find(|led| led.id == id)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_ADDRESS.to_string())
    }
}

/// The three LEDs on the board, all off.
pub fn default_leds() -> Vec<LedRecord> {
    LedColor::ALL
        .iter()
        .enumerate()
        .map(|(i, color)| LedRecord::new(i as u32, *color))
        .collect()
}

/// A transient message for the user. It is not part of the view state; the
/// panel shows it for `duration_ms` and then forgets it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub duration_ms: u64,
}
