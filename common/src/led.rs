use core::fmt;

use serde::{Deserialize, Serialize};

/// The colors wired to the ESP32. The lowercase name is what goes into the
/// device URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedColor {
    Yellow,
    Blue,
    Green,
}

impl LedColor {
    pub const ALL: [LedColor; 3] = [LedColor::Yellow, LedColor::Blue, LedColor::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            LedColor::Yellow => "yellow",
            LedColor::Blue => "blue",
            LedColor::Green => "green",
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What we ask the device to do with a single LED
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedCommand {
    On,
    Off,
}

impl LedCommand {
    /// The command that flips an LED currently at `status`.
    pub fn toward(status: bool) -> Self {
        if status {
            LedCommand::Off
        } else {
            LedCommand::On
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LedCommand::On => "on",
            LedCommand::Off => "off",
        }
    }
}

impl fmt::Display for LedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single controllable LED. The id and color never change once created;
/// only `status` moves, and only after the device confirms a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedRecord {
    pub id: u32,
    pub color: LedColor,
    pub status: bool,
}

impl LedRecord {
    pub fn new(id: u32, color: LedColor) -> Self {
        Self {
            id,
            color,
            status: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_flips_current_status() {
        assert_eq!(LedCommand::toward(false), LedCommand::On);
        assert_eq!(LedCommand::toward(true), LedCommand::Off);
    }

    #[test]
    fn colors_serialize_lowercase() {
        let json = serde_json::to_string(&LedColor::ALL).unwrap();
        assert_eq!(json, r#"["yellow","blue","green"]"#);
        assert_eq!(LedColor::Blue.to_string(), "blue");
    }
}
