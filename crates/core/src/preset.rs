//! Game-mode presets offered by the in-scene menu.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One selectable game mode.
///
/// The variant name doubles as the payload of a preset-changed event, so
/// config files and scripts refer to presets by the same string consumers
/// receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Preset {
    /// Regular single-player rally.
    Normal,
    /// Two paddles, one ball.
    PingPong,
    /// Fast ball, no mercy.
    Insane,
}

impl Preset {
    /// All presets in menu order (left to right as seen by the player).
    pub const ALL: [Preset; 3] = [Preset::Normal, Preset::PingPong, Preset::Insane];

    /// Payload name published when this preset is committed.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Normal => "Normal",
            Preset::PingPong => "PingPong",
            Preset::Insane => "Insane",
        }
    }

    /// Caption shown on the menu button.
    pub fn label(self) -> &'static str {
        match self {
            Preset::Normal => "Normal Mode",
            Preset::PingPong => "Ping Pong",
            Preset::Insane => "Insane Mode",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset `{0}` (expected one of Normal, PingPong, Insane)")]
pub struct PresetParseError(pub String);

impl FromStr for Preset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PresetParseError(s.to_string()))
    }
}
