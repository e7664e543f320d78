#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod event;
pub mod preset;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use event::{EventBus, EventSink, HudEvent};
pub use preset::{Preset, PresetParseError};

/// Fixed frame counter used to stamp HUD events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances() {
        assert_eq!(SimTick::ZERO.advance(3), SimTick(3));
        assert!(SimTick(2) < SimTick(5));
    }
}
