#![warn(missing_docs)]
//! Deterministic testing surfaces (event capture, intensity probes, JSONL logs).

use anyhow::Result;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use vrpong_core::{EventSink, HudEvent, SimTick};

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Frame when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Event payload.
    pub payload: &'a str,
}

impl EventRecord<'static> {
    /// Record `event` as seen at `tick`.
    pub fn from_event(tick: SimTick, event: &HudEvent) -> Self {
        Self {
            tick,
            kind: event.kind(),
            payload: event.payload(),
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Event sink that keeps every published event in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<HudEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder behind an `Rc`, ready to hand to the HUD.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Snapshot of everything published so far.
    pub fn events(&self) -> Vec<HudEvent> {
        self.events.borrow().clone()
    }

    /// Number of events published so far.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing was published yet.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: HudEvent) {
        tracing::trace!(kind = event.kind(), payload = event.payload(), "recorded");
        self.events.borrow_mut().push(event);
    }
}

/// Observable stand-in for a region's visual group.
///
/// Clones share the same level, so a test keeps one clone and injects
/// [`IntensityProbe::setter`] into the region.
#[derive(Debug, Clone)]
pub struct IntensityProbe {
    level: Rc<Cell<f32>>,
    writes: Rc<Cell<usize>>,
}

impl IntensityProbe {
    /// Probe starting at `level`.
    pub fn new(level: f32) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    /// Last intensity written.
    pub fn level(&self) -> f32 {
        self.level.get()
    }

    /// How many times the level was written.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Setter closure writing into this probe.
    pub fn setter(&self) -> impl FnMut(f32) + 'static {
        let probe = self.clone();
        move |value| {
            probe.level.set(value);
            probe.writes.set(probe.writes.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrpong_core::Preset;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::shared();
        sink.publish(HudEvent::PresetChanged(Preset::Normal));
        sink.publish(HudEvent::PresetChanged(Preset::Insane));
        assert_eq!(
            sink.events(),
            vec![
                HudEvent::PresetChanged(Preset::Normal),
                HudEvent::PresetChanged(Preset::Insane)
            ]
        );
    }

    #[test]
    fn probe_counts_writes() {
        let probe = IntensityProbe::new(0.5);
        let mut set = probe.setter();
        set(0.7);
        set(1.0);
        assert_eq!(probe.level(), 1.0);
        assert_eq!(probe.writes(), 2);
    }

    #[test]
    fn record_uses_event_labels() {
        let record = EventRecord::from_event(SimTick(4), &HudEvent::PresetChanged(Preset::PingPong));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"tick":4,"kind":"preset_changed","payload":"PingPong"}"#);
    }
}
