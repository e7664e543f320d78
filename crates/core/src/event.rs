//! HUD events and the publish/subscribe channel they travel on.
//!
//! Everything here lives on the render thread. The sink is shared between the
//! selection machine and the animation callbacks it schedules, so publishing
//! takes `&self`.

use crate::Preset;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::debug;

/// Events the HUD publishes to the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HudEvent {
    /// A menu entry was committed; carries the entry's preset.
    PresetChanged(Preset),
}

impl HudEvent {
    /// Stable kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HudEvent::PresetChanged(_) => "preset_changed",
        }
    }

    /// Payload string for logs (the preset name).
    pub fn payload(&self) -> &'static str {
        match self {
            HudEvent::PresetChanged(preset) => preset.name(),
        }
    }
}

/// Anything that accepts HUD events.
pub trait EventSink {
    /// Deliver one event.
    fn publish(&self, event: HudEvent);
}

impl<T: EventSink + ?Sized> EventSink for Rc<T> {
    fn publish(&self, event: HudEvent) {
        (**self).publish(event);
    }
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn publish(&self, event: HudEvent) {
        (**self).publish(event);
    }
}

/// In-process fan-out of HUD events to any number of subscribers.
///
/// Subscribers receive events on an `mpsc` receiver and drain it whenever
/// they like; dropping the receiver unsubscribes.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<Sender<HudEvent>>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Receiver<HudEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Number of subscribers whose receiver was still alive at the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: HudEvent) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|tx| tx.send(event).is_ok());
        debug!(
            kind = event.kind(),
            payload = event.payload(),
            subscribers = subscribers.len(),
            "published hud event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_each_event() {
        let bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(HudEvent::PresetChanged(Preset::Insane));

        assert_eq!(a.try_recv(), Ok(HudEvent::PresetChanged(Preset::Insane)));
        assert_eq!(b.try_recv(), Ok(HudEvent::PresetChanged(Preset::Insane)));
        assert!(a.try_recv().is_err());
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(HudEvent::PresetChanged(Preset::Normal));

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(HudEvent::PresetChanged(Preset::Normal)));
    }

    #[test]
    fn shared_bus_publishes_through_rc() {
        let bus = Rc::new(EventBus::new());
        let rx = bus.subscribe();
        let sink: Rc<dyn EventSink> = bus.clone();

        sink.publish(HudEvent::PresetChanged(Preset::PingPong));

        assert_eq!(rx.try_recv(), Ok(HudEvent::PresetChanged(Preset::PingPong)));
    }

    #[test]
    fn event_labels() {
        let event = HudEvent::PresetChanged(Preset::PingPong);
        assert_eq!(event.kind(), "preset_changed");
        assert_eq!(event.payload(), "PingPong");
    }
}
