//! Event Bus - central hub for cross-module communication
//!
//! Tick systems emit events (kicks, strikes, goals, trail notifications) and
//! the runner or a rendering host drains them after the tick.

use bevy::prelude::*;

use super::types::GameEvent;

/// Frame-stamped event for the event bus
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Tick the event was emitted on (1-based)
    pub frame: u64,
    pub event: GameEvent,
}

/// Central event bus
///
/// Holds one tick's events. `begin_tick` throws away whatever the previous
/// tick left behind, so a host that never drains does not accumulate events.
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted since the last drain
    pending: Vec<BusEvent>,

    /// Events drained this tick (kept until cleared or the next tick)
    processed: Vec<BusEvent>,

    /// Current tick, stamped onto new events
    frame: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tick: stamp the frame and drop the previous tick's events
    pub fn begin_tick(&mut self, frame: u64) {
        self.frame = frame;
        self.pending.clear();
        self.processed.clear();
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push(BusEvent {
            frame: self.frame,
            event,
        });
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.clone());
        events
    }

    /// Get all processed events
    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    /// Clear processed events (after they were logged)
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.begin_tick(12);

        bus.emit(GameEvent::Kick {
            power: 0.8,
            connected: true,
        });

        assert_eq!(bus.pending_count(), 1);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame, 12);
        assert_eq!(bus.pending_count(), 0);
        assert_eq!(bus.processed().len(), 1);

        bus.clear_processed();
        assert!(bus.processed().is_empty());
    }

    #[test]
    fn test_begin_tick_drops_undrained_events() {
        let mut bus = EventBus::new();
        bus.begin_tick(1);
        bus.emit(GameEvent::Lob);
        bus.emit(GameEvent::Flick { vz: 1.2 });
        bus.drain();
        bus.emit(GameEvent::Touch { nudge: 0.1 });

        bus.begin_tick(2);
        assert_eq!(bus.pending_count(), 0);
        assert!(bus.processed().is_empty());

        bus.emit(GameEvent::Lob);
        assert_eq!(bus.peek()[0].frame, 2);
    }
}
