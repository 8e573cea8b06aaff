//! Outbound notifications for the host
//!
//! The simulation pushes events as things happen; the host drains the queue
//! once per frame and routes them to the economy store, audio and effects.

use serde::Serialize;

use super::catalog::{EntityKind, Weather};

/// Something the host should know about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A claw left the boat
    ClawReleased { claw: usize },
    /// Claw 0 flew off the field without touching anything
    CaughtNothing { claw: usize },
    /// Transient screen shake
    Shake,
    /// An entity landed on the boat, already priced
    Caught {
        claw: usize,
        kind: EntityKind,
        value: u32,
    },
    /// A claw finished a round trip
    RoundComplete { claw: usize, caught: bool },
    PassiveIncome { amount: u32 },
    ClawSevered { claw: usize, until_ms: f64 },
    ClawNumbed { claw: usize, until_ms: f64 },
    /// A mystery bag cleared the water of trash
    TrashPurged { removed: usize, until_ms: f64 },
    WeatherChanged { from: Weather, to: Weather },
    SupplyDropped { x: f32 },
}

/// FIFO of pending events
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
