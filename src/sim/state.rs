//! Game state and read-only snapshots
//!
//! Everything the simulation mutates lives in `GameState`; the host gets a
//! `Snapshot` to render from.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::catalog::{EntityKind, Weather};
use super::claw::Claw;
use super::combo::ComboTracker;
use super::entity::{Entity, EntityPool};
use super::environment::{Environment, WeatherChange};
use super::events::{EventQueue, GameEvent};
use super::spawn::{SpawnSelector, place_stationary};
use crate::error::TuningError;
use crate::tuning::Tuning;

/// Fires at most once per interval of wall-clock time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    pub interval_ms: f64,
    pub last_ms: f64,
}

impl Cadence {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: 0.0,
        }
    }

    /// True (and re-armed) once the interval has elapsed
    pub fn due(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ms >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Complete simulation state (deterministic for a seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Timestamp of the previous tick, `None` before the first
    pub last_tick_ms: Option<f64>,
    /// Unpaused ticks processed
    pub frame: u64,
    pub pool: EntityPool,
    pub claws: Vec<Claw>,
    pub combo: ComboTracker,
    pub environment: Environment,
    pub spawner: SpawnSelector,
    /// Trash spawns re-roll until this time (mystery bag purge)
    pub trash_suppressed_until: f64,
    pub events: EventQueue,
    pub(crate) spawn_timer_ms: f64,
    pub(crate) weather_cadence: Cadence,
    pub(crate) override_cadence: Cadence,
    pub(crate) combo_cadence: Cadence,
    pub(crate) income_cadence: Cadence,
    pub(crate) sky_drop_cadence: Cadence,
    /// When to put a new treasure chest on the floor
    pub(crate) stationary_due_ms: Option<f64>,
    next_id: u32,
}

impl GameState {
    /// New session with the shipped balance
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let claws = (0..tuning.claw_count).map(|i| Claw::new(i, &tuning)).collect();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            last_tick_ms: None,
            frame: 0,
            pool: EntityPool::default(),
            claws,
            combo: ComboTracker::default(),
            environment: Environment::new(&tuning),
            spawner: SpawnSelector::default(),
            trash_suppressed_until: 0.0,
            events: EventQueue::default(),
            spawn_timer_ms: 0.0,
            weather_cadence: Cadence::new(tuning.weather_check_ms),
            override_cadence: Cadence::new(tuning.weather_override_check_ms),
            combo_cadence: Cadence::new(tuning.combo_check_ms),
            income_cadence: Cadence::new(tuning.passive_income_ms),
            sky_drop_cadence: Cadence::new(tuning.sky_drop_interval_ms),
            stationary_due_ms: None,
            next_id: 1,
            tuning,
        };

        state.place_treasure();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Anchor every wall-clock timer to the first observed timestamp
    pub(crate) fn start_clock(&mut self, now_ms: f64) {
        for cadence in [
            &mut self.weather_cadence,
            &mut self.override_cadence,
            &mut self.combo_cadence,
            &mut self.income_cadence,
            &mut self.sky_drop_cadence,
        ] {
            cadence.last_ms = now_ms;
        }
        self.spawner.last_forced_ms = now_ms;
        log::info!("Session clock started at {:.0} ms (seed {})", now_ms, self.seed);
    }

    /// Put a treasure chest on the sea floor
    pub(crate) fn place_treasure(&mut self) {
        let id = self.next_entity_id();
        let chest = place_stationary(id, EntityKind::TreasureChest, &self.tuning, &mut self.rng);
        self.pool.spawn(chest);
    }

    /// Override the weather for a while (consumables, codes)
    pub fn force_weather(&mut self, weather: Weather, now_ms: f64, duration_ms: f64) {
        let change = self.environment.force_weather(weather, now_ms, duration_ms);
        self.report_weather(change);
    }

    pub(crate) fn report_weather(&mut self, change: Option<WeatherChange>) {
        if let Some(WeatherChange { from, to }) = change {
            self.events.push(GameEvent::WeatherChanged { from, to });
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Whether trash is currently being re-rolled away
    pub fn trash_suppressed(&self, now_ms: f64) -> bool {
        now_ms < self.trash_suppressed_until
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            frame: self.frame,
            hour: self.environment.hour,
            night: self.environment.is_night(),
            weather: self.environment.weather,
            entities: self.pool.as_slice(),
            claws: &self.claws,
            combo: &self.combo,
            trash_suppressed_until: self.trash_suppressed_until,
        }
    }
}

/// What the renderer and HUD read after a tick
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub frame: u64,
    pub hour: f32,
    pub night: bool,
    pub weather: Weather,
    pub entities: &'a [Entity],
    pub claws: &'a [Claw],
    pub combo: &'a ComboTracker,
    pub trash_suppressed_until: f64,
}
