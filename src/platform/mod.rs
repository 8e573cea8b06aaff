//! Platform layer
//!
//! `Host` is what a frontend drives: it owns the simulation, the latest
//! progression snapshot and one-shot input, and works out pausing from the
//! page state. The browser binding in `web` is a thin wrapper over it.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::HostError;
use crate::sim::{GameEvent, GameState, Progression, TickInput, Weather, tick};

/// Frontend-facing game driver
#[derive(Debug, Clone)]
pub struct Host {
    pub state: GameState,
    pub progression: Progression,
    /// Shoot request waiting for the next frame
    shoot_queued: bool,
}

impl Host {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            progression: Progression::default(),
            shoot_queued: false,
        }
    }

    /// Request a shot on the next unpaused frame
    pub fn shoot(&mut self) {
        self.shoot_queued = true;
    }

    /// Run one frame. Hidden tabs and open modals pause the simulation.
    pub fn frame(&mut self, now_ms: f64, hidden: bool, modal_open: bool) {
        let paused = hidden || modal_open;
        let input = TickInput {
            shoot: self.shoot_queued && !paused,
            paused,
        };
        tick(&mut self.state, &input, &self.progression, now_ms);
        if !paused {
            self.shoot_queued = false;
        }
    }

    /// Replace the progression snapshot from the host's JSON
    pub fn set_progression_json(&mut self, json: &str) -> Result<(), HostError> {
        self.progression = Progression::from_json(json)?;
        Ok(())
    }

    /// Force a weather by name for `duration_ms`
    pub fn force_weather_named(
        &mut self,
        name: &str,
        now_ms: f64,
        duration_ms: f64,
    ) -> Result<(), HostError> {
        let weather =
            Weather::from_str(name).ok_or_else(|| HostError::UnknownWeather(name.to_string()))?;
        self.state.force_weather(weather, now_ms, duration_ms);
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state.snapshot())
    }

    pub fn events_json(&mut self) -> serde_json::Result<String> {
        serde_json::to_string(&self.drain_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::ClawState;

    #[test]
    fn test_shot_waits_out_pause() {
        let mut host = Host::new(42);
        host.frame(0.0, false, false);

        host.shoot();
        host.frame(FRAME_MS, true, false);
        assert_eq!(host.state.claws[0].state, ClawState::Idle);

        host.frame(2.0 * FRAME_MS, false, true);
        assert_eq!(host.state.claws[0].state, ClawState::Idle);

        host.frame(3.0 * FRAME_MS, false, false);
        assert_eq!(host.state.claws[0].state, ClawState::Shooting);
        let events = host.drain_events();
        assert!(events.contains(&GameEvent::ClawReleased { claw: 0 }));
    }

    #[test]
    fn test_progression_json() {
        let mut host = Host::new(1);
        host.set_progression_json(r#"{"claw_speed": 2.0, "passive_income": 5}"#)
            .unwrap();
        assert_eq!(host.progression.claw_speed, 2.0);
        assert_eq!(host.progression.passive_income, 5);
        assert_eq!(host.progression.spawn_density_level, 1);

        assert!(host.set_progression_json("not json").is_err());
        // Failed parse keeps the previous snapshot
        assert_eq!(host.progression.claw_speed, 2.0);
    }

    #[test]
    fn test_force_weather_by_name() {
        let mut host = Host::new(1);
        host.force_weather_named("Storm", 0.0, 5_000.0).unwrap();
        assert_eq!(host.state.environment.weather, Weather::Storm);

        let err = host.force_weather_named("hail", 0.0, 5_000.0).unwrap_err();
        assert!(matches!(err, HostError::UnknownWeather(name) if name == "hail"));
    }

    #[test]
    fn test_json_views() {
        let mut host = Host::new(1);
        host.force_weather_named("fog", 0.0, 1_000.0).unwrap();
        let events = host.events_json().unwrap();
        assert!(events.contains(r#""type":"WeatherChanged""#));
        assert_eq!(host.events_json().unwrap(), "[]");

        let snapshot = host.snapshot_json().unwrap();
        assert!(snapshot.contains(r#""weather":"Fog""#));
    }
}
