//! Day/night clock and weather
//!
//! In-game time runs at a fixed ratio of real time. Weather drifts on its own
//! on a slow cadence unless a timed override (consumable or code) is holding
//! it, in which case only the override's expiry can change it.

use rand::Rng;
use serde::Serialize;

use super::catalog::Weather;
use crate::is_night_hour;
use crate::tuning::Tuning;

/// A weather change, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherChange {
    pub from: Weather,
    pub to: Weather,
}

/// Clock and weather state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    /// Unpaused real time accumulated (ms)
    pub elapsed_ms: f64,
    /// In-game hour [0, 24)
    pub hour: f32,
    pub weather: Weather,
    /// Override expiry; natural transitions are frozen while set
    pub forced_until: Option<f64>,
}

impl Environment {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            elapsed_ms: 0.0,
            hour: tuning.start_hour,
            weather: Weather::default(),
            forced_until: None,
        }
    }

    /// Advance the day clock by real elapsed time
    pub fn advance(&mut self, dt_ms: f64, tuning: &Tuning) {
        self.elapsed_ms += dt_ms.max(0.0);
        let hours = self.elapsed_ms / tuning.day_length_ms * 24.0;
        self.hour = ((tuning.start_hour as f64 + hours) % 24.0) as f32;
    }

    pub fn is_night(&self) -> bool {
        is_night_hour(self.hour)
    }

    fn set(&mut self, to: Weather) -> Option<WeatherChange> {
        let from = self.weather;
        if from == to {
            return None;
        }
        self.weather = to;
        log::info!("Weather: {} -> {}", from.as_str(), to.as_str());
        Some(WeatherChange { from, to })
    }

    /// Natural weather roll, run on the slow cadence
    pub fn check_weather<R: Rng>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        paused: bool,
    ) -> Option<WeatherChange> {
        if paused || self.forced_until.is_some() {
            return None;
        }
        if self.weather != Weather::default() {
            if rng.random_bool(tuning.weather_clear_chance) {
                return self.set(Weather::default());
            }
        } else if rng.random_bool(tuning.weather_change_chance) {
            let next = Weather::NATURAL[rng.random_range(0..Weather::NATURAL.len())];
            return self.set(next);
        }
        None
    }

    /// Hold a weather until `now_ms + duration_ms`
    pub fn force_weather(
        &mut self,
        weather: Weather,
        now_ms: f64,
        duration_ms: f64,
    ) -> Option<WeatherChange> {
        self.forced_until = Some(now_ms + duration_ms.max(0.0));
        self.set(weather)
    }

    /// Revert an expired override to the default weather, run on the fast cadence
    pub fn check_override_expiry(&mut self, now_ms: f64) -> Option<WeatherChange> {
        match self.forced_until {
            Some(until) if now_ms >= until => {
                self.forced_until = None;
                self.set(Weather::default())
            }
            _ => None,
        }
    }
}
