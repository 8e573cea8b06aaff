//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance passes can ship as a JSON
//! file instead of a rebuild. `Tuning::default()` is the shipped balance.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Gameplay balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    /// Play-field width (px)
    pub field_width: f32,
    /// Play-field height (px)
    pub field_height: f32,
    /// Y of the water surface; everything above is sky
    pub water_line: f32,
    /// Keep-out band below the water line for spawned entities
    pub top_margin: f32,
    /// Keep-out band above the sea floor for spawned entities
    pub bottom_margin: f32,

    // === Claws ===
    pub claw_count: usize,
    /// Horizontal spacing between neighbouring claw pivots
    pub claw_spacing: f32,
    /// Y of the claw pivots (the boat)
    pub claw_pivot_y: f32,
    pub resting_length: f32,
    pub max_length: f32,
    /// Extension speed at throw multiplier 1.0 (px/s)
    pub shoot_speed: f32,
    /// Floor on extension speed whatever the throw multiplier (px/s)
    pub min_shoot_speed: f32,
    /// Retraction speed with nothing held (px/s)
    pub empty_retract_speed: f32,
    /// Retraction speed for a combined weight of 5 at claw multiplier 1.0 (px/s)
    pub base_retract_speed: f32,
    /// Floor so heavy hauls never stall (px/s)
    pub min_retract_speed: f32,
    /// Idle sway bound (radians either side of straight down)
    pub sway_limit: f32,
    /// Idle sway angular speed of claw 0 (rad/s)
    pub sway_speed: f32,
    pub severed_ms: f64,
    pub numbed_ms: f64,
    /// Per-tick multiplicative sway decay while severed
    pub severed_sway_decay: f32,
    /// Sway speed factor while numbed
    pub numbed_sway_damping: f32,
    /// Fraction of the sprite box that counts as a hit
    pub hitbox_scale: f32,
    /// Radius around the tip swept up by a super net (px)
    pub net_radius: f32,

    // === Combo ===
    pub combo_timeout_ms: f64,
    pub combo_check_ms: f64,

    // === Environment ===
    /// Real time for one full in-game day
    pub day_length_ms: f64,
    pub start_hour: f32,
    pub weather_check_ms: f64,
    pub weather_override_check_ms: f64,
    /// Chance per check that non-default weather clears
    pub weather_clear_chance: f64,
    /// Chance per check that clear weather turns
    pub weather_change_chance: f64,

    // === Spawning ===
    /// Rarity weights: common, uncommon, rare, legendary
    pub rarity_weights: [u32; 4],
    pub trash_cap: usize,
    pub trash_filter_max_level: u32,
    /// Trash removal chance at the max filter level
    pub trash_filter_max_reduction: f64,
    pub spawn_interval_ms: f64,
    /// Interval shrink per spawn density level above 1
    pub spawn_density_step: f64,
    /// Interval divisor during a fish frenzy
    pub frenzy_spawn_divisor: f64,
    pub max_entities: usize,
    pub legendary_interval_ms: f64,
    pub sky_drop_interval_ms: f64,
    /// Gravity applied to falling items in air (px/s^2)
    pub gravity: f32,
    /// Sinking speed cap once under water (px/s)
    pub sink_speed: f32,
    /// Velocity kept per 1/60 s while sinking
    pub sink_damping: f32,
    pub stationary_respawn_ms: f64,

    // === Rewards ===
    pub mystery_bonus_min: u32,
    pub mystery_bonus_max: u32,
    /// Chance a mystery bag pays out coins instead of purging trash
    pub mystery_bonus_chance: f64,
    pub trash_purge_ms: f64,
    pub passive_income_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 1000.0,
            field_height: 700.0,
            water_line: 120.0,
            top_margin: 30.0,
            bottom_margin: 40.0,

            claw_count: 5,
            claw_spacing: 160.0,
            claw_pivot_y: 70.0,
            resting_length: 40.0,
            max_length: 900.0,
            shoot_speed: 600.0,
            min_shoot_speed: 60.0,
            empty_retract_speed: 900.0,
            base_retract_speed: 400.0,
            min_retract_speed: 40.0,
            sway_limit: 1.1,
            sway_speed: 0.9,
            severed_ms: 5_000.0,
            numbed_ms: 3_000.0,
            severed_sway_decay: 0.92,
            numbed_sway_damping: 0.35,
            hitbox_scale: 2.0 / 3.0,
            net_radius: 120.0,

            combo_timeout_ms: 10_000.0,
            combo_check_ms: 1_000.0,

            day_length_ms: 180_000.0,
            start_hour: 8.0,
            weather_check_ms: 20_000.0,
            weather_override_check_ms: 1_000.0,
            weather_clear_chance: 0.30,
            weather_change_chance: 0.05,

            rarity_weights: [50, 25, 10, 4],
            trash_cap: 25,
            trash_filter_max_level: 10,
            trash_filter_max_reduction: 0.95,
            spawn_interval_ms: 1_200.0,
            spawn_density_step: 0.15,
            frenzy_spawn_divisor: 4.0,
            max_entities: 60,
            legendary_interval_ms: 10_000.0,
            sky_drop_interval_ms: 45_000.0,
            gravity: 600.0,
            sink_speed: 60.0,
            sink_damping: 0.9,
            stationary_respawn_ms: 60_000.0,

            mystery_bonus_min: 50,
            mystery_bonus_max: 500,
            mystery_bonus_chance: 0.5,
            trash_purge_ms: 30_000.0,
            passive_income_ms: 10_000.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning file; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(TuningError::OutOfRange("field size"));
        }
        if self.water_line < 0.0 || self.water_line >= self.field_height {
            return Err(TuningError::OutOfRange("water_line"));
        }
        if self.safe_top() >= self.safe_bottom() {
            return Err(TuningError::OutOfRange("top_margin/bottom_margin"));
        }
        if self.claw_count == 0 {
            return Err(TuningError::OutOfRange("claw_count"));
        }
        if self.resting_length <= 0.0 || self.max_length <= self.resting_length {
            return Err(TuningError::OutOfRange("resting_length/max_length"));
        }
        if self.shoot_speed <= 0.0
            || self.min_shoot_speed <= 0.0
            || self.empty_retract_speed <= 0.0
            || self.base_retract_speed <= 0.0
            || self.min_retract_speed <= 0.0
        {
            return Err(TuningError::OutOfRange("claw speeds"));
        }
        if self.min_retract_speed > self.empty_retract_speed {
            return Err(TuningError::OutOfRange("min_retract_speed"));
        }
        if self.day_length_ms <= 0.0 {
            return Err(TuningError::OutOfRange("day_length_ms"));
        }
        if !(0.0..24.0).contains(&self.start_hour) {
            return Err(TuningError::OutOfRange("start_hour"));
        }
        if self.rarity_weights.iter().any(|&w| w == 0) {
            return Err(TuningError::OutOfRange("rarity_weights"));
        }
        if self.trash_filter_max_level < 2 {
            return Err(TuningError::OutOfRange("trash_filter_max_level"));
        }
        if self.mystery_bonus_min > self.mystery_bonus_max {
            return Err(TuningError::OutOfRange("mystery_bonus_min/max"));
        }
        let chances = [
            self.weather_clear_chance,
            self.weather_change_chance,
            self.trash_filter_max_reduction,
            self.mystery_bonus_chance,
        ];
        if chances.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(TuningError::OutOfRange("probabilities"));
        }
        if self.spawn_interval_ms <= 0.0 || self.frenzy_spawn_divisor < 1.0 {
            return Err(TuningError::OutOfRange("spawn interval"));
        }
        Ok(())
    }

    /// Highest y a spawned entity may occupy
    pub fn safe_top(&self) -> f32 {
        self.water_line + self.top_margin
    }

    /// Lowest y a spawned entity may occupy
    pub fn safe_bottom(&self) -> f32 {
        self.field_height - self.bottom_margin
    }

    /// Pivot x of a claw; claws fan out alternately left and right of center
    pub fn claw_pivot_x(&self, index: usize) -> f32 {
        let center = self.field_width / 2.0;
        if index == 0 {
            return center;
        }
        let step = index.div_ceil(2) as f32 * self.claw_spacing;
        if index % 2 == 1 { center - step } else { center + step }
    }

    /// Chance a trash roll is filtered out at the given filter level
    ///
    /// Linear from 0 at level 1 to the max reduction at the max level.
    pub fn trash_reduction(&self, level: u32) -> f64 {
        let max_level = self.trash_filter_max_level.max(2);
        let level = level.clamp(1, max_level);
        let t = (level - 1) as f64 / (max_level - 1) as f64;
        t * self.trash_filter_max_reduction
    }

    /// Spawn interval for a density level, optionally in frenzy
    pub fn spawn_interval(&self, density_level: u32, frenzy: bool) -> f64 {
        let level = density_level.max(1);
        let interval =
            self.spawn_interval_ms / (1.0 + self.spawn_density_step * (level - 1) as f64);
        if frenzy {
            interval / self.frenzy_spawn_divisor
        } else {
            interval
        }
    }
}
