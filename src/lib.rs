//! Claw Tide - an incremental claw-machine fishing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, claws, combo, weather)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration and content errors
//! - `platform`: Browser binding for the JS host

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{ContentError, HostError, TuningError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame timestep (60 Hz), used by headless runners
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta the simulation will accept (tab-switch hitches)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Hour window counted as night: [NIGHT_START_HOUR, 24) and [0, NIGHT_END_HOUR)
    pub const NIGHT_START_HOUR: f32 = 19.0;
    pub const NIGHT_END_HOUR: f32 = 5.0;
}

/// Clamp a raw frame delta (ms) into the accepted range.
///
/// Backwards clock jumps become zero, long stalls are capped.
#[inline]
pub fn clamp_frame_delta(dt_ms: f64) -> f64 {
    if dt_ms.is_nan() {
        return 0.0;
    }
    dt_ms.clamp(0.0, consts::MAX_FRAME_MS)
}

/// Offset from a pivot along an angle measured from straight down
#[inline]
pub fn down_angle_offset(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.sin() * length, angle.cos() * length)
}

/// Whether an in-game hour falls in the night window
#[inline]
pub fn is_night_hour(hour: f32) -> bool {
    hour >= consts::NIGHT_START_HOUR || hour < consts::NIGHT_END_HOUR
}
