//! Catch streak tracking

use serde::Serialize;

/// Consecutive successful rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComboTracker {
    pub current: u32,
    /// Best streak this session
    pub max: u32,
    /// Wall-clock time of the last catch (ms)
    pub last_catch_ms: f64,
}

impl ComboTracker {
    /// Record a finished round
    pub fn on_round_complete(&mut self, caught: bool, now_ms: f64) {
        if caught {
            self.current += 1;
            self.max = self.max.max(self.current);
            self.last_catch_ms = now_ms;
        } else {
            self.current = 0;
        }
    }

    /// Drop a stale streak. Returns true if it was reset.
    pub fn check_timeout(&mut self, now_ms: f64, paused: bool, timeout_ms: f64) -> bool {
        if self.current == 0 || paused {
            return false;
        }
        if now_ms - self.last_catch_ms > timeout_ms {
            log::debug!("Combo of {} timed out", self.current);
            self.current = 0;
            return true;
        }
        false
    }
}
