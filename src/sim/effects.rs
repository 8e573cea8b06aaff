//! Timed effects and the progression snapshot read each tick
//!
//! The economy (coins, upgrades, shop) lives outside the simulation. Each
//! frame the host hands in a `Progression` snapshot; the simulation only
//! reads it.

use serde::{Deserialize, Serialize};

use super::catalog::EntityKind;

/// Time-limited gameplay modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// No trash spawns
    SuperBait,
    /// Only weather-exclusive fish, spawned much faster
    FishFrenzy,
    /// Claws beyond the first may fire
    MultiClaw,
    /// Full-speed retraction regardless of weight
    DiamondHook,
    /// Sweeps up everything near the tip; immune to eel shocks
    SuperNet,
    /// Doubles catch value
    DoubleCoins,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::SuperBait,
        EffectKind::FishFrenzy,
        EffectKind::MultiClaw,
        EffectKind::DiamondHook,
        EffectKind::SuperNet,
        EffectKind::DoubleCoins,
    ];
}

/// Expiration timestamp (ms) per effect; `None` means never activated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveEffects {
    pub super_bait: Option<f64>,
    pub fish_frenzy: Option<f64>,
    pub multi_claw: Option<f64>,
    pub diamond_hook: Option<f64>,
    pub super_net: Option<f64>,
    pub double_coins: Option<f64>,
}

impl ActiveEffects {
    fn slot(&mut self, kind: EffectKind) -> &mut Option<f64> {
        match kind {
            EffectKind::SuperBait => &mut self.super_bait,
            EffectKind::FishFrenzy => &mut self.fish_frenzy,
            EffectKind::MultiClaw => &mut self.multi_claw,
            EffectKind::DiamondHook => &mut self.diamond_hook,
            EffectKind::SuperNet => &mut self.super_net,
            EffectKind::DoubleCoins => &mut self.double_coins,
        }
    }

    pub fn expiry(&self, kind: EffectKind) -> Option<f64> {
        match kind {
            EffectKind::SuperBait => self.super_bait,
            EffectKind::FishFrenzy => self.fish_frenzy,
            EffectKind::MultiClaw => self.multi_claw,
            EffectKind::DiamondHook => self.diamond_hook,
            EffectKind::SuperNet => self.super_net,
            EffectKind::DoubleCoins => self.double_coins,
        }
    }

    pub fn is_active(&self, kind: EffectKind, now_ms: f64) -> bool {
        self.expiry(kind).is_some_and(|until| now_ms < until)
    }

    /// Start an effect, stacking onto any remaining time
    pub fn activate(&mut self, kind: EffectKind, now_ms: f64, duration_ms: f64) {
        let slot = self.slot(kind);
        let base = match *slot {
            Some(until) if until > now_ms => until,
            _ => now_ms,
        };
        *slot = Some(base + duration_ms.max(0.0));
    }

    /// Drop expirations already in the past
    pub fn clear_expired(&mut self, now_ms: f64) {
        for kind in EffectKind::ALL {
            let slot = self.slot(kind);
            if slot.is_some_and(|until| now_ms >= until) {
                *slot = None;
            }
        }
    }
}

/// Read-only per-tick view of the player's progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progression {
    /// Retraction speed multiplier from upgrades
    pub claw_speed: f32,
    /// Extension speed multiplier from upgrades
    pub throw_speed: f32,
    /// 1-based spawn density upgrade level
    pub spawn_density_level: u32,
    /// 1-based trash filter upgrade level
    pub trash_filter_level: u32,
    pub effects: ActiveEffects,
    /// Discoverable kinds the player has unlocked
    pub unlocked: Vec<EntityKind>,
    /// Coins paid per passive income interval
    pub passive_income: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            claw_speed: 1.0,
            throw_speed: 1.0,
            spawn_density_level: 1,
            trash_filter_level: 1,
            effects: ActiveEffects::default(),
            unlocked: Vec::new(),
            passive_income: 0,
        }
    }
}

impl Progression {
    pub fn effect_active(&self, kind: EffectKind, now_ms: f64) -> bool {
        self.effects.is_active(kind, now_ms)
    }

    /// Parse a snapshot sent by the host
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let effects = ActiveEffects::default();
        for kind in EffectKind::ALL {
            assert!(!effects.is_active(kind, 0.0));
        }
    }

    #[test]
    fn test_activate_and_expire() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::SuperNet, 1_000.0, 5_000.0);
        assert!(effects.is_active(EffectKind::SuperNet, 1_000.0));
        assert!(effects.is_active(EffectKind::SuperNet, 5_999.0));
        assert!(!effects.is_active(EffectKind::SuperNet, 6_000.0));
        assert!(!effects.is_active(EffectKind::DiamondHook, 2_000.0));
    }

    #[test]
    fn test_activate_stacks_remaining_time() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::MultiClaw, 0.0, 10_000.0);
        effects.activate(EffectKind::MultiClaw, 4_000.0, 10_000.0);
        assert_eq!(effects.expiry(EffectKind::MultiClaw), Some(20_000.0));

        // Expired effects restart from now
        effects.activate(EffectKind::MultiClaw, 30_000.0, 1_000.0);
        assert_eq!(effects.expiry(EffectKind::MultiClaw), Some(31_000.0));
    }

    #[test]
    fn test_clear_expired() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::SuperBait, 0.0, 100.0);
        effects.activate(EffectKind::DoubleCoins, 0.0, 10_000.0);
        effects.clear_expired(500.0);
        assert_eq!(effects.super_bait, None);
        assert!(effects.double_coins.is_some());
        assert!(effects.is_active(EffectKind::DoubleCoins, 600.0));
    }

    #[test]
    fn test_progression_from_partial_json() {
        let json = r#"{
            "throw_speed": 1.5,
            "unlocked": ["Coelacanth"],
            "effects": { "super_net": 9000.0 }
        }"#;
        let progression = Progression::from_json(json).unwrap();
        assert_eq!(progression.throw_speed, 1.5);
        assert_eq!(progression.claw_speed, 1.0);
        assert_eq!(progression.unlocked, vec![EntityKind::Coelacanth]);
        assert!(progression.effect_active(EffectKind::SuperNet, 8_000.0));
        assert!(!progression.effect_active(EffectKind::SuperBait, 8_000.0));
    }
}
