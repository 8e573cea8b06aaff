//! Claw lifecycle: Idle -> Shooting -> Retracting -> Idle
//!
//! Each claw hangs from a pivot on the boat. While idle it sways; once fired
//! it extends along its current angle until it touches something, leaves the
//! field, or hits max length, then reels back in at a speed that depends on
//! what it is carrying. Landing the haul resolves each entity's catch rule.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::catalog::CatchRule;
use super::combo::ComboTracker;
use super::effects::{EffectKind, Progression};
use super::entity::{Entity, EntityPool};
use super::events::{EventQueue, GameEvent};
use crate::down_angle_offset;
use crate::tuning::Tuning;

/// Claw lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ClawState {
    #[default]
    Idle,
    Shooting,
    Retracting,
}

/// Why a claw is locked out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DisableReason {
    #[default]
    None,
    /// Shocked by an eel; keeps swaying slowly
    Numbed,
    /// Cut by a pincher; sway dies out
    Severed,
}

/// Whether a claw may fire right now
pub fn claw_eligible(index: usize, progression: &Progression, now_ms: f64) -> bool {
    index == 0 || progression.effect_active(EffectKind::MultiClaw, now_ms)
}

/// Retraction speed for a haul
///
/// Empty claws and diamond hooks reel at full speed; otherwise speed falls
/// off with combined weight (a weight of 5 reels at base speed), scaled by
/// the claw speed upgrade and floored at the minimum. Light hauls can reel
/// faster than an empty claw.
pub fn retract_speed(tuning: &Tuning, held_weight: f32, claw_speed: f32, diamond_hook: bool) -> f32 {
    if held_weight <= 0.0 || diamond_hook {
        return tuning.empty_retract_speed;
    }
    let load = (held_weight / 5.0).max(f32::EPSILON);
    (tuning.base_retract_speed / load * claw_speed).max(tuning.min_retract_speed)
}

/// Everything a claw touches while stepping
pub struct ClawWorld<'a, R: Rng> {
    pub tuning: &'a Tuning,
    pub progression: &'a Progression,
    pub pool: &'a mut EntityPool,
    pub combo: &'a mut ComboTracker,
    pub events: &'a mut EventQueue,
    pub rng: &'a mut R,
    /// End of the mystery-bag trash purge window
    pub trash_suppressed_until: &'a mut f64,
    pub now_ms: f64,
    /// Frame delta in seconds
    pub dt: f32,
}

/// A player-controlled claw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claw {
    pub index: usize,
    pub state: ClawState,
    /// Radians from straight down
    pub angle: f32,
    /// Idle sway speed (rad/s), sign is direction
    pub angular_vel: f32,
    pub length: f32,
    pub pivot: Vec2,
    /// Entities being reeled in
    pub held: Vec<Entity>,
    pub disabled_until: f64,
    pub disable_reason: DisableReason,
}

impl Claw {
    pub fn new(index: usize, tuning: &Tuning) -> Self {
        // Neighbouring claws sway out of phase at slightly different rates
        let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
        Self {
            index,
            state: ClawState::Idle,
            angle: 0.0,
            angular_vel: tuning.sway_speed * (1.0 + 0.12 * index as f32) * direction,
            length: tuning.resting_length,
            pivot: Vec2::new(tuning.claw_pivot_x(index), tuning.claw_pivot_y),
            held: Vec::new(),
            disabled_until: 0.0,
            disable_reason: DisableReason::None,
        }
    }

    pub fn tip(&self) -> Vec2 {
        self.pivot + down_angle_offset(self.angle, self.length)
    }

    pub fn is_disabled(&self, now_ms: f64) -> bool {
        self.disable_reason != DisableReason::None && now_ms < self.disabled_until
    }

    /// Apply a lockout, replacing any current one
    pub fn disable(&mut self, reason: DisableReason, until_ms: f64) {
        self.disable_reason = reason;
        self.disabled_until = until_ms;
    }

    /// Clear a lockout whose time has passed
    pub fn refresh_disable(&mut self, now_ms: f64) {
        if self.disable_reason != DisableReason::None && now_ms >= self.disabled_until {
            self.disable_reason = DisableReason::None;
        }
    }

    pub fn held_weight(&self) -> f32 {
        self.held.iter().map(|e| e.def().weight).sum()
    }

    /// Idle -> Shooting if allowed; returns whether the claw fired
    pub fn try_shoot(&mut self, now_ms: f64, eligible: bool) -> bool {
        if !eligible || self.state != ClawState::Idle || self.is_disabled(now_ms) {
            return false;
        }
        self.state = ClawState::Shooting;
        true
    }

    /// Advance one frame
    pub fn step<R: Rng>(&mut self, world: &mut ClawWorld<'_, R>, eligible: bool) {
        self.refresh_disable(world.now_ms);
        match self.state {
            ClawState::Idle => {
                self.length = world.tuning.resting_length;
                if eligible {
                    self.sway(world.dt, world.tuning, world.now_ms);
                }
            }
            ClawState::Shooting => self.extend(world),
            ClawState::Retracting => self.retract(world),
        }
    }

    fn sway(&mut self, dt: f32, tuning: &Tuning, now_ms: f64) {
        if !self.is_disabled(now_ms) {
            self.swing(dt, tuning.sway_limit);
            return;
        }
        match self.disable_reason {
            DisableReason::Severed => self.angle *= tuning.severed_sway_decay,
            DisableReason::Numbed => self.swing(dt * tuning.numbed_sway_damping, tuning.sway_limit),
            DisableReason::None => {}
        }
    }

    fn swing(&mut self, dt: f32, limit: f32) {
        self.angle += self.angular_vel * dt;
        if self.angle > limit {
            self.angle = limit;
            self.angular_vel = -self.angular_vel.abs();
        } else if self.angle < -limit {
            self.angle = -limit;
            self.angular_vel = self.angular_vel.abs();
        }
    }

    fn extend<R: Rng>(&mut self, world: &mut ClawWorld<'_, R>) {
        let tuning = world.tuning;
        let speed = (tuning.shoot_speed * world.progression.throw_speed).max(tuning.min_shoot_speed);
        self.length = (self.length + speed * world.dt).min(tuning.max_length);
        let tip = self.tip();

        let contact = world
            .pool
            .first_hit(tip, tuning.hitbox_scale)
            .map(|e| (e.id, e.def().catch_rule));

        if let Some((id, rule)) = contact {
            if rule == CatchRule::Pincher {
                self.sever(world, id);
                return;
            }
            if world.progression.effect_active(EffectKind::SuperNet, world.now_ms) {
                let reach = tuning.net_radius * tuning.net_radius;
                let mut netted = world.pool.take_where(|e| {
                    e.id == id || (!e.def().is_hazard() && e.pos.distance_squared(tip) <= reach)
                });
                self.held.append(&mut netted);
            } else if let Some(entity) = world.pool.remove(id) {
                self.held.push(entity);
            }
            self.carry_held(tip);
            self.state = ClawState::Retracting;
            return;
        }

        let out_of_bounds = tip.x < 0.0
            || tip.x > tuning.field_width
            || tip.y < 0.0
            || tip.y > tuning.field_height;
        if out_of_bounds || self.length >= tuning.max_length {
            self.state = ClawState::Retracting;
            if out_of_bounds && self.index == 0 {
                world.events.push(GameEvent::Shake);
                world.events.push(GameEvent::CaughtNothing { claw: self.index });
            }
        }
    }

    /// Pincher contact: lose the round and the claw for a while
    fn sever<R: Rng>(&mut self, world: &mut ClawWorld<'_, R>, hazard_id: u32) {
        world.pool.remove(hazard_id);
        let until = world.now_ms + world.tuning.severed_ms;
        self.disable(DisableReason::Severed, until);
        self.length = world.tuning.resting_length;
        self.state = ClawState::Idle;
        log::debug!("Claw {} severed until {:.0}", self.index, until);
        world.events.push(GameEvent::ClawSevered {
            claw: self.index,
            until_ms: until,
        });
        world.combo.on_round_complete(false, world.now_ms);
        world.events.push(GameEvent::RoundComplete {
            claw: self.index,
            caught: false,
        });
    }

    fn retract<R: Rng>(&mut self, world: &mut ClawWorld<'_, R>) {
        let tuning = world.tuning;
        let diamond = world
            .progression
            .effect_active(EffectKind::DiamondHook, world.now_ms);
        let speed = retract_speed(
            tuning,
            self.held_weight(),
            world.progression.claw_speed,
            diamond,
        );
        self.length = (self.length - speed * world.dt).max(tuning.resting_length);
        self.carry_held(self.tip());

        if self.length > tuning.resting_length {
            return;
        }
        self.length = tuning.resting_length;
        self.state = ClawState::Idle;

        let haul = std::mem::take(&mut self.held);
        let caught = !haul.is_empty();
        world.combo.on_round_complete(caught, world.now_ms);
        world.events.push(GameEvent::RoundComplete {
            claw: self.index,
            caught,
        });
        for entity in haul {
            self.resolve(world, &entity);
        }
    }

    /// Apply an entity's catch rule and report it
    fn resolve<R: Rng>(&mut self, world: &mut ClawWorld<'_, R>, entity: &Entity) {
        let tuning = world.tuning;
        let now = world.now_ms;
        let def = entity.def();
        let mut value = def.value;

        match def.catch_rule {
            CatchRule::Mystery => {
                if world.rng.random_bool(tuning.mystery_bonus_chance) {
                    value = world
                        .rng
                        .random_range(tuning.mystery_bonus_min..=tuning.mystery_bonus_max);
                } else {
                    let removed = world.pool.prune(|e| e.is_trash());
                    let until = now + tuning.trash_purge_ms;
                    *world.trash_suppressed_until = world.trash_suppressed_until.max(until);
                    log::info!("Mystery bag purged {} trash", removed);
                    world.events.push(GameEvent::TrashPurged {
                        removed,
                        until_ms: until,
                    });
                }
            }
            CatchRule::Electric => {
                let immune = world.progression.effect_active(EffectKind::SuperNet, now);
                if !immune && self.disable_reason != DisableReason::Severed {
                    let until = now + tuning.numbed_ms;
                    self.disable(DisableReason::Numbed, until);
                    log::debug!("Claw {} numbed until {:.0}", self.index, until);
                    world.events.push(GameEvent::ClawNumbed {
                        claw: self.index,
                        until_ms: until,
                    });
                }
            }
            CatchRule::Plain | CatchRule::Pincher => {}
        }

        if world.progression.effect_active(EffectKind::DoubleCoins, now) {
            value = value.saturating_mul(2);
        }
        world.events.push(GameEvent::Caught {
            claw: self.index,
            kind: entity.kind,
            value,
        });
    }

    fn carry_held(&mut self, tip: Vec2) {
        for entity in &mut self.held {
            entity.pos = tip;
        }
    }
}
