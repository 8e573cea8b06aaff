//! Per-frame simulation tick
//!
//! The host calls `tick` once per animation frame with a wall-clock
//! timestamp. Everything inside runs in a fixed order so that a seed and an
//! input stream always replay the same session.

use super::catalog::EntityKind;
use super::claw::{ClawWorld, claw_eligible};
use super::effects::{EffectKind, Progression};
use super::events::GameEvent;
use super::spawn::{SpawnContext, place_sky_drop, place_swimmer};
use super::state::GameState;
use crate::clamp_frame_delta;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire every eligible idle claw (click/tap/space)
    pub shoot: bool,
    /// Tab hidden or a modal is open
    pub paused: bool,
}

/// Advance the game by one frame ending at `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, progression: &Progression, now_ms: f64) {
    let dt_ms = match state.last_tick_ms {
        Some(last) => clamp_frame_delta(now_ms - last),
        None => {
            state.start_clock(now_ms);
            0.0
        }
    };
    state.last_tick_ms = Some(now_ms);

    // Paused frames only move the timestamp
    if input.paused {
        return;
    }
    state.frame += 1;
    let dt = (dt_ms / 1000.0) as f32;

    update_environment(state, progression, now_ms, dt_ms);
    spawn_entities(state, progression, now_ms, dt_ms);

    state.pool.update(dt, &state.tuning);
    let pruned = state.pool.prune_off_bounds(&state.tuning);
    if pruned > 0 {
        log::trace!("Pruned {} entities off screen", pruned);
    }

    if input.shoot {
        for claw in &mut state.claws {
            let eligible = claw_eligible(claw.index, progression, now_ms);
            if claw.try_shoot(now_ms, eligible) {
                state.events.push(GameEvent::ClawReleased { claw: claw.index });
            }
        }
    }

    // Claws in index order; earlier claws win contested entities
    let GameState {
        tuning,
        rng,
        pool,
        claws,
        combo,
        events,
        trash_suppressed_until,
        ..
    } = state;
    for claw in claws.iter_mut() {
        let eligible = claw_eligible(claw.index, progression, now_ms);
        let mut world = ClawWorld {
            tuning,
            progression,
            pool: &mut *pool,
            combo: &mut *combo,
            events: &mut *events,
            rng: &mut *rng,
            trash_suppressed_until: &mut *trash_suppressed_until,
            now_ms,
            dt,
        };
        claw.step(&mut world, eligible);
    }
}

/// Day clock, weather cadences, combo timeout and passive income
fn update_environment(state: &mut GameState, progression: &Progression, now_ms: f64, dt_ms: f64) {
    state.environment.advance(dt_ms, &state.tuning);

    if state.override_cadence.due(now_ms) {
        let change = state.environment.check_override_expiry(now_ms);
        state.report_weather(change);
    }
    if state.weather_cadence.due(now_ms) {
        let change = state
            .environment
            .check_weather(&mut state.rng, &state.tuning, false);
        state.report_weather(change);
    }

    if state.combo_cadence.due(now_ms) {
        state
            .combo
            .check_timeout(now_ms, false, state.tuning.combo_timeout_ms);
    }

    if state.income_cadence.due(now_ms) && progression.passive_income > 0 {
        state.events.push(GameEvent::PassiveIncome {
            amount: progression.passive_income,
        });
    }
}

/// Random spawns, sky drops and the sea-floor treasure
fn spawn_entities(state: &mut GameState, progression: &Progression, now_ms: f64, dt_ms: f64) {
    let frenzy = progression.effect_active(EffectKind::FishFrenzy, now_ms);
    let interval = state
        .tuning
        .spawn_interval(progression.spawn_density_level, frenzy);

    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms >= interval {
        state.spawn_timer_ms = 0.0;
        if state.pool.len() < state.tuning.max_entities {
            let ctx = SpawnContext {
                weather: state.environment.weather,
                hour: state.environment.hour,
                super_bait: progression.effect_active(EffectKind::SuperBait, now_ms),
                frenzy,
                trash_suppressed: state.trash_suppressed(now_ms),
                trash_on_screen: state.pool.trash_count(),
                trash_filter_level: progression.trash_filter_level,
                unlocked: &progression.unlocked,
            };
            let kind = state
                .spawner
                .select_type(&ctx, &state.tuning, &mut state.rng, now_ms);
            let id = state.next_entity_id();
            let entity = place_swimmer(id, kind, &state.tuning, &mut state.rng);
            log::debug!("Spawned {} (#{})", entity.def().name, id);
            state.pool.spawn(entity);
        }
    }

    // One crate in the air or on the floor at a time
    if state.sky_drop_cadence.due(now_ms) && state.pool.count_kind(EntityKind::SupplyCrate) == 0
    {
        let id = state.next_entity_id();
        let supply = place_sky_drop(id, EntityKind::SupplyCrate, &state.tuning, &mut state.rng);
        state.events.push(GameEvent::SupplyDropped { x: supply.pos.x });
        state.pool.spawn(supply);
    }

    let chest_present = state.pool.count_kind(EntityKind::TreasureChest) > 0
        || state
            .claws
            .iter()
            .any(|c| c.held.iter().any(|e| e.kind == EntityKind::TreasureChest));
    match state.stationary_due_ms {
        _ if chest_present => state.stationary_due_ms = None,
        None => state.stationary_due_ms = Some(now_ms + state.tuning.stationary_respawn_ms),
        Some(due) if now_ms >= due => {
            state.stationary_due_ms = None;
            state.place_treasure();
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::catalog::Weather;
    use crate::sim::claw::ClawState;
    use crate::sim::entity::Entity;
    use glam::Vec2;

    fn run(state: &mut GameState, progression: &Progression, from_ms: f64, frames: u32) -> f64 {
        let mut now = from_ms;
        for _ in 0..frames {
            now += FRAME_MS;
            tick(state, &TickInput::default(), progression, now);
        }
        now
    }

    #[test]
    fn test_first_tick_starts_clock() {
        let mut state = GameState::new(12345);
        let progression = Progression::default();
        tick(&mut state, &TickInput::default(), &progression, 5_000.0);
        assert_eq!(state.last_tick_ms, Some(5_000.0));
        assert_eq!(state.spawner.last_forced_ms, 5_000.0);
        assert_eq!(state.environment.elapsed_ms, 0.0);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_shoot_releases_only_eligible_claws() {
        let mut state = GameState::new(12345);
        let mut progression = Progression::default();
        tick(&mut state, &TickInput::default(), &progression, 0.0);

        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &shoot, &progression, FRAME_MS);
        assert_eq!(state.claws[0].state, ClawState::Shooting);
        assert!(state.claws[1..].iter().all(|c| c.state == ClawState::Idle));
        let released: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ClawReleased { .. }))
            .collect();
        assert_eq!(released, vec![GameEvent::ClawReleased { claw: 0 }]);

        // Multi-claw fires the rest; claw 0 is already out
        progression
            .effects
            .activate(EffectKind::MultiClaw, 0.0, 60_000.0);
        tick(&mut state, &shoot, &progression, 2.0 * FRAME_MS);
        assert!(state.claws.iter().all(|c| c.state != ClawState::Idle));
        let released = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ClawReleased { .. }))
            .count();
        assert_eq!(released, state.tuning.claw_count - 1);
    }

    #[test]
    fn test_pause_only_moves_timestamp() {
        let mut state = GameState::new(12345);
        let progression = Progression::default();
        let now = run(&mut state, &progression, 0.0, 30);

        let before = state.clone();
        let paused = TickInput {
            shoot: true,
            paused: true,
        };
        tick(&mut state, &paused, &progression, now + 5_000.0);
        tick(&mut state, &paused, &progression, now + 10_000.0);

        assert_eq!(state.frame, before.frame);
        assert_eq!(state.pool.as_slice(), before.pool.as_slice());
        assert_eq!(state.claws, before.claws);
        assert_eq!(state.environment, before.environment);
        assert_eq!(state.combo, before.combo);
        assert_eq!(state.last_tick_ms, Some(now + 10_000.0));

        // No catch-up burst: the next frame's delta is clamped
        tick(&mut state, &TickInput::default(), &progression, now + 10_016.0);
        assert!((state.environment.elapsed_ms - before.environment.elapsed_ms - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_gap_is_clamped() {
        let mut state = GameState::new(1);
        let progression = Progression::default();
        tick(&mut state, &TickInput::default(), &progression, 0.0);
        tick(&mut state, &TickInput::default(), &progression, 60_000.0);
        assert_eq!(state.environment.elapsed_ms, 100.0);
    }

    #[test]
    fn test_spawns_on_interval_and_respects_cap() {
        let mut state = GameState::new(77);
        let progression = Progression::default();
        let baseline = state.pool.len();

        // Entities enter at the edges and swim for seconds, so none leave yet
        run(&mut state, &progression, 0.0, 80);
        assert!(state.pool.len() > baseline);

        let capped = crate::tuning::Tuning {
            max_entities: 1,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(77, capped).unwrap();
        run(&mut state, &progression, 0.0, 600);
        assert_eq!(state.pool.len(), 1);
    }

    #[test]
    fn test_forced_legendary_under_rainbow() {
        let mut state = GameState::new(5);
        let progression = Progression::default();
        tick(&mut state, &TickInput::default(), &progression, 0.0);
        state.force_weather(Weather::Rainbow, 0.0, 600_000.0);

        // Past the legendary interval plus a couple of spawn slots
        let span = state.tuning.legendary_interval_ms + 2.0 * state.tuning.spawn_interval_ms;
        let frames = (span / FRAME_MS) as u32;
        run(&mut state, &progression, 0.0, frames);
        assert!(
            state
                .pool
                .iter()
                .any(|e| e.kind == EntityKind::GoldenKoi)
        );
    }

    #[test]
    fn test_chest_replaced_after_delay() {
        let mut state = GameState::new(9);
        let progression = Progression::default();
        tick(&mut state, &TickInput::default(), &progression, 0.0);

        let removed = state.pool.prune(|e| e.kind == EntityKind::TreasureChest);
        assert_eq!(removed, 1);

        tick(&mut state, &TickInput::default(), &progression, FRAME_MS);
        assert_eq!(state.pool.count_kind(EntityKind::TreasureChest), 0);
        let due = state.stationary_due_ms.unwrap();
        assert_eq!(due, FRAME_MS + state.tuning.stationary_respawn_ms);

        // Skip ahead to the deadline
        state.stationary_due_ms = Some(2.0 * FRAME_MS);
        tick(&mut state, &TickInput::default(), &progression, 2.0 * FRAME_MS);
        assert_eq!(state.pool.count_kind(EntityKind::TreasureChest), 1);
        assert_eq!(state.stationary_due_ms, None);
    }

    #[test]
    fn test_sky_drop_emits_event() {
        let tuning = crate::tuning::Tuning {
            sky_drop_interval_ms: 1_000.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(3, tuning).unwrap();
        let progression = Progression::default();
        tick(&mut state, &TickInput::default(), &progression, 0.0);
        run(&mut state, &progression, 0.0, 70);

        assert_eq!(state.pool.count_kind(EntityKind::SupplyCrate), 1);
        let drops = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SupplyDropped { .. }))
            .count();
        assert_eq!(drops, 1);
    }

    #[test]
    fn test_passive_income_on_cadence() {
        let mut state = GameState::new(3);
        let progression = Progression {
            passive_income: 25,
            ..Default::default()
        };
        tick(&mut state, &TickInput::default(), &progression, 0.0);
        state.drain_events();

        // 10 s of frames at 100 ms
        let mut now = 0.0;
        for _ in 0..100 {
            now += 100.0;
            tick(&mut state, &TickInput::default(), &progression, now);
        }
        let income: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PassiveIncome { .. }))
            .collect();
        assert_eq!(income, vec![GameEvent::PassiveIncome { amount: 25 }]);
    }

    #[test]
    fn test_earlier_claw_wins_contested_entity() {
        // Cap keeps random spawns out of the way
        let tuning = crate::tuning::Tuning {
            max_entities: 1,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(11, tuning).unwrap();
        let mut progression = Progression::default();
        progression
            .effects
            .activate(EffectKind::MultiClaw, 0.0, 600_000.0);
        tick(&mut state, &TickInput::default(), &progression, 0.0);
        state.pool.prune(|_| true);

        // Claws 0 and 1 share a line straight through the marlin
        let pivot = state.claws[0].pivot;
        state.claws[1].pivot = pivot;
        for claw in &mut state.claws[..2] {
            claw.angle = 0.0;
        }
        let id = state.next_entity_id();
        let mut marlin = Entity::new(id, EntityKind::Marlin, Vec2::new(pivot.x, 300.0), Vec2::ZERO);
        marlin.base_y = 300.0;
        state.pool.spawn(marlin);

        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &shoot, &progression, FRAME_MS);
        let mut now = FRAME_MS;
        while state.claws[0].state != ClawState::Idle || state.claws[1].state != ClawState::Idle {
            now += FRAME_MS;
            tick(&mut state, &TickInput::default(), &progression, now);
            assert!(now < 60_000.0);
        }
        let caught: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Caught { claw, kind, .. } => Some((claw, kind)),
                _ => None,
            })
            .collect();
        assert_eq!(caught, vec![(0, EntityKind::Marlin)]);
    }

    #[test]
    fn test_determinism() {
        let mut progression = Progression::default();
        progression
            .effects
            .activate(EffectKind::MultiClaw, 0.0, 30_000.0);

        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let mut now = 0.0;
        for frame in 0..1_200 {
            now += FRAME_MS;
            let input = TickInput {
                shoot: frame % 45 == 0,
                paused: frame % 300 > 290,
            };
            tick(&mut state1, &input, &progression, now);
            tick(&mut state2, &input, &progression, now);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.pool.as_slice(), state2.pool.as_slice());
        assert_eq!(state1.claws, state2.claws);
        assert_eq!(state1.combo, state2.combo);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
