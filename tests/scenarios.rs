//! End-to-end play scenarios driven through `tick`

use glam::Vec2;

use claw_tide::Tuning;
use claw_tide::consts::FRAME_MS;
use claw_tide::sim::{
    ClawState, DisableReason, EffectKind, Entity, EntityKind, GameEvent, GameState, Progression,
    TickInput, Weather, tick,
};

const IDLE: TickInput = TickInput {
    shoot: false,
    paused: false,
};
const SHOOT: TickInput = TickInput {
    shoot: true,
    paused: false,
};

/// Started session with an empty sea and claw 0 hanging straight down
fn setup(tuning: Tuning, progression: &Progression) -> (GameState, f64) {
    let mut state = GameState::with_tuning(2024, tuning).unwrap();
    tick(&mut state, &IDLE, progression, 0.0);
    state.pool.prune(|_| true);
    state.claws[0].angle = 0.0;
    state.drain_events();
    (state, 0.0)
}

fn place(state: &mut GameState, kind: EntityKind, x: f32, y: f32) -> u32 {
    let id = state.next_entity_id();
    let mut entity = Entity::new(id, kind, Vec2::new(x, y), Vec2::ZERO);
    entity.base_y = y;
    state.pool.spawn(entity);
    id
}

/// Shoot claw 0 and run until it is idle again, collecting events
fn play_round(state: &mut GameState, progression: &Progression, mut now: f64) -> (f64, Vec<GameEvent>) {
    now += FRAME_MS;
    tick(state, &SHOOT, progression, now);
    while state.claws[0].state != ClawState::Idle {
        now += FRAME_MS;
        tick(state, &IDLE, progression, now);
        assert!(now < 60_000.0, "round never finished");
    }
    (now, state.drain_events())
}

fn caught(events: &[GameEvent]) -> Vec<(EntityKind, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Caught { kind, value, .. } => Some((*kind, *value)),
            _ => None,
        })
        .collect()
}

#[test]
fn pincher_severs_claw_for_five_seconds() {
    let tuning = Tuning {
        max_entities: 1,
        ..Default::default()
    };
    let progression = Progression::default();
    let (mut state, now) = setup(tuning, &progression);
    let x = state.claws[0].pivot.x;
    place(&mut state, EntityKind::PincherCrab, x, 400.0);

    let (now, events) = play_round(&mut state, &progression, now);
    let until = events
        .iter()
        .find_map(|e| match e {
            GameEvent::ClawSevered { claw: 0, until_ms } => Some(*until_ms),
            _ => None,
        })
        .expect("claw should be severed");
    assert_eq!(until, now + state.tuning.severed_ms);
    assert!(events.contains(&GameEvent::RoundComplete {
        claw: 0,
        caught: false
    }));
    assert!(caught(&events).is_empty());
    assert_eq!(state.pool.count_kind(EntityKind::PincherCrab), 0);
    assert_eq!(state.claws[0].disable_reason, DisableReason::Severed);
    assert_eq!(state.combo.current, 0);

    // Locked out
    let mut now = now + FRAME_MS;
    tick(&mut state, &SHOOT, &progression, now);
    assert_eq!(state.claws[0].state, ClawState::Idle);

    while now < until {
        now += 100.0;
        tick(&mut state, &IDLE, &progression, now);
    }
    tick(&mut state, &SHOOT, &progression, now + FRAME_MS);
    assert_eq!(state.claws[0].state, ClawState::Shooting);
    assert_eq!(state.claws[0].disable_reason, DisableReason::None);
}

#[test]
fn super_net_sweeps_neighbours_but_not_hazards() {
    let tuning = Tuning {
        max_entities: 3,
        ..Default::default()
    };
    let mut progression = Progression::default();
    progression
        .effects
        .activate(EffectKind::SuperNet, 0.0, 60_000.0);
    let (mut state, now) = setup(tuning, &progression);
    let x = state.claws[0].pivot.x;
    place(&mut state, EntityKind::Sardine, x, 300.0);
    place(&mut state, EntityKind::Salmon, x + 60.0, 320.0);
    place(&mut state, EntityKind::PincherCrab, x - 40.0, 300.0);

    let (_, events) = play_round(&mut state, &progression, now);
    assert_eq!(
        caught(&events),
        vec![(EntityKind::Sardine, 5), (EntityKind::Salmon, 35)]
    );
    assert_eq!(state.pool.count_kind(EntityKind::PincherCrab), 1);
    assert_eq!(state.claws[0].disable_reason, DisableReason::None);
    assert_eq!(state.combo.current, 1);
}

#[test]
fn rainbow_brings_golden_koi_then_clears() {
    let progression = Progression::default();
    let (mut state, mut now) = setup(Tuning::default(), &progression);
    state.force_weather(Weather::Rainbow, now, 15_000.0);

    let mut koi_seen = false;
    let mut events = state.drain_events();
    while now < 17_000.0 {
        now += FRAME_MS;
        tick(&mut state, &IDLE, &progression, now);
        koi_seen |= state.pool.count_kind(EntityKind::GoldenKoi) > 0;
        events.extend(state.drain_events());
    }

    assert!(koi_seen, "golden koi should be forced under a rainbow");
    assert_eq!(state.environment.weather, Weather::Clear);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::WeatherChanged { .. }))
            .collect::<Vec<_>>(),
        vec![
            &GameEvent::WeatherChanged {
                from: Weather::Clear,
                to: Weather::Rainbow
            },
            &GameEvent::WeatherChanged {
                from: Weather::Rainbow,
                to: Weather::Clear
            },
        ]
    );
}

#[test]
fn mystery_bag_purge_keeps_trash_away() {
    let tuning = Tuning {
        mystery_bonus_chance: 0.0,
        ..Default::default()
    };
    let progression = Progression {
        spawn_density_level: 10,
        ..Default::default()
    };
    let (mut state, now) = setup(tuning, &progression);
    let x = state.claws[0].pivot.x;
    place(&mut state, EntityKind::MysteryBag, x, 250.0);
    place(&mut state, EntityKind::OldBoot, 100.0, 500.0);
    place(&mut state, EntityKind::TinCan, 850.0, 600.0);

    let (mut now, events) = play_round(&mut state, &progression, now);
    assert_eq!(caught(&events), vec![(EntityKind::MysteryBag, 0)]);
    let until = events
        .iter()
        .find_map(|e| match e {
            GameEvent::TrashPurged { removed, until_ms } => {
                assert_eq!(*removed, 2);
                Some(*until_ms)
            }
            _ => None,
        })
        .expect("bag should purge trash");
    assert_eq!(state.pool.trash_count(), 0);

    // Dense spawning for the whole window, still no trash
    let spawned_before = state.next_entity_id();
    while now + FRAME_MS < until {
        now += FRAME_MS;
        tick(&mut state, &IDLE, &progression, now);
        assert_eq!(state.pool.trash_count(), 0);
    }
    assert!(state.next_entity_id() > spawned_before + 10);
}

#[test]
fn combo_builds_and_times_out() {
    let tuning = Tuning {
        max_entities: 2,
        ..Default::default()
    };
    let progression = Progression::default();
    let (mut state, mut now) = setup(tuning, &progression);
    let x = state.claws[0].pivot.x;

    for _ in 0..3 {
        state.claws[0].angle = 0.0;
        place(&mut state, EntityKind::Anchovy, x, 260.0);
        let (end, events) = play_round(&mut state, &progression, now);
        assert_eq!(caught(&events), vec![(EntityKind::Anchovy, 4)]);
        now = end;
    }
    assert_eq!(state.combo.current, 3);
    assert_eq!(state.combo.max, 3);

    // Claw 0 keeps swaying; nobody shoots for a while
    let last_catch = state.combo.last_catch_ms;
    while now < last_catch + 12_000.0 {
        now += 100.0;
        tick(&mut state, &IDLE, &progression, now);
    }
    assert_eq!(state.combo.current, 0);
    assert_eq!(state.combo.max, 3);
}
