//! Spawn selection and placement
//!
//! Picks which kind enters the ocean next and where it appears. Selection is
//! a filtered, rarity-weighted draw followed by a few trash re-roll rules;
//! the re-roll picks uniformly among clean candidates and ignores rarity.

use glam::Vec2;
use rand::Rng;

use super::catalog::{CATALOG, EntityKind, EntityType, Movement, SpawnPath, Weather};
use super::entity::Entity;
use crate::is_night_hour;
use crate::tuning::Tuning;

/// Everything the selector needs to know about the current moment
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub weather: Weather,
    /// In-game hour [0, 24)
    pub hour: f32,
    pub super_bait: bool,
    pub frenzy: bool,
    /// Inside a mystery-bag purge window
    pub trash_suppressed: bool,
    pub trash_on_screen: usize,
    pub trash_filter_level: u32,
    pub unlocked: &'a [EntityKind],
}

/// Random-path kinds surviving the deterministic filters
///
/// `drop_trash` removes all trash (the caller rolls the trash filter).
pub fn candidates(ctx: &SpawnContext<'_>, drop_trash: bool) -> Vec<&'static EntityType> {
    let night = is_night_hour(ctx.hour);
    CATALOG
        .iter()
        .filter(|t| t.path == SpawnPath::Random)
        .filter(|t| !(t.is_trash && (ctx.super_bait || drop_trash)))
        .filter(|t| t.allows_weather(ctx.weather))
        .filter(|t| !t.night_only || night)
        .filter(|t| !t.discoverable || ctx.unlocked.contains(&t.kind))
        .collect()
}

/// Weather-exclusive random-path kinds, used during a fish frenzy
pub fn frenzy_pool() -> Vec<&'static EntityType> {
    CATALOG
        .iter()
        .filter(|t| t.path == SpawnPath::Random && t.is_weather_exclusive())
        .collect()
}

/// Rarity-weighted draw; `pool` must be non-empty
pub fn weighted_pick<R: Rng>(
    pool: &[&'static EntityType],
    weights: &[u32; 4],
    rng: &mut R,
) -> &'static EntityType {
    let total: u32 = pool.iter().map(|t| t.rarity.weight(weights)).sum();
    let mut roll = rng.random_range(0..total);
    for &ty in pool {
        let w = ty.rarity.weight(weights);
        if roll < w {
            return ty;
        }
        roll -= w;
    }
    // Unreachable while total is the sum of the same weights
    pool[pool.len() - 1]
}

/// Selector state carried across frames
#[derive(Debug, Clone, Default)]
pub struct SpawnSelector {
    /// When the reserved legendary was last forced in (ms)
    pub last_forced_ms: f64,
}

impl SpawnSelector {
    /// Choose the next kind to spawn
    pub fn select_type<R: Rng>(
        &mut self,
        ctx: &SpawnContext<'_>,
        tuning: &Tuning,
        rng: &mut R,
        now_ms: f64,
    ) -> EntityKind {
        if ctx.weather == Weather::Rainbow
            && now_ms - self.last_forced_ms >= tuning.legendary_interval_ms
        {
            self.last_forced_ms = now_ms;
            log::info!("Rainbow legendary forced in");
            return EntityKind::RESERVED_LEGENDARY;
        }

        if ctx.frenzy {
            let pool = frenzy_pool();
            if !pool.is_empty() {
                return pool[rng.random_range(0..pool.len())].kind;
            }
        }

        let drop_trash = rng.random_bool(tuning.trash_reduction(ctx.trash_filter_level));
        let pool = candidates(ctx, drop_trash);
        if pool.is_empty() {
            log::error!(
                "No spawn candidates (weather={}, hour={:.1}); using fallback",
                ctx.weather.as_str(),
                ctx.hour
            );
            return EntityKind::FALLBACK;
        }

        let picked = weighted_pick(&pool, &tuning.rarity_weights, rng);
        let reroll = picked.is_trash
            && (ctx.trash_suppressed || ctx.super_bait || ctx.trash_on_screen >= tuning.trash_cap);
        if reroll {
            let clean: Vec<_> = pool.iter().filter(|t| !t.is_trash).collect();
            if !clean.is_empty() {
                return clean[rng.random_range(0..clean.len())].kind;
            }
        }
        picked.kind
    }
}

/// Depth drawn from the type's band, clamped to the safe range
pub fn spawn_depth<R: Rng>(def: &EntityType, tuning: &Tuning, rng: &mut R) -> f32 {
    let (min, max) = def.depth;
    let frac = if max > min {
        rng.random_range(min..max)
    } else {
        min
    };
    (frac * tuning.field_height).clamp(tuning.safe_top(), tuning.safe_bottom())
}

/// Swimmer entering from a random side edge
pub fn place_swimmer<R: Rng>(id: u32, kind: EntityKind, tuning: &Tuning, rng: &mut R) -> Entity {
    let def = kind.def();
    let from_left = rng.random_bool(0.5);
    let (x, vx) = if from_left {
        (-def.width / 2.0, def.speed)
    } else {
        (tuning.field_width + def.width / 2.0, -def.speed)
    };
    let y = spawn_depth(def, tuning, rng);
    let mut entity = Entity::new(id, kind, Vec2::new(x, y), Vec2::new(vx, 0.0));
    if matches!(def.movement, Movement::Bob { .. }) {
        entity.phase = rng.random_range(0.0..std::f32::consts::TAU);
    }
    entity
}

/// Stationary item resting on the sea floor
pub fn place_stationary<R: Rng>(
    id: u32,
    kind: EntityKind,
    tuning: &Tuning,
    rng: &mut R,
) -> Entity {
    let x = rng.random_range(0.1f32..0.9) * tuning.field_width;
    let y = spawn_depth(kind.def(), tuning, rng);
    Entity::new(id, kind, Vec2::new(x, y), Vec2::ZERO)
}

/// Item dropped from above the sky line
pub fn place_sky_drop<R: Rng>(id: u32, kind: EntityKind, tuning: &Tuning, rng: &mut R) -> Entity {
    let def = kind.def();
    let x = rng.random_range(0.1f32..0.9) * tuning.field_width;
    Entity::new(id, kind, Vec2::new(x, -def.height), Vec2::ZERO)
}
