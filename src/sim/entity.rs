//! Live entities swimming (or sinking) through the play field

use glam::Vec2;
use serde::Serialize;

use super::catalog::{EntityKind, EntityType, Movement};
use crate::tuning::Tuning;

/// Which way a sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    Right,
}

/// A live instance of a catalog type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Sprite center
    pub pos: Vec2,
    /// x: swim speed, y: fall/sink speed (px/s)
    pub vel: Vec2,
    pub facing: Facing,
    /// Depth the bob wobble oscillates around
    pub base_y: f32,
    /// Bob phase offset (radians)
    pub phase: f32,
    /// Seconds since spawn
    pub age: f32,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        let facing = if vel.x < 0.0 { Facing::Left } else { Facing::Right };
        Self {
            id,
            kind,
            pos,
            vel,
            facing,
            base_y: pos.y,
            phase: 0.0,
            age: 0.0,
        }
    }

    #[inline]
    pub fn def(&self) -> &'static EntityType {
        self.kind.def()
    }

    pub fn is_trash(&self) -> bool {
        self.def().is_trash
    }

    /// Whether `point` is inside the forgiving hitbox (sprite box scaled down)
    pub fn contains(&self, point: Vec2, hitbox_scale: f32) -> bool {
        let def = self.def();
        let half = Vec2::new(def.width, def.height) * hitbox_scale * 0.5;
        let d = (point - self.pos).abs();
        d.x <= half.x && d.y <= half.y
    }

    /// Advance one step of this entity's movement quirk
    fn advance(&mut self, dt: f32, tuning: &Tuning) {
        self.age += dt;
        match self.def().movement {
            Movement::Straight => {
                self.pos.x += self.vel.x * dt;
            }
            Movement::Bob {
                amplitude,
                frequency,
            } => {
                self.pos.x += self.vel.x * dt;
                let wobble =
                    (self.phase + self.age * frequency * std::f32::consts::TAU).sin() * amplitude;
                self.pos.y = (self.base_y + wobble).clamp(tuning.safe_top(), tuning.safe_bottom());
            }
            Movement::Sink => {
                let floor = tuning.safe_bottom();
                if self.pos.y >= floor {
                    self.pos.y = floor;
                    self.vel.y = 0.0;
                    return;
                }
                if self.pos.y < tuning.water_line {
                    // Free fall through the air
                    self.vel.y += tuning.gravity * dt;
                } else {
                    // Water drag bleeds speed down to the sinking rate
                    let drag = tuning.sink_damping.powf(dt * 60.0);
                    self.vel.y = (self.vel.y * drag).max(tuning.sink_speed);
                }
                self.pos.y = (self.pos.y + self.vel.y * dt).min(floor);
            }
            Movement::Stationary => {}
        }
    }

    /// Swimmers that have left the field horizontally
    fn is_off_bounds(&self, tuning: &Tuning) -> bool {
        let def = self.def();
        if def.speed == 0.0 {
            return false;
        }
        let margin = def.width;
        self.pos.x < -margin || self.pos.x > tuning.field_width + margin
    }
}

/// All live entities, in spawn order
#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    entities: Vec<Entity>,
}

impl EntityPool {
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn trash_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_trash()).count()
    }

    /// Move every entity by its velocity and movement quirk
    pub fn update(&mut self, dt_secs: f32, tuning: &Tuning) {
        for entity in &mut self.entities {
            entity.advance(dt_secs, tuning);
        }
    }

    /// Remove everything matching `predicate`, returning how many went
    pub fn prune(&mut self, mut predicate: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !predicate(e));
        before - self.entities.len()
    }

    /// Drop swimmers that left the field; stationary things stay
    pub fn prune_off_bounds(&mut self, tuning: &Tuning) -> usize {
        self.prune(|e| e.is_off_bounds(tuning))
    }

    /// Remove and return a single entity
    pub fn remove(&mut self, id: u32) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Remove and return everything matching `predicate`, keeping order
    pub fn take_where(&mut self, mut predicate: impl FnMut(&Entity) -> bool) -> Vec<Entity> {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.entities.len());
        for entity in self.entities.drain(..) {
            if predicate(&entity) {
                taken.push(entity);
            } else {
                kept.push(entity);
            }
        }
        self.entities = kept;
        taken
    }

    /// First entity (spawn order) whose hitbox contains `point`
    pub fn first_hit(&self, point: Vec2, hitbox_scale: f32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.contains(point, hitbox_scale))
    }
}
