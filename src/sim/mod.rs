//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! reproducible:
//! - Seeded RNG only
//! - Time comes in as host timestamps, never read from a clock
//! - Stable iteration order (spawn order for entities, index order for claws)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod claw;
pub mod combo;
pub mod effects;
pub mod entity;
pub mod environment;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{CATALOG, CatchRule, EntityKind, EntityType, Movement, Rarity, SpawnPath, Weather};
pub use claw::{Claw, ClawState, DisableReason};
pub use combo::ComboTracker;
pub use effects::{ActiveEffects, EffectKind, Progression};
pub use entity::{Entity, EntityPool, Facing};
pub use environment::Environment;
pub use events::{EventQueue, GameEvent};
pub use spawn::{SpawnContext, SpawnSelector};
pub use state::{GameState, Snapshot};
pub use tick::{TickInput, tick};
