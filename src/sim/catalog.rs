//! Static entity catalog
//!
//! Every catchable thing in the ocean is an `EntityKind`. Type-specific
//! behaviour (movement quirks, what happens on catch, how it enters the
//! field) is data on the matching `EntityType`, so adding a kind without a
//! catalog row fails to compile.

use serde::{Deserialize, Serialize};

use super::spawn::{SpawnContext, candidates};
use crate::error::ContentError;

/// Rarity tier, drives spawn weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// Spawn weight from the tuning table (common, uncommon, rare, legendary)
    pub fn weight(self, weights: &[u32; 4]) -> u32 {
        weights[self as usize]
    }
}

/// Global weather mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Storm,
    Fog,
    Snow,
    /// Only reachable through overrides (consumables, codes)
    Rainbow,
}

impl Weather {
    pub const ALL: [Weather; 6] = [
        Weather::Clear,
        Weather::Rain,
        Weather::Storm,
        Weather::Fog,
        Weather::Snow,
        Weather::Rainbow,
    ];

    /// States the natural weather cycle can roll into
    pub const NATURAL: [Weather; 4] = [Weather::Rain, Weather::Storm, Weather::Fog, Weather::Snow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Storm => "storm",
            Weather::Fog => "fog",
            Weather::Snow => "snow",
            Weather::Rainbow => "rainbow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clear" | "sunny" => Some(Weather::Clear),
            "rain" => Some(Weather::Rain),
            "storm" => Some(Weather::Storm),
            "fog" => Some(Weather::Fog),
            "snow" => Some(Weather::Snow),
            "rainbow" => Some(Weather::Rainbow),
            _ => None,
        }
    }
}

/// Per-type movement quirk applied by the entity pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    /// Constant horizontal swim
    Straight,
    /// Horizontal swim with a sinusoidal depth wobble
    Bob { amplitude: f32, frequency: f32 },
    /// Falls under gravity, sinks slowly once under water, rests on the floor
    Sink,
    /// Never moves
    Stationary,
}

/// What happens when a claw lands this type on the boat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchRule {
    /// Pays its value
    Plain,
    /// Resolves to a coin bonus or a trash purge
    Mystery,
    /// Numbs the claw that caught it (unless netted)
    Electric,
    /// Severs the claw on contact; never caught
    Pincher,
}

/// How a type enters the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPath {
    /// Weighted random spawner
    Random,
    /// Placed on the sea floor by the stationary placer
    Stationary,
    /// Dropped from the sky on a cadence
    SkyDrop,
    /// Injected on a fixed interval during its weather
    Forced,
}

/// Closed set of entity kinds; discriminant indexes `CATALOG`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Sardine,
    Anchovy,
    Clownfish,
    Mackerel,
    Pufferfish,
    Squid,
    Salmon,
    Swordfish,
    Octopus,
    Marlin,
    Lanternfish,
    Anglerfish,
    RainTetra,
    ThunderRay,
    Ghostfish,
    IceCod,
    PrismTrout,
    GoldenKoi,
    Coelacanth,
    OldBoot,
    TinCan,
    PlasticBag,
    MysteryBag,
    ElectricEel,
    PincherCrab,
    TreasureChest,
    SupplyCrate,
}

impl EntityKind {
    pub const COUNT: usize = 27;

    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::Sardine,
        EntityKind::Anchovy,
        EntityKind::Clownfish,
        EntityKind::Mackerel,
        EntityKind::Pufferfish,
        EntityKind::Squid,
        EntityKind::Salmon,
        EntityKind::Swordfish,
        EntityKind::Octopus,
        EntityKind::Marlin,
        EntityKind::Lanternfish,
        EntityKind::Anglerfish,
        EntityKind::RainTetra,
        EntityKind::ThunderRay,
        EntityKind::Ghostfish,
        EntityKind::IceCod,
        EntityKind::PrismTrout,
        EntityKind::GoldenKoi,
        EntityKind::Coelacanth,
        EntityKind::OldBoot,
        EntityKind::TinCan,
        EntityKind::PlasticBag,
        EntityKind::MysteryBag,
        EntityKind::ElectricEel,
        EntityKind::PincherCrab,
        EntityKind::TreasureChest,
        EntityKind::SupplyCrate,
    ];

    /// Fallback when a spawn context filters everything out
    pub const FALLBACK: EntityKind = EntityKind::Sardine;

    /// Legendary injected on an interval during rainbow weather
    pub const RESERVED_LEGENDARY: EntityKind = EntityKind::GoldenKoi;

    /// Static catalog entry for this kind
    #[inline]
    pub fn def(self) -> &'static EntityType {
        &CATALOG[self as usize]
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityType {
    pub kind: EntityKind,
    pub name: &'static str,
    pub rarity: Rarity,
    /// Slows retraction when held
    pub weight: f32,
    pub value: u32,
    /// Horizontal swim speed (px/s); 0 for things that never swim
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    /// Valid depth band as fractions of the field height
    pub depth: (f32, f32),
    pub is_trash: bool,
    /// Empty means any weather
    pub required_weather: &'static [Weather],
    pub night_only: bool,
    /// Must be unlocked before it can spawn
    pub discoverable: bool,
    pub movement: Movement,
    pub catch_rule: CatchRule,
    pub path: SpawnPath,
}

impl EntityType {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        kind: EntityKind,
        name: &'static str,
        rarity: Rarity,
        weight: f32,
        value: u32,
        speed: f32,
        size: (f32, f32),
        depth: (f32, f32),
    ) -> Self {
        Self {
            kind,
            name,
            rarity,
            weight,
            value,
            speed,
            width: size.0,
            height: size.1,
            depth,
            is_trash: false,
            required_weather: &[],
            night_only: false,
            discoverable: false,
            movement: Movement::Straight,
            catch_rule: CatchRule::Plain,
            path: SpawnPath::Random,
        }
    }

    const fn trash(mut self) -> Self {
        self.is_trash = true;
        self
    }

    const fn weather(mut self, weather: &'static [Weather]) -> Self {
        self.required_weather = weather;
        self
    }

    const fn night(mut self) -> Self {
        self.night_only = true;
        self
    }

    const fn locked(mut self) -> Self {
        self.discoverable = true;
        self
    }

    const fn moves(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    const fn on_catch(mut self, rule: CatchRule) -> Self {
        self.catch_rule = rule;
        self
    }

    const fn enters(mut self, path: SpawnPath) -> Self {
        self.path = path;
        self
    }

    pub fn is_weather_exclusive(&self) -> bool {
        !self.required_weather.is_empty()
    }

    pub fn allows_weather(&self, weather: Weather) -> bool {
        self.required_weather.is_empty() || self.required_weather.contains(&weather)
    }

    pub fn is_hazard(&self) -> bool {
        self.catch_rule == CatchRule::Pincher
    }
}

const fn bob(amplitude: f32, frequency: f32) -> Movement {
    Movement::Bob {
        amplitude,
        frequency,
    }
}

use EntityKind as K;
use Rarity::{Common, Legendary, Rare, Uncommon};

/// The content table, indexed by `EntityKind as usize`
pub static CATALOG: [EntityType; EntityKind::COUNT] = [
    EntityType::new(K::Sardine, "Sardine", Common, 1.0, 5, 90.0, (36.0, 18.0), (0.25, 0.55)),
    EntityType::new(K::Anchovy, "Anchovy", Common, 1.0, 4, 120.0, (30.0, 14.0), (0.2, 0.5)),
    EntityType::new(K::Clownfish, "Clownfish", Common, 1.5, 8, 70.0, (34.0, 24.0), (0.35, 0.7))
        .moves(bob(6.0, 2.0)),
    EntityType::new(K::Mackerel, "Mackerel", Common, 2.0, 10, 110.0, (48.0, 20.0), (0.3, 0.65)),
    EntityType::new(K::Pufferfish, "Pufferfish", Uncommon, 3.0, 25, 45.0, (40.0, 36.0), (0.4, 0.8))
        .moves(bob(10.0, 1.2)),
    EntityType::new(K::Squid, "Squid", Uncommon, 2.5, 30, 80.0, (30.0, 50.0), (0.5, 0.85))
        .moves(bob(14.0, 0.8)),
    EntityType::new(K::Salmon, "Salmon", Uncommon, 4.0, 35, 100.0, (60.0, 26.0), (0.3, 0.7)),
    EntityType::new(K::Swordfish, "Swordfish", Rare, 8.0, 120, 160.0, (100.0, 30.0), (0.3, 0.6)),
    EntityType::new(K::Octopus, "Octopus", Rare, 6.0, 100, 40.0, (60.0, 60.0), (0.7, 0.95))
        .moves(bob(8.0, 0.6)),
    EntityType::new(K::Marlin, "Marlin", Legendary, 15.0, 500, 180.0, (130.0, 40.0), (0.25, 0.5)),
    EntityType::new(K::Lanternfish, "Lanternfish", Uncommon, 1.5, 40, 60.0, (34.0, 22.0), (0.6, 0.95))
        .night(),
    EntityType::new(K::Anglerfish, "Anglerfish", Rare, 5.0, 150, 35.0, (54.0, 44.0), (0.75, 0.98))
        .night(),
    EntityType::new(K::RainTetra, "Rain Tetra", Uncommon, 1.0, 45, 95.0, (28.0, 16.0), (0.2, 0.5))
        .weather(&[Weather::Rain, Weather::Storm]),
    EntityType::new(K::ThunderRay, "Thunder Ray", Rare, 7.0, 180, 85.0, (80.0, 50.0), (0.5, 0.9))
        .weather(&[Weather::Storm])
        .moves(bob(12.0, 0.9)),
    EntityType::new(K::Ghostfish, "Ghostfish", Rare, 2.0, 160, 50.0, (44.0, 30.0), (0.4, 0.8))
        .weather(&[Weather::Fog])
        .moves(bob(18.0, 0.5)),
    EntityType::new(K::IceCod, "Ice Cod", Uncommon, 3.5, 55, 65.0, (52.0, 24.0), (0.3, 0.75))
        .weather(&[Weather::Snow]),
    EntityType::new(K::PrismTrout, "Prism Trout", Rare, 3.0, 220, 120.0, (50.0, 22.0), (0.25, 0.6))
        .weather(&[Weather::Rainbow]),
    EntityType::new(K::GoldenKoi, "Golden Koi", Legendary, 6.0, 1000, 75.0, (70.0, 36.0), (0.3, 0.6))
        .weather(&[Weather::Rainbow])
        .enters(SpawnPath::Forced),
    EntityType::new(K::Coelacanth, "Coelacanth", Legendary, 12.0, 800, 55.0, (110.0, 44.0), (0.8, 0.98))
        .locked(),
    EntityType::new(K::OldBoot, "Old Boot", Common, 3.0, 1, 30.0, (34.0, 30.0), (0.5, 0.95))
        .trash(),
    EntityType::new(K::TinCan, "Tin Can", Common, 1.0, 1, 40.0, (20.0, 26.0), (0.3, 0.9))
        .trash(),
    EntityType::new(K::PlasticBag, "Plastic Bag", Common, 0.5, 0, 25.0, (30.0, 34.0), (0.15, 0.6))
        .trash()
        .moves(bob(20.0, 0.4)),
    EntityType::new(K::MysteryBag, "Mystery Bag", Uncommon, 2.0, 0, 50.0, (32.0, 32.0), (0.3, 0.8))
        .on_catch(CatchRule::Mystery),
    EntityType::new(K::ElectricEel, "Electric Eel", Uncommon, 4.0, 60, 90.0, (90.0, 20.0), (0.4, 0.85))
        .on_catch(CatchRule::Electric),
    EntityType::new(K::PincherCrab, "Pincher Crab", Uncommon, 3.0, 0, 55.0, (44.0, 30.0), (0.85, 0.98))
        .on_catch(CatchRule::Pincher),
    EntityType::new(K::TreasureChest, "Treasure Chest", Rare, 10.0, 300, 0.0, (56.0, 44.0), (1.0, 1.0))
        .moves(Movement::Stationary)
        .enters(SpawnPath::Stationary),
    EntityType::new(K::SupplyCrate, "Supply Crate", Uncommon, 5.0, 150, 0.0, (44.0, 40.0), (0.0, 1.0))
        .moves(Movement::Sink)
        .enters(SpawnPath::SkyDrop),
];

/// Startup self-check of the content table
///
/// Verifies row alignment and per-row sanity, then walks every weather x
/// day/night x super-bait combination with worst-case trash filtering and
/// nothing unlocked, requiring a non-empty random spawn pool each time.
pub fn validate() -> Result<(), ContentError> {
    for (index, (ty, &expected)) in CATALOG.iter().zip(EntityKind::ALL.iter()).enumerate() {
        if ty.kind != expected || expected as usize != index {
            return Err(ContentError::Misaligned {
                index,
                expected,
                found: ty.kind,
            });
        }
        if ty.weight <= 0.0 || !ty.weight.is_finite() {
            return Err(ContentError::NonPositiveWeight(ty.kind));
        }
        let (min, max) = ty.depth;
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(ContentError::InvalidDepthBand(ty.kind));
        }
    }

    for weather in Weather::ALL {
        for (night, hour) in [(false, 12.0), (true, 23.0)] {
            for super_bait in [false, true] {
                let ctx = SpawnContext {
                    weather,
                    hour,
                    super_bait,
                    frenzy: false,
                    trash_suppressed: false,
                    trash_on_screen: 0,
                    unlocked: &[],
                    trash_filter_level: 1,
                };
                if candidates(&ctx, true).is_empty() {
                    log::error!(
                        "Empty spawn pool: weather={} night={} super_bait={}",
                        weather.as_str(),
                        night,
                        super_bait
                    );
                    return Err(ContentError::EmptySpawnPool {
                        weather,
                        night,
                        super_bait,
                    });
                }
            }
        }
    }
    Ok(())
}
