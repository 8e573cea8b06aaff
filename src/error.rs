//! Error types
//!
//! The per-frame simulation never fails. Errors only surface while loading
//! tuning or validating the content catalog at startup.

use thiserror::Error;

use crate::sim::catalog::{EntityKind, Weather};

/// Defects in the static entity catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    #[error("catalog slot {index} holds {found:?}, expected {expected:?}")]
    Misaligned {
        index: usize,
        expected: EntityKind,
        found: EntityKind,
    },
    #[error("{0:?} has a non-positive weight")]
    NonPositiveWeight(EntityKind),
    #[error("{0:?} has an invalid depth band")]
    InvalidDepthBand(EntityKind),
    #[error("no spawn candidates for weather {weather:?} (night: {night}, super bait: {super_bait})")]
    EmptySpawnPool {
        weather: Weather,
        night: bool,
        super_bait: bool,
    },
}

/// Failures loading or checking a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value out of range: {0}")]
    OutOfRange(&'static str),
}

/// Bad input from the JS host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("unknown weather: {0}")]
    UnknownWeather(String),
    #[error("bad progression snapshot: {0}")]
    Progression(#[from] serde_json::Error),
}
