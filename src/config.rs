//! Tuning configuration.
//!
//! The heuristic constants that varied across historical revisions of the
//! bot are collected here as one serde-deserializable struct, so a
//! parameter set can be swapped via a JSON file instead of editing code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far a directional ray may walk before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayBound {
    /// Half the relevant grid dimension, rounded up.
    HalfDim,
    /// A fixed tile count.
    Fixed(u16),
}

impl RayBound {
    /// Resolves the bound against a grid dimension.
    pub fn limit(self, dim: u16) -> u16 {
        match self {
            RayBound::HalfDim => dim / 2 + 1,
            RayBound::Fixed(n) => n,
        }
    }
}

/// Heuristic constants for the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tiles below this strength always hold.
    pub min_move_strength: u16,
    /// Neutral neighbors below this strength count as attackable.
    pub neutral_safety_threshold: u16,
    /// A tile roams once its strength exceeds production times this factor.
    pub production_factor: u16,
    /// Absolute strength above which a tile roams regardless of production.
    pub strength_cap: u16,
    /// Optional strength-dump rule: above this, adjacent neutrals are
    /// conquest targets no matter their strength. Off by default.
    pub strength_dump_cap: Option<u16>,
    /// Exponent on production in the site value (2 or 3).
    pub production_exponent: u32,
    /// Distance bound for ray-cast searches.
    pub ray_bound: RayBound,
    /// How many previous rounds the anti-oscillation resolver remembers
    /// (clamped to 1..=3).
    pub history_depth: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            min_move_strength: 5,
            neutral_safety_threshold: 3,
            production_factor: 4,
            strength_cap: 50,
            strength_dump_cap: None,
            production_exponent: 2,
            ray_bound: RayBound::HalfDim,
            history_depth: 1,
        }
    }
}

/// Errors that can occur while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Tuning {
    /// Loads a tuning set from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Tuning, TuningError> {
        let text = fs::read_to_string(path)?;
        let mut tuning: Tuning = serde_json::from_str(&text)?;
        tuning.history_depth = tuning.history_depth.clamp(1, 3);
        Ok(tuning)
    }
}
