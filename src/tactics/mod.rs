//! Tactical direction selection.
//!
//! One-hop rankers, bounded ray casts, and the anti-oscillation move
//! history. Everything here except `MoveHistory` is a pure function over
//! the immutable turn snapshot, returning candidate direction *sets*;
//! tie-breaking is the turn driver's job.

pub mod history;
pub mod rankers;
pub mod raycast;

pub use history::MoveHistory;
pub use rankers::{attackable_opponents, defeatable_neutrals};
pub use raycast::{closest_enemy, richest_distant_neutral};
