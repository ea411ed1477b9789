//! Toroidal map representation.
//!
//! Contains the core value types for locations, directions, sites, and
//! moves, plus the immutable per-turn `GameMap` snapshot.

pub mod grid;
pub mod location;
pub mod site;

pub use grid::{GameMap, TurnContext};
pub use location::{Direction, Location, Move, CARDINALS};
pub use site::{OwnerId, Site};
