//! Move history and the anti-oscillation resolver.
//!
//! Two adjacent tiles that keep swapping places burn turns without gaining
//! ground. The history keeps the last few rounds of committed directions
//! per location; before the driver picks from a candidate set, directions
//! that would exactly reverse the neighbor's recorded move into our tile
//! are filtered out. Only the turn driver touches this state, once per
//! turn, after the parallel phase has joined.

use std::collections::{HashMap, VecDeque};

use crate::map::{Direction, GameMap, Location, Move};

/// Bounded record of recent rounds' committed directions per location.
#[derive(Debug, Clone)]
pub struct MoveHistory {
    depth: usize,
    rounds: VecDeque<HashMap<Location, Direction>>,
}

impl MoveHistory {
    /// Creates an empty history remembering up to `depth` rounds
    /// (clamped to 1..=3).
    pub fn new(depth: usize) -> MoveHistory {
        MoveHistory {
            depth: depth.clamp(1, 3),
            rounds: VecDeque::new(),
        }
    }

    /// Appends one turn's final move set, evicting the oldest round once
    /// the depth bound is exceeded.
    pub fn record_round(&mut self, moves: &[Move]) {
        let mut round = HashMap::with_capacity(moves.len());
        for m in moves {
            round.insert(m.location, m.direction);
        }
        if self.rounds.len() == self.depth {
            self.rounds.pop_front();
        }
        self.rounds.push_back(round);
    }

    /// Returns whether moving from `loc` in `direction` would undo a
    /// recorded move: the neighbor one step away committed the exact
    /// opposite direction (into our tile) in a tracked round.
    fn reverses_neighbor(&self, map: &GameMap, loc: Location, direction: Direction) -> bool {
        if direction == Direction::Still {
            return false;
        }
        let neighbor = map.step(loc, direction);
        let reverse = direction.opposite();
        self.rounds
            .iter()
            .any(|round| round.get(&neighbor) == Some(&reverse))
    }

    /// Removes candidates that would reverse a neighbor's recorded move.
    /// May return an empty set; the driver resolves that to STILL.
    pub fn filter_reversals(
        &self,
        map: &GameMap,
        loc: Location,
        candidates: Vec<Direction>,
    ) -> Vec<Direction> {
        candidates
            .into_iter()
            .filter(|&d| !self.reverses_neighbor(map, loc, d))
            .collect()
    }
}
