//! One-hop direction rankers.
//!
//! Each ranker looks at the four cardinal neighbors of an owned tile and
//! returns the set of equally-best candidate directions for one tactical
//! motive. Rankers are deterministic and never pick between tied
//! candidates; random tie-breaking belongs to the turn driver.

use crate::config::Tuning;
use crate::eval::site_value;
use crate::map::{Direction, GameMap, Location, TurnContext, CARDINALS};

/// Returns whether the site in `direction` is an attackable opponent:
/// owned by neither us nor neutral, or a neutral weak enough to walk over.
fn is_attackable(
    map: &GameMap,
    ctx: TurnContext,
    loc: Location,
    direction: Direction,
    tuning: &Tuning,
) -> bool {
    let site = map.site(loc, direction);
    site.owner != ctx.me
        && (site.owner != ctx.neutral
            || (site.strength as u16) < tuning.neutral_safety_threshold)
}

/// Directions toward attackable opponent neighbors, restricted to the
/// lowest-strength targets (cheapest kill). Ties are kept as a set.
pub fn attackable_opponents(
    map: &GameMap,
    ctx: TurnContext,
    loc: Location,
    tuning: &Tuning,
) -> Vec<Direction> {
    let mut weakest = u8::MAX;
    let mut candidates = Vec::new();
    for d in CARDINALS {
        if !is_attackable(map, ctx, loc, d, tuning) {
            continue;
        }
        let strength = map.site(loc, d).strength;
        if strength < weakest {
            weakest = strength;
            candidates.clear();
        }
        if strength == weakest {
            candidates.push(d);
        }
    }
    candidates
}

/// Directions toward neutral neighbors we can take this turn, restricted
/// to the highest-value targets. A neighbor is takeable when our strength
/// strictly exceeds its own, or when the optional strength-dump cap is
/// configured and exceeded (hoarded strength has to go somewhere).
pub fn defeatable_neutrals(
    map: &GameMap,
    ctx: TurnContext,
    loc: Location,
    tuning: &Tuning,
) -> Vec<Direction> {
    let own_strength = map.site(loc, Direction::Still).strength as u16;
    let mut best_value = i32::MIN;
    let mut candidates = Vec::new();
    for d in CARDINALS {
        let site = map.site(loc, d);
        if site.owner != ctx.neutral {
            continue;
        }
        let takeable = own_strength > site.strength as u16
            || tuning.strength_dump_cap.is_some_and(|cap| own_strength > cap);
        if !takeable {
            continue;
        }
        let value = site_value(site, tuning);
        if value > best_value {
            best_value = value;
            candidates.clear();
        }
        if value == best_value {
            candidates.push(d);
        }
    }
    candidates
}
