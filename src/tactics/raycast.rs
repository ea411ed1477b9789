//! Bounded directional ray casts.
//!
//! A one-hop scan cannot see across a multi-tile grid, so tiles with
//! surplus strength look down each cardinal axis for distant targets and
//! start walking many turns before contact. Each of the four rays is
//! walked independently and never past the configured bound; directions
//! are compared by distance first, then target score, with ties collected
//! into a candidate set exactly like the one-hop rankers.

use crate::config::Tuning;
use crate::eval::approach_value;
use crate::map::{Direction, GameMap, Location, TurnContext, CARDINALS};

/// Directions toward the closest opponent tile visible along a cardinal
/// ray. A ray ends at the first tile not owned by us: an opponent there is
/// a candidate at its distance, a neutral blocks the view. Returns the
/// minimum-distance tie set, empty when no opponent is visible.
pub fn closest_enemy(
    map: &GameMap,
    ctx: TurnContext,
    origin: Location,
    tuning: &Tuning,
) -> Vec<Direction> {
    let bound = tuning.ray_bound.limit(map.height());
    let mut closest = u16::MAX;
    let mut candidates = Vec::new();

    for d in CARDINALS {
        let mut current = origin;
        for distance in 1..=bound {
            current = map.step(current, d);
            let owner = map.site(current, Direction::Still).owner;
            if owner == ctx.me {
                continue;
            }
            if owner != ctx.neutral {
                if distance < closest {
                    closest = distance;
                    candidates.clear();
                }
                if distance == closest {
                    candidates.push(d);
                }
            }
            break;
        }
    }
    candidates
}

/// Directions toward the best distant neutral a ray can actually take.
///
/// Walking outward, the ray carries a cumulative mass seeded with the
/// origin's own strength, as if reinforcements flowed along the line:
/// our own tiles and low-strength neutrals en route are absorbed into it.
/// The first productive neutral beyond the immediate neighbors is the
/// ray's target; it qualifies only if the accumulated mass strictly
/// exceeds its strength. An opponent tile, or a neutral too strong to
/// absorb, stops the walk. Returns the maximum-score tie set, scoring
/// each target by its approach value discounted by distance squared.
pub fn richest_distant_neutral(
    map: &GameMap,
    ctx: TurnContext,
    origin: Location,
    tuning: &Tuning,
) -> Vec<Direction> {
    let bound = tuning.ray_bound.limit(map.width());
    let mut best_score = i32::MIN;
    let mut candidates = Vec::new();

    for d in CARDINALS {
        let mut current = origin;
        let mut mass = map.site(origin, Direction::Still).strength as u32;
        for distance in 1..=bound {
            current = map.step(current, d);
            let site = map.site(current, Direction::Still);
            if site.owner == ctx.me {
                mass += site.strength as u32;
                continue;
            }
            if site.owner != ctx.neutral {
                break;
            }
            if distance > 1 && site.production > 0 {
                if mass > site.strength as u32 {
                    let score = approach_value(map, ctx, current, tuning)
                        - distance as i32 * distance as i32;
                    if score > best_score {
                        best_score = score;
                        candidates.clear();
                    }
                    if score == best_score {
                        candidates.push(d);
                    }
                }
                break;
            }
            if (site.strength as u16) < tuning.neutral_safety_threshold {
                mass += site.strength as u32;
                continue;
            }
            break;
        }
    }
    candidates
}
