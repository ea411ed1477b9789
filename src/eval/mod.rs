//! Site valuation.
//!
//! Pure scoring functions used to rank conquest targets. Production is
//! weighted super-linearly so high-yield tiles stay attractive even at a
//! higher strength cost; strength is subtracted linearly as the cost of
//! taking the tile.

use crate::config::Tuning;
use crate::map::{Direction, GameMap, Location, Site, TurnContext, CARDINALS};

/// Conquest value of a single site: production^exponent - strength.
pub fn site_value(site: &Site, tuning: &Tuning) -> i32 {
    (site.production as i32).pow(tuning.production_exponent) - site.strength as i32
}

/// Value of approaching a location: its own strength plus the conquest
/// value of every cardinal neighbor not owned by us. Used to rank which
/// neutral to walk toward, not which to step onto directly.
pub fn approach_value(map: &GameMap, ctx: TurnContext, loc: Location, tuning: &Tuning) -> i32 {
    let mut value = map.site(loc, Direction::Still).strength as i32;
    for d in CARDINALS {
        let neighbor = map.site(loc, d);
        if neighbor.owner != ctx.me {
            value += site_value(neighbor, tuning);
        }
    }
    value
}
