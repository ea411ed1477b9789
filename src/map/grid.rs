//! The per-turn map snapshot.
//!
//! A `GameMap` is created fresh from each received frame and is immutable
//! for the duration of that turn's decisions, so it can be shared freely
//! across parallel per-tile tasks. Production is static per game and is
//! merged into the snapshot at construction time.

use super::location::{Direction, Location};
use super::site::{OwnerId, Site};

/// A full grid snapshot for one turn.
#[derive(Debug, Clone)]
pub struct GameMap {
    width: u16,
    height: u16,
    sites: Vec<Site>,
}

impl GameMap {
    /// Builds a snapshot from row-major site data. `sites.len()` must equal
    /// `width * height`.
    pub fn from_sites(width: u16, height: u16, sites: Vec<Site>) -> GameMap {
        assert_eq!(sites.len(), width as usize * height as usize);
        GameMap {
            width,
            height,
            sites,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, loc: Location) -> usize {
        loc.y as usize * self.width as usize + loc.x as usize
    }

    /// Returns the location one step in `direction`, wrapping around both
    /// axes. STILL returns the location itself.
    pub fn step(&self, loc: Location, direction: Direction) -> Location {
        let (w, h) = (self.width as u32, self.height as u32);
        let (x, y) = (loc.x as u32, loc.y as u32);
        let (x, y) = match direction {
            Direction::Still => (x, y),
            Direction::North => (x, (y + h - 1) % h),
            Direction::East => ((x + 1) % w, y),
            Direction::South => (x, (y + 1) % h),
            Direction::West => ((x + w - 1) % w, y),
        };
        Location::new(x as u16, y as u16)
    }

    /// Reads the site one step in `direction` from `loc` (the tile itself
    /// for STILL).
    pub fn site(&self, loc: Location, direction: Direction) -> &Site {
        let target = self.step(loc, direction);
        &self.sites[self.index(target)]
    }

    /// Returns every location currently owned by `owner`, in row-major order.
    pub fn owned_locations(&self, owner: OwnerId) -> Vec<Location> {
        let mut owned = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let loc = Location::new(x, y);
                if self.sites[self.index(loc)].owner == owner {
                    owned.push(loc);
                }
            }
        }
        owned
    }
}

/// Identity constants captured once at startup: our own player id and the
/// host-assigned neutral owner id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub me: OwnerId,
    pub neutral: OwnerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_map(width: u16, height: u16) -> GameMap {
        let sites = vec![Site::default(); width as usize * height as usize];
        GameMap::from_sites(width, height, sites)
    }

    #[test]
    fn step_wraps_north_edge() {
        let map = uniform_map(4, 3);
        let loc = Location::new(2, 0);
        assert_eq!(map.step(loc, Direction::North), Location::new(2, 2));
    }

    #[test]
    fn step_wraps_west_edge() {
        let map = uniform_map(4, 3);
        let loc = Location::new(0, 1);
        assert_eq!(map.step(loc, Direction::West), Location::new(3, 1));
    }

    #[test]
    fn step_wraps_south_and_east() {
        let map = uniform_map(4, 3);
        assert_eq!(
            map.step(Location::new(1, 2), Direction::South),
            Location::new(1, 0)
        );
        assert_eq!(
            map.step(Location::new(3, 1), Direction::East),
            Location::new(0, 1)
        );
    }

    #[test]
    fn step_still_is_identity() {
        let map = uniform_map(4, 3);
        let loc = Location::new(1, 1);
        assert_eq!(map.step(loc, Direction::Still), loc);
    }

    #[test]
    fn full_cardinal_loop_returns_home() {
        let map = uniform_map(5, 5);
        let start = Location::new(0, 0);
        let mut loc = start;
        for d in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            loc = map.step(loc, d);
        }
        assert_eq!(loc, start);
    }

    #[test]
    fn site_reads_through_direction_offset() {
        let mut sites = vec![Site::default(); 9];
        sites[1] = Site::new(2, 40, 3); // (1, 0)
        let map = GameMap::from_sites(3, 3, sites);
        let read = map.site(Location::new(1, 1), Direction::North);
        assert_eq!(read.owner, 2);
        assert_eq!(read.strength, 40);
        assert_eq!(read.production, 3);
    }

    #[test]
    fn owned_locations_finds_exactly_owned() {
        let mut sites = vec![Site::new(0, 0, 0); 9];
        sites[0] = Site::new(1, 10, 1);
        sites[8] = Site::new(1, 20, 1);
        sites[4] = Site::new(2, 30, 1);
        let map = GameMap::from_sites(3, 3, sites);
        let owned = map.owned_locations(1);
        assert_eq!(owned, vec![Location::new(0, 0), Location::new(2, 2)]);
    }
}
