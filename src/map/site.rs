//! Per-site state.
//!
//! A `Site` is one grid cell's owner/strength/production triple as read
//! from a single turn's snapshot. All three are single bytes on the wire;
//! anything that sums strengths widens first.

/// A player identifier as assigned by the host. The neutral owner is a
/// regular id, discovered at startup from the origin site.
pub type OwnerId = u8;

/// One grid cell at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Site {
    pub owner: OwnerId,
    pub strength: u8,
    pub production: u8,
}

impl Site {
    pub const fn new(owner: OwnerId, strength: u8, production: u8) -> Site {
        Site {
            owner,
            strength,
            production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_site_is_empty_neutral() {
        let s = Site::default();
        assert_eq!(s.owner, 0);
        assert_eq!(s.strength, 0);
        assert_eq!(s.production, 0);
    }
}
