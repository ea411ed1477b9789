//! Host wire format encoding and decoding.
//!
//! The host speaks a whitespace-tokenized line protocol. Init sends the
//! player tag, the grid dimensions, the production grid, and an initial
//! frame; every turn thereafter sends one frame line. A frame is a
//! run-length encoding of site owners (pairs of `count owner` summing to
//! width x height) followed by one strength value per site. Moves go back
//! as `x y dir` triples on a single line, with dir encoded 0..=4.

use crate::map::{Direction, GameMap, Location, Move, Site};

/// Errors that can occur while decoding host messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream closed mid-message")]
    UnexpectedEof,

    #[error("invalid integer token: '{0}'")]
    InvalidToken(String),

    #[error("malformed dimensions line: '{0}'")]
    MalformedDimensions(String),

    #[error("production grid has {got} values, expected {expected}")]
    ProductionCountMismatch { got: usize, expected: usize },

    #[error("owner run length covers {got} sites, expected {expected}")]
    RunLengthMismatch { got: usize, expected: usize },

    #[error("frame has {0} unexpected trailing tokens")]
    TrailingTokens(usize),
}

/// Pulls the next token and parses it as an integer in `0..=max`.
fn next_int<'a, I>(tokens: &mut I, max: u32) -> Result<u32, ProtocolError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(ProtocolError::UnexpectedEof)?;
    let value: u32 = token
        .parse()
        .map_err(|_| ProtocolError::InvalidToken(token.to_string()))?;
    if value > max {
        return Err(ProtocolError::InvalidToken(token.to_string()));
    }
    Ok(value)
}

/// Parses the `width height` init line.
pub fn parse_dimensions(line: &str) -> Result<(u16, u16), ProtocolError> {
    let mut tokens = line.split_whitespace();
    let width = next_int(&mut tokens, u16::MAX as u32)
        .map_err(|_| ProtocolError::MalformedDimensions(line.to_string()))?;
    let height = next_int(&mut tokens, u16::MAX as u32)
        .map_err(|_| ProtocolError::MalformedDimensions(line.to_string()))?;
    if width == 0 || height == 0 || tokens.next().is_some() {
        return Err(ProtocolError::MalformedDimensions(line.to_string()));
    }
    Ok((width as u16, height as u16))
}

/// Parses the per-site production grid sent once at init, row-major.
pub fn parse_production(
    line: &str,
    width: u16,
    height: u16,
) -> Result<Vec<u8>, ProtocolError> {
    let expected = width as usize * height as usize;
    let mut production = Vec::with_capacity(expected);
    let mut tokens = line.split_whitespace();
    for _ in 0..expected {
        match next_int(&mut tokens, u8::MAX as u32) {
            Ok(v) => production.push(v as u8),
            Err(ProtocolError::UnexpectedEof) => {
                return Err(ProtocolError::ProductionCountMismatch {
                    got: production.len(),
                    expected,
                })
            }
            Err(e) => return Err(e),
        }
    }
    let trailing = tokens.count();
    if trailing > 0 {
        return Err(ProtocolError::ProductionCountMismatch {
            got: expected + trailing,
            expected,
        });
    }
    Ok(production)
}

/// Decodes one frame line into a fresh snapshot, merging in the static
/// production grid.
pub fn parse_frame(
    line: &str,
    width: u16,
    height: u16,
    production: &[u8],
) -> Result<GameMap, ProtocolError> {
    let expected = width as usize * height as usize;
    debug_assert_eq!(production.len(), expected);

    let mut tokens = line.split_whitespace();

    // Owner runs: `count owner` pairs covering the grid exactly.
    let mut owners = Vec::with_capacity(expected);
    while owners.len() < expected {
        let count = next_int(&mut tokens, u32::MAX)? as usize;
        let owner = next_int(&mut tokens, u8::MAX as u32)? as u8;
        if owners.len() + count > expected {
            return Err(ProtocolError::RunLengthMismatch {
                got: owners.len() + count,
                expected,
            });
        }
        owners.extend(std::iter::repeat(owner).take(count));
    }

    let mut sites = Vec::with_capacity(expected);
    for i in 0..expected {
        let strength = next_int(&mut tokens, u8::MAX as u32)? as u8;
        sites.push(Site::new(owners[i], strength, production[i]));
    }

    let trailing = tokens.count();
    if trailing > 0 {
        return Err(ProtocolError::TrailingTokens(trailing));
    }

    Ok(GameMap::from_sites(width, height, sites))
}

/// Encodes a snapshot back into the frame wire format. The inverse of
/// `parse_frame`; used by tests and session tooling.
pub fn format_frame(map: &GameMap) -> String {
    let mut owners: Vec<u8> = Vec::new();
    let mut strengths: Vec<u8> = Vec::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            let site = map.site(Location::new(x, y), Direction::Still);
            owners.push(site.owner);
            strengths.push(site.strength);
        }
    }

    let mut parts: Vec<String> = Vec::new();
    let mut run_start = 0;
    for i in 1..=owners.len() {
        if i == owners.len() || owners[i] != owners[run_start] {
            parts.push(format!("{} {}", i - run_start, owners[run_start]));
            run_start = i;
        }
    }
    for s in &strengths {
        parts.push(s.to_string());
    }
    parts.join(" ")
}

/// Serializes a move set as `x y dir` triples on one line.
pub fn format_moves(moves: &[Move]) -> String {
    let parts: Vec<String> = moves
        .iter()
        .map(|m| {
            format!(
                "{} {} {}",
                m.location.x,
                m.location.y,
                m.direction.wire()
            )
        })
        .collect();
    parts.join(" ")
}
