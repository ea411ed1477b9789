//! The blocking host connection.
//!
//! Wraps a reader/writer pair (stdin/stdout in production, byte buffers
//! in tests) and performs the init handshake plus the per-turn
//! `get_frame` / `send_frame` exchange. The production grid arrives once
//! at init and is merged into every subsequent snapshot.

use std::io::{BufRead, Write};

use super::codec::{
    format_moves, parse_dimensions, parse_frame, parse_production, ProtocolError,
};
use crate::map::{GameMap, Move, OwnerId};

/// A live protocol session with the game host.
pub struct Connection<R, W> {
    reader: R,
    writer: W,
    player_tag: OwnerId,
    width: u16,
    height: u16,
    production: Vec<u8>,
}

impl<R: BufRead, W: Write> Connection<R, W> {
    /// Performs the init handshake: reads the player tag, dimensions,
    /// production grid, and the initial frame, then announces `bot_name`.
    /// Returns the connection and the initial snapshot.
    pub fn init(
        mut reader: R,
        mut writer: W,
        bot_name: &str,
    ) -> Result<(Connection<R, W>, GameMap), ProtocolError> {
        let tag_line = read_line(&mut reader)?;
        let player_tag: OwnerId = tag_line
            .trim()
            .parse()
            .map_err(|_| ProtocolError::InvalidToken(tag_line.trim().to_string()))?;

        let (width, height) = parse_dimensions(&read_line(&mut reader)?)?;
        let production = parse_production(&read_line(&mut reader)?, width, height)?;
        let initial = parse_frame(&read_line(&mut reader)?, width, height, &production)?;

        writeln!(writer, "{}", bot_name)?;
        writer.flush()?;

        let conn = Connection {
            reader,
            writer,
            player_tag,
            width,
            height,
            production,
        };
        Ok((conn, initial))
    }

    pub fn player_tag(&self) -> OwnerId {
        self.player_tag
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Blocks until the next turn's frame arrives and decodes it into a
    /// fresh snapshot.
    pub fn get_frame(&mut self) -> Result<GameMap, ProtocolError> {
        let line = read_line(&mut self.reader)?;
        parse_frame(&line, self.width, self.height, &self.production)
    }

    /// Transmits the committed move set. Called exactly once per turn.
    pub fn send_frame(&mut self, moves: &[Move]) -> Result<(), ProtocolError> {
        writeln!(self.writer, "{}", format_moves(moves))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads one line, failing with `UnexpectedEof` on a closed stream.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String, ProtocolError> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Err(ProtocolError::UnexpectedEof);
    }
    Ok(line)
}
