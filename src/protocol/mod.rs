//! Host protocol.
//!
//! Wire codec for the host's whitespace-tokenized line format and the
//! blocking `Connection` that drives the init handshake and the per-turn
//! frame exchange.

pub mod codec;
pub mod connection;

pub use codec::{format_frame, format_moves, parse_frame, ProtocolError};
pub use connection::Connection;
