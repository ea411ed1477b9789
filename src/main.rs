//! Hegemon -- a territory-control bot for a toroidal grid game.
//!
//! This binary speaks the host's line protocol over stdin/stdout: one
//! init handshake, then a frame in and a move set out every turn until
//! the host closes the stream. Diagnostics go to stderr; stdout belongs
//! to the protocol.

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use hegemon::config::Tuning;
use hegemon::engine::Engine;
use hegemon::map::{Direction, Location, TurnContext};
use hegemon::protocol::{Connection, ProtocolError};

/// Command-line settings: `[--name <name>] [--tuning <file.json>]`.
struct Args {
    name: String,
    tuning_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        name: "hegemon".to_string(),
        tuning_path: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--name" => {
                args.name = it.next().ok_or("--name requires a value")?;
            }
            "--tuning" => {
                args.tuning_path =
                    Some(PathBuf::from(it.next().ok_or("--tuning requires a value")?));
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let tuning = match &args.tuning_path {
        Some(path) => Tuning::from_file(path).map_err(|e| e.to_string())?,
        None => Tuning::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = BufReader::new(stdin.lock());
    let writer = stdout.lock();

    let (mut conn, initial) = Connection::init(reader, writer, &args.name)
        .map_err(|e| format!("init handshake failed: {}", e))?;

    // The neutral owner id is host-assigned but stable; the origin site is
    // neutral at game start, so read it once before the first turn.
    let ctx = TurnContext {
        me: conn.player_tag(),
        neutral: initial
            .site(Location::new(0, 0), Direction::Still)
            .owner,
    };
    let mut engine = Engine::new(tuning);

    let mut turn: u64 = 0;
    loop {
        let map = match conn.get_frame() {
            Ok(map) => map,
            // Host closed the stream: the game is over.
            Err(ProtocolError::UnexpectedEof) => return Ok(()),
            Err(e) => return Err(format!("frame decode failed: {}", e)),
        };
        turn += 1;

        let moves = engine.plan_turn(&map, ctx);
        eprintln!("turn {}: {} moves", turn, moves.len());

        conn.send_frame(&moves)
            .map_err(|e| format!("sending moves failed: {}", e))?;
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{}", msg);
            ExitCode::FAILURE
        }
    }
}
