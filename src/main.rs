//! Drift Rocks entry point
//!
//! Headless native driver: runs the simulation at a fixed cadence and draws
//! frames to the terminal. The autopilot flies unless keys are held from the
//! command line.
//!
//! `RUST_LOG` sets the log filter (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use drift_rocks::Tuning;
use drift_rocks::platform::{Key, KeyLatch};
use drift_rocks::renderer::text;
use drift_rocks::sim::{GamePhase, GameState, tick};

/// Display refresh cadence
const TICKS_PER_SECOND: u64 = 60;
const DEFAULT_TICKS: u64 = 3600;
const DEFAULT_SEED: u64 = 0x5EED;
const FRAME_COLS: usize = 80;
const FRAME_ROWS: usize = 24;

#[derive(Parser, Debug)]
#[command(name = "drift-rocks")]
#[command(about = "Run the Drift Rocks simulation headless in the terminal")]
struct Args {
    /// Tuning JSON file (missing fields take their defaults)
    tuning: Option<PathBuf>,

    /// Simulation seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Ticks to simulate
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Pace ticks at 60 Hz and redraw every frame
    #[arg(long)]
    realtime: bool,

    /// Print one JSON snapshot per second instead of frames
    #[arg(long, conflicts_with = "realtime")]
    json: bool,

    /// Key held for the whole run, as a key code (ArrowLeft, ArrowRight,
    /// ArrowUp, Space); disables the autopilot
    #[arg(long = "hold", value_name = "KEY", value_parser = parse_key)]
    held: Vec<Key>,
}

fn parse_key(code: &str) -> Result<Key, String> {
    match Key::from_code(code) {
        Some(Key::Enter) => Err("Enter is pressed by the driver after game over".to_string()),
        Some(key) => Ok(key),
        None => Err(format!("unknown key code `{code}`")),
    }
}

/// Latch with the held keys pressed, or the autopilot engaged if there are none
fn initial_latch(held: &[Key]) -> KeyLatch {
    let mut latch = KeyLatch::new();
    latch.idle_mode = held.is_empty();
    for &key in held {
        latch.key_down(key, GamePhase::Active);
    }
    latch
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Drift Rocks (native) starting...");

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(args.seed, tuning) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut latch = initial_latch(&args.held);
    log::info!("Game initialized with seed: {}", args.seed);

    let frame_time = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND);
    let mut last_phase = state.phase;
    let mut best_score = 0;

    for n in 1..=args.ticks {
        let started = Instant::now();

        if latch.take_restart() && state.restart() {
            latch = initial_latch(&args.held);
            last_phase = state.phase;
        }
        tick(&mut state, &latch.intents());

        if state.phase != last_phase {
            if state.phase == GamePhase::GameOver {
                best_score = best_score.max(state.score);
                // Demo host lets go of everything and presses Enter
                latch.release_all();
                latch.key_down(Key::Enter, state.phase);
            }
            last_phase = state.phase;
        }

        let snapshot = state.snapshot();
        if args.json {
            if n % TICKS_PER_SECOND == 0 {
                match serde_json::to_string(&snapshot) {
                    Ok(line) => println!("{line}"),
                    Err(err) => log::warn!("Snapshot serialization failed: {err}"),
                }
            }
        } else if args.realtime {
            print!("\x1b[H\x1b[2J{}", text::render(&snapshot, FRAME_COLS, FRAME_ROWS));
        } else if n % TICKS_PER_SECOND == 0 {
            log::info!("t={}s {}", n / TICKS_PER_SECOND, text::hud(&snapshot));
        }

        if args.realtime {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    best_score = best_score.max(state.score);
    if !args.json && !args.realtime {
        println!("{}", text::render(&state.snapshot(), FRAME_COLS, FRAME_ROWS));
    }
    log::info!("Finished {} ticks; best score {best_score}", args.ticks);
    ExitCode::SUCCESS
}
