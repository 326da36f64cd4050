//! Hoppy Bunny entry point
//!
//! Runs the simulation headless with a simple autopilot and logs the run.
//! Usage: `hoppy-bunny [tuning.json] [seed]`

use hoppy_bunny::consts::FIXED_DELTA;
use hoppy_bunny::host::Headless;
use hoppy_bunny::sim::{GameEvent, SoundEffect};
use hoppy_bunny::Tuning;

/// Give up after this many frames (ten minutes at 60 Hz)
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Hoppy Bunny (headless) starting...");

    let args: Vec<String> = std::env::args().collect();

    let tuning = match args.get(1) {
        Some(path) => Tuning::load(path).unwrap_or_else(|e| {
            log::error!("{}: {} - using default tuning", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = match args.get(2).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({}), using 0", e);
            0
        }
        None => 0,
    };

    let mut game = Headless::new(tuning, seed);
    let mut flaps = 0u32;

    for _ in 0..MAX_FRAMES {
        if game.autopilot_wants_tap() {
            game.tap();
        }

        for event in game.update(FIXED_DELTA) {
            match event {
                GameEvent::ScoreChanged(points) => log::debug!("Score: {}", points),
                GameEvent::Sound(SoundEffect::Flap) => flaps += 1,
                GameEvent::GameOver { points } => {
                    log::info!("Crashed with {} points", points);
                }
                other => log::trace!("{:?}", other),
            }
        }

        if !game.state.is_active() {
            break;
        }
    }

    log::info!(
        "Run finished: {} points, {} ticks, {} flaps, final scroll speed {:.1}",
        game.state.points,
        game.state.time_ticks,
        flaps,
        game.state.scroll_speed
    );
}
