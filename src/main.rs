//! Potion Pong headless runner
//!
//! Plays a demo match with both paddles on autopilot and prints the final
//! state as JSON.
//!
//! Usage: `potion-pong [difficulty] [config.json]`

use std::process::ExitCode;

use potion_pong::sim::{GamePhase, GameState, TickInput, tick};
use potion_pong::{AudioManager, Difficulty, GameConfig, GameError, MusicTrack, SoundSink};

/// Give up on a match after this many frames (10 minutes at 60 fps)
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Potion Pong (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), GameError> {
    let mut args = std::env::args().skip(1);

    let difficulty = match args.next() {
        Some(name) => Difficulty::from_str(&name).ok_or_else(|| {
            GameError::InvalidConfig(format!("unknown difficulty '{}'", name))
        })?,
        None => Difficulty::default(),
    };
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::from_difficulty(difficulty),
    };

    let mut audio = AudioManager::new();
    let mut state = GameState::new(config)?;
    audio.play_music(MusicTrack::Menu);
    state.start(difficulty, &mut audio);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut bounces = 0u32;
    while state.phase() == GamePhase::Playing && state.frame < MAX_FRAMES {
        let events = tick(&mut state, &input, &mut audio);
        if events.collision.is_some() {
            bounces += 1;
        }
    }

    let score = state.game.scoreboard();
    match state.game.winner() {
        Some(side) => log::info!(
            "{:?} wins {}-{} after {} frames ({} bounces, {} sounds)",
            side,
            score.left,
            score.right,
            state.frame,
            bounces,
            audio.played_count()
        ),
        None => log::warn!(
            "No winner after {} frames, score {}-{}",
            state.frame,
            score.left,
            score.right
        ),
    }

    println!("{}", state.to_json()?);
    Ok(())
}
