//! Match state
//!
//! Everything a running match owns lives here. Each owner of randomness gets
//! its own PCG stream derived from the config seed, so two states built from
//! the same config play out identically for the same inputs.

use rand_pcg::Pcg32;
use serde::Serialize;

use super::ball::Ball;
use super::collision::CollisionManager;
use super::game::{GameManager, GamePhase};
use super::paddle::{Paddle, Side};
use super::potion::PotionEffectManager;
use crate::audio::SoundSink;
use crate::consts::*;
use crate::error::GameError;
use crate::settings::{Difficulty, GameConfig};

/// PCG stream ids, one per owner of randomness
const BALL_STREAM: u64 = 1;
const GAME_STREAM: u64 = 2;
const POTION_STREAM: u64 = 3;

/// RNG seed wrapper
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self, stream: u64) -> Pcg32 {
        Pcg32::new(self.seed, stream)
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub config: GameConfig,
    pub difficulty: Difficulty,
    pub rng_state: RngState,
    /// Frames simulated while playing
    pub frame: u64,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub game: GameManager,
    pub potions: PotionEffectManager,
    #[serde(skip)]
    pub collisions: CollisionManager,
}

impl GameState {
    /// Build a match in the menu phase
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng_state = RngState::new(config.seed);

        let mut ball = Ball::new(
            config.window_width,
            config.window_height,
            config.ball_max_speed,
            rng_state.to_rng(BALL_STREAM),
        );
        ball.set_base_speed(config.difficulty.base_speed());

        Ok(Self {
            difficulty: config.difficulty,
            rng_state,
            frame: 0,
            ball,
            left: Paddle::new(
                Side::Left,
                LEFT_PADDLE_X,
                PADDLE_START_Y,
                config.window_height,
            ),
            right: Paddle::new(
                Side::Right,
                config.right_paddle_x(),
                PADDLE_START_Y,
                config.window_height,
            ),
            game: GameManager::new(&config, rng_state.to_rng(GAME_STREAM)),
            potions: PotionEffectManager::new(
                config.potion_chance,
                config.potion_duration_frames,
                rng_state.to_rng(POTION_STREAM),
            ),
            collisions: CollisionManager::from_config(&config),
            config,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    /// Start a match at the chosen difficulty
    pub fn start(&mut self, difficulty: Difficulty, sound: &mut dyn SoundSink) {
        log::info!(
            "Starting {} match (base speed {})",
            difficulty.as_str(),
            difficulty.base_speed()
        );
        self.difficulty = difficulty;
        self.ball.set_base_speed(difficulty.base_speed());
        self.restart(sound);
    }

    /// New match at the current difficulty
    pub fn restart(&mut self, sound: &mut dyn SoundSink) {
        sound.stop_music();
        self.game
            .restart_game(self.config.wall_count, self.config.min_wall_distance);
        self.game.start_game();
        self.potions
            .clear_all_effects(&mut self.ball, &mut self.left, &mut self.right);

        for paddle in [&mut self.left, &mut self.right] {
            paddle.reset_speed();
            paddle.set_y(PADDLE_START_Y);
        }
        self.ball.reset_position();
        self.frame = 0;
    }

    /// JSON snapshot for debugging and external renderers
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
