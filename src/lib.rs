//! Potion Pong - two-player Pong with walls and potions
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (physics, collisions, game state)
//! - `audio`: Sound hooks fired by the simulation
//! - `settings`: Data-driven configuration and difficulty presets
//! - `error`: Configuration errors

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, MusicTrack, SoundEffect, SoundSink};
pub use error::GameError;
pub use settings::{Difficulty, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 1200.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;

    /// Vertical spawn band margin for the ball
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Magnitude of the (4, 4) launch vector before difficulty is chosen
    pub const BALL_START_SPEED: f32 = 5.656_854;
    pub const BALL_MAX_SPEED: f32 = 14.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_START_Y: f32 = 250.0;
    pub const LEFT_PADDLE_X: f32 = 30.0;
    /// Right paddle sits this far from the right edge
    pub const RIGHT_PADDLE_INSET: f32 = 50.0;
    pub const PADDLE_MAX_SPEED: f32 = 8.0;
    pub const PADDLE_ACCELERATION: f32 = 1.0;
    /// Share of paddle vertical speed transferred to the ball on contact
    pub const ENGLISH_FACTOR: f32 = 0.25;

    /// Wall defaults
    pub const NUM_WALLS: usize = 4;
    pub const MAX_WALLS: usize = 8;
    /// Largest wall count a config may request
    pub const MAX_WALLS_LIMIT: usize = 32;
    pub const MIN_WALL_DISTANCE: f32 = 60.0;
    pub const WALL_WIDTH: f32 = 20.0;
    pub const WALL_MIN_HEIGHT: f32 = 60.0;
    pub const WALL_MAX_HEIGHT: f32 = 120.0;
    /// Walls keep this far away from the paddle lanes
    pub const WALL_SIDE_MARGIN: f32 = 150.0;
    /// Walls keep this far away from the center line
    pub const WALL_CENTER_MARGIN: f32 = 40.0;
    /// Walls keep this far away from the top and bottom edges so a grown
    /// ball pushed out of a wall stays on the field
    pub const WALL_EDGE_MARGIN: f32 = 2.0 * BALL_SIZE + 10.0;
    /// Points needed for each extra wall
    pub const POINTS_PER_EXTRA_WALL: u32 = 2;

    /// Potion defaults
    pub const POTION_CHANCE: f64 = 0.25;
    /// 5 seconds at 60 frames per second
    pub const POTION_DURATION_FRAMES: u32 = 300;

    /// Points needed to win a match
    pub const WIN_SCORE: u32 = 1;
}
