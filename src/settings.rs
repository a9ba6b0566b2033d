//! Game settings and difficulty presets
//!
//! Loaded from JSON on native builds; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Difficulty levels, each mapping to a ball base speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Ball base speed (pixels per frame) for this difficulty
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 6.0,
        }
    }
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub window_width: f32,
    pub window_height: f32,

    // === Match ===
    pub difficulty: Difficulty,
    /// Points needed to win
    pub win_score: u32,
    /// Seed for every random stream in the match
    pub seed: u64,

    // === Walls ===
    pub wall_count: usize,
    pub max_walls: usize,
    pub min_wall_distance: f32,
    pub points_per_extra_wall: u32,

    // === Ball ===
    pub ball_max_speed: f32,
    pub english_factor: f32,

    // === Potions ===
    /// Probability (0.0 - 1.0) that a paddle hit spawns a potion
    pub potion_chance: f64,
    pub potion_duration_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            difficulty: Difficulty::Medium,
            win_score: WIN_SCORE,
            seed: 12345,

            wall_count: NUM_WALLS,
            max_walls: MAX_WALLS,
            min_wall_distance: MIN_WALL_DISTANCE,
            points_per_extra_wall: POINTS_PER_EXTRA_WALL,

            ball_max_speed: BALL_MAX_SPEED,
            english_factor: ENGLISH_FACTOR,

            potion_chance: POTION_CHANCE,
            potion_duration_frames: POTION_DURATION_FRAMES,
        }
    }
}

impl GameConfig {
    /// Create config from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the playfield can hold every entity the simulation spawns
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if !(self.window_width > 2.0 * WALL_SIDE_MARGIN) {
            return invalid(format!(
                "window_width must exceed {}, got {}",
                2.0 * WALL_SIDE_MARGIN,
                self.window_width
            ));
        }
        if !(self.window_height > 2.0 * SPAWN_MARGIN + PADDLE_HEIGHT) {
            return invalid(format!(
                "window_height must exceed {}, got {}",
                2.0 * SPAWN_MARGIN + PADDLE_HEIGHT,
                self.window_height
            ));
        }
        if self.win_score == 0 {
            return invalid("win_score must be at least 1".to_string());
        }
        if self.max_walls > MAX_WALLS_LIMIT {
            return invalid(format!(
                "max_walls must be at most {}, got {}",
                MAX_WALLS_LIMIT, self.max_walls
            ));
        }
        if self.max_walls < self.wall_count {
            return invalid(format!(
                "max_walls ({}) is below wall_count ({})",
                self.max_walls, self.wall_count
            ));
        }
        if self.min_wall_distance < 0.0 {
            return invalid("min_wall_distance must not be negative".to_string());
        }
        if self.points_per_extra_wall == 0 {
            return invalid("points_per_extra_wall must be at least 1".to_string());
        }
        if self.ball_max_speed < Difficulty::Hard.base_speed() {
            return invalid(format!(
                "ball_max_speed must be at least {}",
                Difficulty::Hard.base_speed()
            ));
        }
        if !(0.0..=1.0).contains(&self.potion_chance) {
            return invalid(format!(
                "potion_chance must be within 0.0 - 1.0, got {}",
                self.potion_chance
            ));
        }
        if self.potion_duration_frames == 0 {
            return invalid("potion_duration_frames must be at least 1".to_string());
        }
        Ok(())
    }

    /// X position of the right paddle
    pub fn right_paddle_x(&self) -> f32 {
        self.window_width - RIGHT_PADDLE_INSET
    }
}
