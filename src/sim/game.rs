//! Score and round state
//!
//! The game manager owns the scoreboard, the wall layout and the match
//! phase. It reacts to the ball leaving the playfield sideways; everything
//! else about the ball is the collision pass's business.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, Side};
use super::potion::PotionEffectManager;
use super::wall::Wall;
use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::settings::GameConfig;

/// Placement attempts per requested wall before giving up
const WALL_ATTEMPTS_PER_WALL: usize = 200;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu; waiting for a difficulty pick
    NotStarted,
    /// Active gameplay
    Playing,
    /// Someone reached the winning score
    GameOver,
}

/// Points per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub left: u32,
    pub right: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_winner(&self, win_score: u32) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Scoring, wall layout and match phase
#[derive(Debug, Clone, Serialize)]
pub struct GameManager {
    phase: GamePhase,
    scoreboard: Scoreboard,
    walls: Vec<Wall>,
    /// Wall count the current layout was generated for
    wall_tier: usize,
    base_wall_count: usize,
    max_walls: usize,
    points_per_extra_wall: u32,
    win_score: u32,
    window_width: f32,
    window_height: f32,
    #[serde(skip)]
    rng: Pcg32,
}

impl GameManager {
    pub fn new(config: &GameConfig, rng: Pcg32) -> Self {
        assert!(config.window_width > 0.0, "window width must be positive");
        assert!(
            config.window_height > WALL_MAX_HEIGHT + 2.0 * WALL_EDGE_MARGIN,
            "window height must fit a wall"
        );
        assert!(config.win_score > 0, "win score must be at least 1");
        assert!(
            config.points_per_extra_wall > 0,
            "points per extra wall must be at least 1"
        );

        let mut manager = Self {
            phase: GamePhase::NotStarted,
            scoreboard: Scoreboard::new(),
            walls: Vec::new(),
            wall_tier: config.wall_count,
            base_wall_count: config.wall_count,
            max_walls: config.max_walls.max(config.wall_count),
            points_per_extra_wall: config.points_per_extra_wall,
            win_score: config.win_score,
            window_width: config.window_width,
            window_height: config.window_height,
            rng,
        };
        manager.walls = manager.generate_walls(config.wall_count, config.min_wall_distance);
        manager
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn win_score(&self) -> u32 {
        self.win_score
    }

    pub fn winner(&self) -> Option<Side> {
        self.scoreboard.has_winner(self.win_score)
    }

    /// Random wall layout
    ///
    /// Walls stay between the paddle lanes, keep clear of the center line,
    /// never overlap and keep at least `min_distance` between centers. If the
    /// attempt budget runs out fewer walls are returned.
    pub fn generate_walls(&mut self, count: usize, min_distance: f32) -> Vec<Wall> {
        let center_x = self.window_width / 2.0;
        let left_band = (WALL_SIDE_MARGIN, center_x - WALL_CENTER_MARGIN - WALL_WIDTH);
        let right_band = (
            center_x + WALL_CENTER_MARGIN,
            self.window_width - WALL_SIDE_MARGIN - WALL_WIDTH,
        );
        if left_band.1 < left_band.0 || right_band.1 < right_band.0 {
            log::warn!(
                "Playfield {}px wide has no room for walls",
                self.window_width
            );
            return Vec::new();
        }

        let mut walls: Vec<Wall> = Vec::with_capacity(count.min(MAX_WALLS_LIMIT));
        let budget = count.saturating_mul(WALL_ATTEMPTS_PER_WALL);
        let mut attempts = 0;
        while walls.len() < count && attempts < budget {
            attempts += 1;

            let height = self.rng.random_range(WALL_MIN_HEIGHT..=WALL_MAX_HEIGHT);
            let (lo, hi) = if self.rng.random_bool(0.5) {
                left_band
            } else {
                right_band
            };
            let x = self.rng.random_range(lo..=hi);
            let y = self.rng.random_range(
                WALL_EDGE_MARGIN..=self.window_height - WALL_EDGE_MARGIN - height,
            );
            let candidate = Wall::new(x, y, WALL_WIDTH, height);

            let clear = walls.iter().all(|w| {
                !w.bounds().intersects(&candidate.bounds())
                    && w.center().distance(candidate.center()) >= min_distance
            });
            if clear {
                walls.push(candidate);
            }
        }

        if walls.len() < count {
            log::warn!(
                "Placed {} of {} walls (min distance {})",
                walls.len(),
                count,
                min_distance
            );
        }
        log::debug!("Generated {} walls", walls.len());
        walls
    }

    /// One extra wall per `points_per_extra_wall` points, capped at `max_walls`
    pub fn wall_count_for_score(&self, total_points: u32) -> usize {
        let extra = (total_points / self.points_per_extra_wall) as usize;
        (self.base_wall_count + extra).min(self.max_walls)
    }

    /// Regenerate walls when the score reaches a new difficulty tier
    ///
    /// Returns true when the layout changed.
    pub fn update_walls_based_on_score(&mut self, min_distance: f32) -> bool {
        let tier = self.wall_count_for_score(self.scoreboard.total());
        if tier == self.wall_tier {
            return false;
        }
        log::info!(
            "Score {}-{}: walls {} -> {}",
            self.scoreboard.left,
            self.scoreboard.right,
            self.wall_tier,
            tier
        );
        self.wall_tier = tier;
        self.walls = self.generate_walls(tier, min_distance);
        true
    }

    /// Award a point when the ball leaves through the left or right edge
    ///
    /// Clears round-scoped potions, respawns the ball and ends the match when
    /// the winning score is reached. Returns true when a point was scored.
    pub fn check_ball_out_of_bounds(
        &mut self,
        ball: &mut Ball,
        left: &mut Paddle,
        right: &mut Paddle,
        sound: &mut dyn SoundSink,
        potions: &mut PotionEffectManager,
    ) -> bool {
        let x = ball.position().x;
        let conceded = if x < 0.0 {
            Side::Left
        } else if x > self.window_width {
            Side::Right
        } else {
            return false;
        };
        let scorer = conceded.opponent();

        self.scoreboard.award(scorer);
        log::info!(
            "{:?} scores: {}-{}",
            scorer,
            self.scoreboard.left,
            self.scoreboard.right
        );

        potions.clear_all_effects(ball, left, right);
        ball.reset_position();
        sound.play(SoundEffect::Score);

        if let Some(winner) = self.winner() {
            log::info!("Game over, {:?} wins", winner);
            self.phase = GamePhase::GameOver;
            sound.play(SoundEffect::GameOver);
        }
        true
    }

    /// Fresh scoreboard and walls; back to the menu phase
    pub fn restart_game(&mut self, count: usize, min_distance: f32) {
        self.scoreboard.reset();
        self.base_wall_count = count;
        self.max_walls = self.max_walls.max(count);
        self.wall_tier = count;
        self.walls = self.generate_walls(count, min_distance);
        self.phase = GamePhase::NotStarted;
    }

    pub fn start_game(&mut self) {
        log::info!("Match started with {} walls", self.walls.len());
        self.phase = GamePhase::Playing;
    }
}
