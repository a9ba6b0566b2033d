//! Collision detection and response
//!
//! One pass per frame against the ball's post-move position. Bounds and walls
//! are resolved before paddles and at most one bounce is applied per frame.
//! There is no swept test, so a fast enough ball can tunnel through a thin
//! obstacle.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, Side};
use super::potion::PotionEffectManager;
use super::vector::Vector2D;
use super::wall::Wall;
use crate::audio::{SoundEffect, SoundSink};
use crate::settings::GameConfig;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, `normal` must be unit length
#[inline]
pub fn reflect_velocity(velocity: Vector2D, normal: Vector2D) -> Vector2D {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// What the ball bounced off this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Top or bottom edge of the playfield
    Bound,
    /// Index into the wall slice
    Wall(usize),
    Paddle(Side),
}

/// Resolves ball contacts with bounds, walls and paddles
#[derive(Debug, Clone)]
pub struct CollisionManager {
    window_height: f32,
    english_factor: f32,
}

impl CollisionManager {
    pub fn new(window_height: f32, english_factor: f32) -> Self {
        assert!(window_height > 0.0, "window height must be positive");
        Self {
            window_height,
            english_factor,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.window_height, config.english_factor)
    }

    /// Run the frame's collision pass
    pub fn handle_collisions(
        &self,
        ball: &mut Ball,
        left: &mut Paddle,
        right: &mut Paddle,
        walls: &[Wall],
        sound: &mut dyn SoundSink,
        potions: &mut PotionEffectManager,
    ) -> Option<Collision> {
        if self.bound_collision(ball) {
            sound.play(SoundEffect::WallHit);
            return Some(Collision::Bound);
        }

        if let Some(index) = wall_collision(ball, walls) {
            sound.play(SoundEffect::WallHit);
            return Some(Collision::Wall(index));
        }

        for side in [Side::Left, Side::Right] {
            if self.paddle_collision(side, ball, left, right) {
                sound.play(SoundEffect::PaddleHit);
                if let Some(kind) = potions.maybe_spawn(side, ball, left, right) {
                    log::debug!("{:?} paddle earned {:?}", side, kind);
                    sound.play(SoundEffect::PotionSpawned);
                }
                return Some(Collision::Paddle(side));
            }
        }

        None
    }

    /// Clamp to the top/bottom edge and bounce if moving into it
    fn bound_collision(&self, ball: &mut Ball) -> bool {
        let bounds = ball.bounds();
        let (normal, clamped_y) = if bounds.top() < 0.0 {
            (Vector2D::Y, 0.0)
        } else if bounds.bottom() > self.window_height {
            (Vector2D::NEG_Y, self.window_height - bounds.height)
        } else {
            return false;
        };

        ball.set_position(Vector2D::new(bounds.x, clamped_y));
        if ball.velocity().dot(normal) < 0.0 {
            ball.bounce(normal);
            true
        } else {
            false
        }
    }

    fn paddle_collision(
        &self,
        side: Side,
        ball: &mut Ball,
        left: &Paddle,
        right: &Paddle,
    ) -> bool {
        let paddle = match side {
            Side::Left => left,
            Side::Right => right,
        };
        let paddle_bounds = paddle.bounds();
        let ball_bounds = ball.bounds();
        let normal = side.face_normal();

        // Only bounce when heading into the paddle face
        if !ball_bounds.intersects(&paddle_bounds) || ball.velocity().dot(normal) >= 0.0 {
            return false;
        }

        ball.bounce(normal);

        // Push ball out of paddle
        let x = match side {
            Side::Left => paddle_bounds.right(),
            Side::Right => paddle_bounds.left() - ball_bounds.width,
        };
        ball.set_position(Vector2D::new(x, ball_bounds.y));

        // English from paddle movement, then back to the ball's speed
        ball.accelerate(0.0, paddle.velocity_y() * self.english_factor);
        ball.normalize_velocity();
        true
    }
}

/// Separate the ball from overlapping walls; bounce off the first face it
/// is heading into
///
/// Overlaps the ball is already leaving are only pushed out and do not count
/// as a hit.
fn wall_collision(ball: &mut Ball, walls: &[Wall]) -> Option<usize> {
    for (index, wall) in walls.iter().enumerate() {
        let Some(push) = ball.bounds().separation(&wall.bounds()) else {
            continue;
        };

        ball.set_position(ball.position() + push);
        let normal = push.normalize();
        if ball.velocity().dot(normal) < 0.0 {
            ball.bounce(normal);
            return Some(index);
        }
    }
    None
}
