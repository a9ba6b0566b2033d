//! The ball: motion, reflection and speed bookkeeping
//!
//! `speed` always equals the velocity magnitude once a public method returns,
//! with two deliberate transients:
//! - [`Ball::accelerate`] nudges velocity without touching `speed`; callers
//!   follow it with [`Ball::normalize_velocity`] or [`Ball::limit_speed`].
//! - [`Ball::reset_speed`] reverts `speed` without rescaling; callers follow
//!   it with [`Ball::normalize_velocity`].

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::reflect_velocity;
use super::geometry::Rect;
use super::vector::{Vector2D, VectorExt};
use crate::consts::*;

/// The ball entity
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    /// Top-left corner
    position: Vector2D,
    velocity: Vector2D,
    speed: f32,
    base_speed: f32,
    max_speed: f32,
    size: f32,
    base_size: f32,
    window_width: f32,
    window_height: f32,
    #[serde(skip)]
    rng: Pcg32,
}

impl Ball {
    /// Spawn a ball on the center line of a `window_width` x `window_height` field
    pub fn new(window_width: f32, window_height: f32, max_speed: f32, rng: Pcg32) -> Self {
        assert!(window_width > 0.0, "window width must be positive");
        assert!(
            window_height > 2.0 * SPAWN_MARGIN,
            "window height must leave room for the spawn band"
        );
        assert!(max_speed > 0.0, "max speed must be positive");

        let mut ball = Self {
            position: Vector2D::ZERO,
            velocity: Vector2D::new(4.0, 4.0),
            speed: BALL_START_SPEED,
            base_speed: BALL_START_SPEED,
            max_speed,
            size: BALL_SIZE,
            base_size: BALL_SIZE,
            window_width,
            window_height,
            rng,
        };
        ball.reset_position();
        ball
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// `position += velocity`; bounds are the collision pass's job
    pub fn move_step(&mut self) {
        self.position += self.velocity;
    }

    /// Reflect velocity across a unit surface normal: `v' = v - 2(v·n)n`
    pub fn bounce(&mut self, normal: Vector2D) {
        debug_assert!(
            (normal.magnitude() - 1.0).abs() < 1e-3,
            "bounce normal must be a unit vector"
        );
        self.velocity = reflect_velocity(self.velocity, normal);
    }

    /// Back to the center line at a random height, heading along a random diagonal
    pub fn reset_position(&mut self) {
        self.position.x = self.window_width / 2.0;
        self.position.y = self
            .rng
            .random_range(SPAWN_MARGIN..=self.window_height - SPAWN_MARGIN);

        let dx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.velocity = Vector2D::new(dx, dy);
        self.speed = self.base_speed;
        self.size = self.base_size;
        self.normalize_velocity();
    }

    /// Add an impulse without updating `speed`
    pub fn accelerate(&mut self, ax: f32, ay: f32) {
        self.velocity += Vector2D::new(ax, ay);
    }

    /// Clamp velocity magnitude to `max` and resync `speed` with it
    pub fn limit_speed(&mut self, max: f32) {
        self.velocity.limit(max);
        self.speed = self.velocity.magnitude();
    }

    /// Set the difficulty baseline; the ball moves at it immediately
    pub fn set_base_speed(&mut self, speed: f32) {
        assert!(
            speed > 0.0 && speed <= self.max_speed,
            "base speed must be within (0, {}], got {}",
            self.max_speed,
            speed
        );
        self.base_speed = speed;
        self.speed = speed;
        self.normalize_velocity();
    }

    /// Temporary speed change, capped at `max_speed`; reverted by
    /// [`Ball::reset_speed`]
    pub fn set_speed(&mut self, speed: f32) {
        assert!(speed > 0.0, "ball speed must be positive, got {}", speed);
        self.speed = speed.min(self.max_speed);
        self.normalize_velocity();
    }

    /// Revert `speed` to the baseline; velocity is rescaled by the next
    /// [`Ball::normalize_velocity`]
    pub fn reset_speed(&mut self) {
        self.speed = self.base_speed;
    }

    /// Rescale velocity to exactly `speed`, keeping its direction
    pub fn normalize_velocity(&mut self) {
        self.velocity = self.velocity.with_magnitude(self.speed);
    }

    pub fn set_size(&mut self, size: f32) {
        assert!(size > 0.0, "ball size must be positive");
        self.size = size;
    }

    pub fn reset_size(&mut self) {
        self.size = self.base_size;
    }

    /// Move without touching velocity (collision separation)
    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
    }

    /// Place the ball with an explicit velocity; `speed` follows the velocity
    pub fn place(&mut self, position: Vector2D, velocity: Vector2D) {
        self.position = position;
        self.velocity = velocity;
        self.speed = velocity.magnitude();
    }

    /// Square of side `size` anchored at the top-left position
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size, self.size)
    }
}
