//! Player paddles
//!
//! Each paddle has a fixed x lane and moves vertically. Holding a direction
//! accelerates it up to `max_speed`; releasing brings it to rest.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::vector::Vector2D;
use crate::consts::*;

/// Which player a paddle (or point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Unit normal of this side's paddle face, pointing into the playfield
    pub fn face_normal(self) -> Vector2D {
        match self {
            Side::Left => Vector2D::X,
            Side::Right => Vector2D::NEG_X,
        }
    }
}

/// A player-controlled paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    side: Side,
    /// Top-left corner
    position: Vector2D,
    width: f32,
    height: f32,
    base_height: f32,
    /// Signed vertical speed, negative is up
    velocity_y: f32,
    max_speed: f32,
    acceleration: f32,
    window_height: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32, window_height: f32) -> Self {
        assert!(
            window_height > PADDLE_HEIGHT,
            "window height must fit a paddle"
        );
        let mut paddle = Self {
            side,
            position: Vector2D::new(x, y),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            base_height: PADDLE_HEIGHT,
            velocity_y: 0.0,
            max_speed: PADDLE_MAX_SPEED,
            acceleration: PADDLE_ACCELERATION,
            window_height,
        };
        paddle.clamp();
        paddle
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn base_height(&self) -> f32 {
        self.base_height
    }

    /// Current vertical movement speed (negative is up)
    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn move_up(&mut self) {
        self.velocity_y = (self.velocity_y - self.acceleration).max(-self.max_speed);
        self.advance();
    }

    pub fn move_down(&mut self) {
        self.velocity_y = (self.velocity_y + self.acceleration).min(self.max_speed);
        self.advance();
    }

    /// Come to rest (no key held)
    pub fn reset_speed(&mut self) {
        self.velocity_y = 0.0;
    }

    /// Move to a given height, clamped to the playfield
    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
        self.clamp();
    }

    /// Resize around the paddle's center
    pub fn set_height(&mut self, height: f32) {
        assert!(height > 0.0, "paddle height must be positive");
        let height = height.min(self.window_height);
        let center = self.position.y + self.height * 0.5;
        self.height = height;
        self.position.y = center - height * 0.5;
        self.clamp();
    }

    pub fn reset_height(&mut self) {
        self.set_height(self.base_height);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    fn advance(&mut self) {
        self.position.y += self.velocity_y;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max_y = self.window_height - self.height;
        self.position.y = self.position.y.clamp(0.0, max_y);
    }
}
