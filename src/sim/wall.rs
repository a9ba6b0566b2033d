//! Static rectangular obstacles

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::vector::Vector2D;

/// A wall placed for the current round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    bounds: Rect,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        assert!(width > 0.0 && height > 0.0, "wall size must be positive");
        Self {
            bounds: Rect::new(x, y, width, height),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> Vector2D {
        self.bounds.center()
    }
}
