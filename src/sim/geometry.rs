//! Axis-aligned rectangles
//!
//! Every entity anchors its bounds at the TOP-LEFT corner, with `y` growing
//! downward like screen coordinates.

use serde::{Deserialize, Serialize};

use super::vector::Vector2D;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Smallest translation that pushes `self` out of `other`, or `None`
    /// when they do not overlap
    ///
    /// The result lies on a single axis: whichever needs the shorter push.
    pub fn separation(&self, other: &Rect) -> Option<Vector2D> {
        if !self.intersects(other) {
            return None;
        }
        let push_left = self.right() - other.left();
        let push_right = other.right() - self.left();
        let push_up = self.bottom() - other.top();
        let push_down = other.bottom() - self.top();

        let dx = if push_left < push_right { -push_left } else { push_right };
        let dy = if push_up < push_down { -push_up } else { push_down };

        if dx.abs() < dy.abs() {
            Some(Vector2D::new(dx, 0.0))
        } else {
            Some(Vector2D::new(0.0, dy))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vector2D::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.separation(&b).is_none());
    }

    #[test]
    fn test_separation_picks_shallow_axis() {
        // Ball clipping the left face of a tall wall
        let ball = Rect::new(8.0, 50.0, 10.0, 10.0);
        let wall = Rect::new(15.0, 0.0, 20.0, 100.0);
        assert_eq!(ball.separation(&wall), Some(Vector2D::new(-3.0, 0.0)));

        // Ball resting on the top face
        let ball = Rect::new(20.0, -6.0, 10.0, 10.0);
        assert_eq!(ball.separation(&wall), Some(Vector2D::new(0.0, -4.0)));

        // Ball clipping the bottom face
        let ball = Rect::new(20.0, 98.0, 10.0, 10.0);
        assert_eq!(ball.separation(&wall), Some(Vector2D::new(0.0, 2.0)));
    }
}
