//! 2D vector primitive
//!
//! `Vector2D` is `glam::Vec2`: add, subtract, scale and dot come from glam
//! with value semantics, so every result is an independent copy. The
//! extension trait fills in the speed-management operations the ball needs.

use glam::Vec2;

pub type Vector2D = Vec2;

/// Speed-management helpers on top of [`Vector2D`]
pub trait VectorExt {
    /// `sqrt(x² + y²)`
    fn magnitude(self) -> f32;

    /// Rescale in place so the magnitude does not exceed `max`
    fn limit(&mut self, max: f32);

    /// Same direction with the given magnitude; the zero vector stays zero
    fn with_magnitude(self, magnitude: f32) -> Self;
}

impl VectorExt for Vec2 {
    #[inline]
    fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn limit(&mut self, max: f32) {
        let mag = self.magnitude();
        if mag > max && mag > 0.0 {
            *self *= max / mag;
        }
    }

    fn with_magnitude(self, magnitude: f32) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            self * (magnitude / mag)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_limit_rescales_long_vector() {
        let mut v = Vector2D::new(8.0, 6.0);
        assert!((v.magnitude() - 10.0).abs() < 1e-6);
        v.limit(5.0);
        assert!((v.x - 4.0).abs() < 1e-6);
        assert!((v.y - 3.0).abs() < 1e-6);
        assert!((v.magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_limit_leaves_short_vector() {
        let mut v = Vector2D::new(3.0, 4.0);
        v.limit(10.0);
        assert_eq!(v, Vector2D::new(3.0, 4.0));
    }

    #[test]
    fn test_zero_vector_is_guarded() {
        let mut v = Vector2D::ZERO;
        v.limit(0.0);
        assert_eq!(v, Vector2D::ZERO);
        assert_eq!(Vector2D::ZERO.with_magnitude(5.0), Vector2D::ZERO);
        assert!(!v.x.is_nan() && !v.y.is_nan());
    }

    #[test]
    fn test_arithmetic_returns_copies() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -1.0);
        assert_eq!(a + b, Vector2D::new(4.0, 1.0));
        assert_eq!(a - b, Vector2D::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(a.dot(b), 1.0);
        // Operands untouched
        assert_eq!(a, Vector2D::new(1.0, 2.0));
    }

    proptest! {
        #[test]
        fn prop_limit_never_exceeds_max(x in -100.0f32..100.0, y in -100.0f32..100.0, max in 0.1f32..50.0) {
            let mut v = Vector2D::new(x, y);
            let before = v.magnitude();
            v.limit(max);
            prop_assert!(v.magnitude() <= max + 1e-3);
            if before <= max {
                prop_assert_eq!(v, Vector2D::new(x, y));
            }
        }

        #[test]
        fn prop_with_magnitude_hits_target(x in -100.0f32..100.0, y in -100.0f32..100.0, m in 0.0f32..50.0) {
            let v = Vector2D::new(x, y);
            prop_assume!(v.magnitude() > 1e-3);
            prop_assert!((v.with_magnitude(m).magnitude() - m).abs() < 1e-3);
        }
    }
}
