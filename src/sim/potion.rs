//! Timed potion effects
//!
//! Potions are spawned by paddle hits and alter ball speed, ball size or a
//! paddle's height for a fixed number of frames. Each kind has exactly one
//! apply/revert pair; the manager only counts frames and never reaches into
//! entity internals.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, Side};

/// Potion variants and their payloads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PotionKind {
    /// Ball moves at `base_speed * factor`
    SpeedBoost { factor: f32 },
    /// Ball moves at `base_speed * factor` (factor < 1)
    SlowDown { factor: f32 },
    /// Ball grows by `extra` pixels
    BallGrow { extra: f32 },
    /// One paddle grows by `extra` pixels
    PaddleGrow { side: Side, extra: f32 },
}

/// What an effect occupies; one active effect per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSlot {
    BallSpeed,
    BallSize,
    PaddleSize(Side),
}

fn paddle_mut<'a>(side: Side, left: &'a mut Paddle, right: &'a mut Paddle) -> &'a mut Paddle {
    match side {
        Side::Left => left,
        Side::Right => right,
    }
}

impl PotionKind {
    pub fn slot(&self) -> EffectSlot {
        match self {
            PotionKind::SpeedBoost { .. } | PotionKind::SlowDown { .. } => EffectSlot::BallSpeed,
            PotionKind::BallGrow { .. } => EffectSlot::BallSize,
            PotionKind::PaddleGrow { side, .. } => EffectSlot::PaddleSize(*side),
        }
    }

    pub fn apply(&self, ball: &mut Ball, left: &mut Paddle, right: &mut Paddle) {
        match *self {
            PotionKind::SpeedBoost { factor } | PotionKind::SlowDown { factor } => {
                assert!(factor > 0.0, "speed potion factor must be positive");
                ball.set_speed(ball.base_speed() * factor);
            }
            PotionKind::BallGrow { extra } => ball.set_size(ball.base_size() + extra),
            PotionKind::PaddleGrow { side, extra } => {
                let paddle = paddle_mut(side, left, right);
                paddle.set_height(paddle.base_height() + extra);
            }
        }
    }

    pub fn revert(&self, ball: &mut Ball, left: &mut Paddle, right: &mut Paddle) {
        match *self {
            PotionKind::SpeedBoost { .. } | PotionKind::SlowDown { .. } => {
                ball.reset_speed();
                ball.normalize_velocity();
            }
            PotionKind::BallGrow { .. } => ball.reset_size(),
            PotionKind::PaddleGrow { side, .. } => paddle_mut(side, left, right).reset_height(),
        }
    }

    /// Random potion; paddle potions go to the paddle that earned them
    pub fn random(rng: &mut Pcg32, hitter: Side) -> Self {
        match rng.random_range(0..4) {
            0 => PotionKind::SpeedBoost { factor: 1.5 },
            1 => PotionKind::SlowDown { factor: 0.6 },
            2 => PotionKind::BallGrow { extra: 10.0 },
            _ => PotionKind::PaddleGrow {
                side: hitter,
                extra: 50.0,
            },
        }
    }
}

/// An active effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotionEffect {
    pub kind: PotionKind,
    pub remaining_frames: u32,
}

/// Tracks active effects and counts them down once per frame
#[derive(Debug, Clone, Serialize)]
pub struct PotionEffectManager {
    effects: Vec<PotionEffect>,
    /// Probability that a paddle hit spawns a potion
    spawn_chance: f64,
    duration_frames: u32,
    #[serde(skip)]
    rng: Pcg32,
}

impl PotionEffectManager {
    pub fn new(spawn_chance: f64, duration_frames: u32, rng: Pcg32) -> Self {
        assert!(
            (0.0..=1.0).contains(&spawn_chance),
            "spawn chance must be a probability"
        );
        assert!(duration_frames > 0, "potions must last at least one frame");
        Self {
            effects: Vec::new(),
            spawn_chance,
            duration_frames,
            rng,
        }
    }

    pub fn active(&self) -> &[PotionEffect] {
        &self.effects
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Frames left on the effect occupying `slot`
    pub fn remaining_for(&self, slot: EffectSlot) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind.slot() == slot)
            .map(|e| e.remaining_frames)
    }

    /// Apply `kind` for `frames` frames, replacing whatever held its slot
    pub fn trigger(
        &mut self,
        kind: PotionKind,
        frames: u32,
        ball: &mut Ball,
        left: &mut Paddle,
        right: &mut Paddle,
    ) {
        assert!(frames > 0, "potions must last at least one frame");
        let slot = kind.slot();
        if let Some(idx) = self.effects.iter().position(|e| e.kind.slot() == slot) {
            let old = self.effects.remove(idx);
            old.kind.revert(ball, left, right);
        }

        kind.apply(ball, left, right);
        log::debug!("potion {:?} active for {} frames", kind, frames);
        self.effects.push(PotionEffect {
            kind,
            remaining_frames: frames,
        });
    }

    /// Roll for a potion after `hitter` returned the ball
    pub fn maybe_spawn(
        &mut self,
        hitter: Side,
        ball: &mut Ball,
        left: &mut Paddle,
        right: &mut Paddle,
    ) -> Option<PotionKind> {
        if !self.rng.random_bool(self.spawn_chance) {
            return None;
        }
        let kind = PotionKind::random(&mut self.rng, hitter);
        let frames = self.duration_frames;
        self.trigger(kind, frames, ball, left, right);
        Some(kind)
    }

    /// Count every effect down one frame, reverting the ones that run out
    pub fn update(&mut self, ball: &mut Ball, left: &mut Paddle, right: &mut Paddle) {
        self.effects.retain_mut(|effect| {
            effect.remaining_frames = effect.remaining_frames.saturating_sub(1);
            if effect.remaining_frames == 0 {
                log::debug!("potion {:?} expired", effect.kind);
                effect.kind.revert(ball, left, right);
                false
            } else {
                true
            }
        });
    }

    /// Expire everything now; effects never outlive a round
    pub fn clear_all_effects(&mut self, ball: &mut Ball, left: &mut Paddle, right: &mut Paddle) {
        for effect in self.effects.drain(..) {
            effect.kind.revert(ball, left, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::vector::{Vector2D, VectorExt};
    use rand::SeedableRng;

    fn setup() -> (Ball, Paddle, Paddle) {
        let mut ball = Ball::new(
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
            BALL_MAX_SPEED,
            Pcg32::seed_from_u64(1),
        );
        ball.set_base_speed(5.0);
        let left = Paddle::new(Side::Left, LEFT_PADDLE_X, PADDLE_START_Y, WINDOW_HEIGHT);
        let right = Paddle::new(
            Side::Right,
            WINDOW_WIDTH - RIGHT_PADDLE_INSET,
            PADDLE_START_Y,
            WINDOW_HEIGHT,
        );
        (ball, left, right)
    }

    fn manager(chance: f64) -> PotionEffectManager {
        PotionEffectManager::new(chance, POTION_DURATION_FRAMES, Pcg32::seed_from_u64(2))
    }

    #[test]
    fn test_last_frame_expires_and_restores_base_speed() {
        let (mut ball, mut left, mut right) = setup();
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::SpeedBoost { factor: 1.5 },
            1,
            &mut ball,
            &mut left,
            &mut right,
        );
        assert!((ball.speed() - 7.5).abs() < 1e-4);
        let direction = ball.velocity().normalize();

        potions.update(&mut ball, &mut left, &mut right);

        assert!(potions.is_empty());
        assert_eq!(ball.speed(), ball.base_speed());
        assert!((ball.velocity().magnitude() - 5.0).abs() < 1e-4);
        assert!((ball.velocity().normalize() - direction).length() < 1e-5);
    }

    #[test]
    fn test_effect_counts_down() {
        let (mut ball, mut left, mut right) = setup();
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::BallGrow { extra: 10.0 },
            3,
            &mut ball,
            &mut left,
            &mut right,
        );
        assert_eq!(ball.size(), BALL_SIZE + 10.0);

        potions.update(&mut ball, &mut left, &mut right);
        assert_eq!(potions.remaining_for(EffectSlot::BallSize), Some(2));
        potions.update(&mut ball, &mut left, &mut right);
        potions.update(&mut ball, &mut left, &mut right);
        assert!(potions.is_empty());
        assert_eq!(ball.size(), BALL_SIZE);
    }

    #[test]
    fn test_same_slot_replaces_instead_of_stacking() {
        let (mut ball, mut left, mut right) = setup();
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::SpeedBoost { factor: 1.5 },
            100,
            &mut ball,
            &mut left,
            &mut right,
        );
        potions.trigger(
            PotionKind::SlowDown { factor: 0.6 },
            50,
            &mut ball,
            &mut left,
            &mut right,
        );
        assert_eq!(potions.active().len(), 1);
        assert!((ball.speed() - 3.0).abs() < 1e-4);
        assert_eq!(potions.remaining_for(EffectSlot::BallSpeed), Some(50));
    }

    #[test]
    fn test_paddle_grow_targets_one_side() {
        let (mut ball, mut left, mut right) = setup();
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::PaddleGrow {
                side: Side::Right,
                extra: 50.0,
            },
            10,
            &mut ball,
            &mut left,
            &mut right,
        );
        assert_eq!(left.height(), PADDLE_HEIGHT);
        assert_eq!(right.height(), PADDLE_HEIGHT + 50.0);

        potions.clear_all_effects(&mut ball, &mut left, &mut right);
        assert!(potions.is_empty());
        assert_eq!(right.height(), PADDLE_HEIGHT);
    }

    #[test]
    fn test_clear_all_reverts_everything() {
        let (mut ball, mut left, mut right) = setup();
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::SpeedBoost { factor: 1.5 },
            100,
            &mut ball,
            &mut left,
            &mut right,
        );
        potions.trigger(
            PotionKind::BallGrow { extra: 10.0 },
            100,
            &mut ball,
            &mut left,
            &mut right,
        );
        potions.clear_all_effects(&mut ball, &mut left, &mut right);
        assert!(potions.is_empty());
        assert_eq!(ball.speed(), 5.0);
        assert_eq!(ball.size(), BALL_SIZE);
    }

    #[test]
    fn test_spawn_chance_bounds() {
        let (mut ball, mut left, mut right) = setup();
        let mut never = manager(0.0);
        let mut always = manager(1.0);
        for _ in 0..20 {
            assert!(
                never
                    .maybe_spawn(Side::Left, &mut ball, &mut left, &mut right)
                    .is_none()
            );
            assert!(
                always
                    .maybe_spawn(Side::Left, &mut ball, &mut left, &mut right)
                    .is_some()
            );
        }
        assert!(never.is_empty());
        assert!(!always.is_empty());
        // One effect per slot at most
        assert!(always.active().len() <= 3);
    }

    #[test]
    fn test_speed_potion_keeps_direction() {
        let (mut ball, mut left, mut right) = setup();
        ball.place(Vector2D::new(100.0, 100.0), Vector2D::new(3.0, 4.0));
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::SlowDown { factor: 0.6 },
            10,
            &mut ball,
            &mut left,
            &mut right,
        );
        let v = ball.velocity();
        assert!((v.normalize() - Vector2D::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "speed potion factor must be positive")]
    fn test_zero_factor_slowdown_panics() {
        let (mut ball, mut left, mut right) = setup();
        let mut potions = manager(0.0);
        potions.trigger(
            PotionKind::SlowDown { factor: 0.0 },
            10,
            &mut ball,
            &mut left,
            &mut right,
        );
    }
}
