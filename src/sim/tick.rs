//! Per-frame simulation step
//!
//! Fixed order each frame: move the ball, apply paddle commands, tick potion
//! effects, refresh walls for the score, resolve collisions, then check for
//! a point. Effects tick before collisions so a just-expired potion's speed
//! is what the collision pass sees.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::Collision;
use super::game::GamePhase;
use super::paddle::{Paddle, Side};
use super::state::GameState;
use crate::audio::SoundSink;

/// Idle-mode paddles ignore offsets smaller than this (pixels)
const AI_DEAD_ZONE: f32 = 12.0;

/// Movement intent for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleCommand {
    #[default]
    Idle,
    Up,
    Down,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: PaddleCommand,
    pub right: PaddleCommand,
    /// Idle/demo mode - AI steers both paddles
    pub idle_mode: bool,
}

/// What happened during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub collision: Option<Collision>,
    /// A point was scored (the ball has already respawned)
    pub scored: bool,
    pub walls_regenerated: bool,
}

/// Advance the match by one frame
pub fn tick(state: &mut GameState, input: &TickInput, sound: &mut dyn SoundSink) -> FrameEvents {
    if state.phase() != GamePhase::Playing {
        return FrameEvents::default();
    }
    state.frame += 1;

    state.ball.move_step();

    let (left_cmd, right_cmd) = if input.idle_mode {
        (
            ai_command(&state.ball, &state.left, state.config.window_height),
            ai_command(&state.ball, &state.right, state.config.window_height),
        )
    } else {
        (input.left, input.right)
    };
    apply_command(&mut state.left, left_cmd);
    apply_command(&mut state.right, right_cmd);

    state
        .potions
        .update(&mut state.ball, &mut state.left, &mut state.right);

    let walls_regenerated = state
        .game
        .update_walls_based_on_score(state.config.min_wall_distance);

    let collision = state.collisions.handle_collisions(
        &mut state.ball,
        &mut state.left,
        &mut state.right,
        state.game.walls(),
        sound,
        &mut state.potions,
    );

    let scored = state.game.check_ball_out_of_bounds(
        &mut state.ball,
        &mut state.left,
        &mut state.right,
        sound,
        &mut state.potions,
    );

    FrameEvents {
        collision,
        scored,
        walls_regenerated,
    }
}

fn apply_command(paddle: &mut Paddle, command: PaddleCommand) {
    match command {
        PaddleCommand::Up => paddle.move_up(),
        PaddleCommand::Down => paddle.move_down(),
        PaddleCommand::Idle => paddle.reset_speed(),
    }
}

/// Track the ball while it approaches, otherwise drift back to mid-field
fn ai_command(ball: &Ball, paddle: &Paddle, window_height: f32) -> PaddleCommand {
    let approaching = match paddle.side() {
        Side::Left => ball.velocity().x < 0.0,
        Side::Right => ball.velocity().x > 0.0,
    };
    let target = if approaching {
        ball.bounds().center().y
    } else {
        window_height / 2.0
    };

    let offset = target - paddle.bounds().center().y;
    if offset > AI_DEAD_ZONE {
        PaddleCommand::Down
    } else if offset < -AI_DEAD_ZONE {
        PaddleCommand::Up
    } else {
        PaddleCommand::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::consts::*;
    use crate::settings::{Difficulty, GameConfig};
    use crate::sim::vector::{Vector2D, VectorExt};

    fn playing_state(config: GameConfig) -> (GameState, AudioManager) {
        let mut state = GameState::new(config).unwrap();
        let mut audio = AudioManager::new();
        state.start(Difficulty::Medium, &mut audio);
        (state, audio)
    }

    #[test]
    fn test_tick_is_noop_before_start() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let mut audio = AudioManager::new();
        let before = state.ball.position();

        let events = tick(&mut state, &TickInput::default(), &mut audio);

        assert_eq!(events, FrameEvents::default());
        assert_eq!(state.ball.position(), before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_tick_moves_ball_and_paddles() {
        let (mut state, mut audio) = playing_state(GameConfig::default());
        let before = state.ball.position();
        let velocity = state.ball.velocity();
        let left_y = state.left.position().y;

        let input = TickInput {
            left: PaddleCommand::Down,
            right: PaddleCommand::Up,
            ..Default::default()
        };
        tick(&mut state, &input, &mut audio);

        assert_eq!(state.frame, 1);
        assert_eq!(state.ball.position(), before + velocity);
        assert!(state.left.position().y > left_y);
        assert!(state.right.velocity_y() < 0.0);
    }

    #[test]
    fn test_point_ends_single_point_match() {
        let (mut state, mut audio) = playing_state(GameConfig::default());
        state
            .ball
            .place(Vector2D::new(WINDOW_WIDTH - 2.0, 400.0), Vector2D::new(5.0, 0.0));

        let events = tick(&mut state, &TickInput::default(), &mut audio);

        assert!(events.scored);
        assert_eq!(state.game.scoreboard().left, 1);
        assert_eq!(state.phase(), GamePhase::GameOver);

        // Frozen after game over
        let frame = state.frame;
        tick(&mut state, &TickInput::default(), &mut audio);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut state, mut audio) = playing_state(GameConfig::default());
        state
            .ball
            .place(Vector2D::new(-4.0, 400.0), Vector2D::new(-5.0, 0.0));
        tick(&mut state, &TickInput::default(), &mut audio);
        assert_eq!(state.phase(), GamePhase::GameOver);

        state.restart(&mut audio);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.game.scoreboard().total(), 0);
        assert!(state.potions.is_empty());
    }

    #[test]
    fn test_expired_potion_speed_seen_by_collisions() {
        let (mut state, mut audio) = playing_state(GameConfig::default());
        state.potions.trigger(
            crate::sim::PotionKind::SpeedBoost { factor: 1.5 },
            1,
            &mut state.ball,
            &mut state.left,
            &mut state.right,
        );
        state
            .ball
            .place(Vector2D::new(600.0, 400.0), Vector2D::new(6.0, 4.5));

        tick(&mut state, &TickInput::default(), &mut audio);

        assert!(state.potions.is_empty());
        assert!((state.ball.velocity().magnitude() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ai_tracks_approaching_ball() {
        let (mut state, _) = playing_state(GameConfig::default());
        state
            .ball
            .place(Vector2D::new(600.0, 700.0), Vector2D::new(-4.0, 3.0));
        let height = state.config.window_height;
        assert_eq!(ai_command(&state.ball, &state.left, height), PaddleCommand::Down);

        state
            .ball
            .place(Vector2D::new(600.0, 20.0), Vector2D::new(-4.0, 3.0));
        assert_eq!(ai_command(&state.ball, &state.left, height), PaddleCommand::Up);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let config = GameConfig {
            win_score: 1000,
            potion_chance: 0.5,
            seed: 99999,
            ..GameConfig::default()
        };
        let (mut state1, mut audio1) = playing_state(config.clone());
        let (mut state2, mut audio2) = playing_state(config);

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            let e1 = tick(&mut state1, &input, &mut audio1);
            let e2 = tick(&mut state2, &input, &mut audio2);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.ball.position(), state2.ball.position());
        assert_eq!(state1.game.scoreboard(), state2.game.scoreboard());
        assert_eq!(state1.game.walls(), state2.game.walls());
    }

    #[test]
    fn test_invariants_hold_over_long_run() {
        let config = GameConfig {
            win_score: 1000,
            potion_chance: 0.5,
            seed: 7,
            ..GameConfig::default()
        };
        let (mut state, mut audio) = playing_state(config);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..5000 {
            tick(&mut state, &input, &mut audio);
            let ball = &state.ball;
            assert!(
                (ball.velocity().magnitude() - ball.speed()).abs() < 1e-3,
                "speed {} drifted from velocity {:?}",
                ball.speed(),
                ball.velocity()
            );
            assert!(ball.speed() <= ball.max_speed());
            assert!(state.left.bounds().top() >= 0.0);
            assert!(state.right.bounds().bottom() <= WINDOW_HEIGHT);
            assert!(state.game.walls().len() <= state.config.max_walls);
        }
    }
}
