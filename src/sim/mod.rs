//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod game;
pub mod geometry;
pub mod paddle;
pub mod potion;
pub mod state;
pub mod tick;
pub mod vector;
pub mod wall;

pub use ball::Ball;
pub use collision::{Collision, CollisionManager, reflect_velocity};
pub use game::{GameManager, GamePhase, Scoreboard};
pub use geometry::Rect;
pub use paddle::{Paddle, Side};
pub use potion::{EffectSlot, PotionEffect, PotionEffectManager, PotionKind};
pub use state::{GameState, RngState};
pub use tick::{FrameEvents, PaddleCommand, TickInput, tick};
pub use vector::{Vector2D, VectorExt};
pub use wall::Wall;
