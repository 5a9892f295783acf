//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Wall-clock timestamps come in from the caller
//! - Seeded RNG only
//! - Stable iteration order (oldest entity first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod progression;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{HitResult, find_target, resolve_projectile};
pub use progression::{EnemyProgression, ProgressionEvent};
pub use session::GameSession;
pub use snapshot::{OutcomeText, RenderSnapshot};
pub use state::{
    Castle, GameEvent, GamePhase, GameState, Hero, Monster, Outcome, PlayArea, Projectile,
};
pub use tick::tick;
