//! Verb Defense - castle defense powered by a conjugation quiz
//!
//! Core modules:
//! - `sim`: Simulation core (spawning, movement, collisions, progression)
//! - `config`: Data-driven difficulty presets, enemy catalog and unlock rules
//! - `quiz`: Verb quiz deck that grants attack power
//! - `assets`: Sprite table with placeholder fallback
//! - `platform`: Frame loop scheduling and cancellation

pub mod assets;
pub mod config;
pub mod error;
pub mod platform;
pub mod quiz;
pub mod sim;

pub use config::{DifficultyId, EnemyId, GameConfig};
pub use error::{ConfigError, GameError, ParseIdError, SelectionError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fraction of the play-area height used by the terrain strip
    pub const TERRAIN_FRACTION: f32 = 0.15;

    /// Castle geometry
    pub const CASTLE_X: f32 = 40.0;
    pub const CASTLE_MIN_SIZE: f32 = 160.0;
    pub const CASTLE_MAX_SIZE: f32 = 260.0;
    /// Headroom kept above the castle (HUD text)
    pub const CASTLE_HEADROOM: f32 = 60.0;
    /// How far the castle base sinks into the terrain
    pub const CASTLE_SINK: f32 = 20.0;

    /// Hero defaults
    pub const HERO_WIDTH: f32 = 48.0;
    pub const HERO_HEIGHT: f32 = 64.0;
    /// One shot per second
    pub const HERO_FIRE_INTERVAL_MS: f64 = 1000.0;

    /// Monster size (all enemy types share one hitbox)
    pub const MONSTER_WIDTH: f32 = 48.0;
    pub const MONSTER_HEIGHT: f32 = 64.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 15.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    /// Pixels per frame, rightward
    pub const PROJECTILE_SPEED: f32 = 8.0;

    /// Spawn interval multiplier applied on every spawn
    pub const SPAWN_DECAY: f64 = 0.99;

    /// Attack power at run start
    pub const BASE_ATTACK_POWER: u32 = 1;
}

/// Axis-aligned rectangle overlap test (strict: touching edges do not overlap)
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
