//! Error taxonomy
//!
//! - Configuration errors are fatal and stop a run from starting.
//! - Selection errors are recoverable and carry a user-facing message.
//!
//! Sprite failures and empty spawn pools never surface here: the first
//! degrades to placeholder rendering, the second skips a spawn tick.

use thiserror::Error;

use crate::config::{DifficultyId, EnemyId};

/// Invalid or incomplete game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no preset configured for difficulty '{0}'")]
    MissingPreset(DifficultyId),

    #[error("enemy catalog is empty")]
    EmptyCatalog,

    #[error("difficulty '{difficulty}' has no progression rules")]
    NoProgression { difficulty: DifficultyId },

    #[error("progression for '{difficulty}' references unknown enemy '{enemy}'")]
    UnknownEnemy {
        difficulty: DifficultyId,
        enemy: EnemyId,
    },

    #[error("progression for '{difficulty}': '{enemy}' retires itself")]
    SelfRetire {
        difficulty: DifficultyId,
        enemy: EnemyId,
    },

    #[error("preset '{difficulty}': {reason}")]
    InvalidPreset {
        difficulty: DifficultyId,
        reason: &'static str,
    },

    #[error("enemy '{enemy}': {reason}")]
    InvalidEnemy {
        enemy: EnemyId,
        reason: &'static str,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The player's quiz filter matched nothing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No hay verbos para esta combinación.")]
    NoMatchingVerbs { tense: String },

    #[error("Selecciona una dificultad para comenzar.")]
    NoDifficulty,
}

/// A name that does not match any known identifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

/// Anything that can stop a session from starting
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("malformed verb data: {0}")]
    VerbData(#[source] serde_json::Error),
}
