//! Game session: owner of the config and of at most one run
//!
//! The UI talks only to [`GameSession`]: start a run, step it each frame,
//! report correct quiz answers, read snapshots, reset. Starting a new run
//! replaces the previous one wholesale and bumps the run generation so any
//! frame callback still holding the old generation can be recognised as
//! stale.

use super::snapshot::RenderSnapshot;
use super::state::{GameEvent, GamePhase, GameState, PlayArea};
use super::tick::tick;
use crate::config::{DifficultyId, GameConfig};
use crate::consts::BASE_ATTACK_POWER;
use crate::error::ConfigError;

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    run: Option<GameState>,
    generation: u64,
}

impl GameSession {
    /// Create a session. The config is validated once here.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            run: None,
            generation: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh run, discarding any previous one.
    ///
    /// Returns the new run generation. On error the session keeps whatever
    /// state it had before.
    pub fn start(
        &mut self,
        difficulty: DifficultyId,
        area: PlayArea,
        seed: u64,
    ) -> Result<u64, ConfigError> {
        let state = GameState::new(&self.config, difficulty, area, seed)?;
        self.generation += 1;
        log::info!(
            "Run {} started: {} ({}x{}), seed {}",
            self.generation,
            state.preset.label,
            area.width,
            area.height,
            seed
        );
        self.run = Some(state);
        Ok(self.generation)
    }

    /// Drop the current run and return to the selection screen
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            self.generation += 1;
            log::info!("Run discarded, back to selection");
        }
    }

    /// Advance the current run; no-op while idle or after the run ended
    pub fn step(&mut self, now_ms: f64) -> Vec<GameEvent> {
        match self.run.as_mut() {
            Some(state) => tick(state, now_ms),
            None => Vec::new(),
        }
    }

    /// Correct quiz answer. Ignored once the run is over.
    ///
    /// Returns the new attack power if it changed.
    pub fn on_correct_answer(&mut self) -> Option<u32> {
        match self.run.as_mut() {
            Some(state) if !state.is_over() => {
                let power = state.grant_attack_power();
                log::debug!("Attack power is now {}", power);
                Some(power)
            }
            Some(_) => {
                log::warn!("Answer submitted after the run ended, ignoring");
                None
            }
            None => None,
        }
    }

    pub fn attack_power(&self) -> u32 {
        self.run
            .as_ref()
            .map(|s| s.attack_power)
            .unwrap_or(BASE_ATTACK_POWER)
    }

    pub fn phase(&self) -> GamePhase {
        self.run
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(GamePhase::Idle)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.run.as_ref().map(RenderSnapshot::capture)
    }
}
