//! Difficulty presets, enemy catalog and unlock rules
//!
//! All balance data lives here. The built-in table is returned by
//! [`GameConfig::default`]; [`GameConfig::from_json`] loads an override with
//! the same shape. A config is immutable once a run has started.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParseIdError};

/// Difficulty tiers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyId {
    Facil,
    #[default]
    Intermedio,
    Dificil,
}

impl DifficultyId {
    pub const ALL: [DifficultyId; 3] = [
        DifficultyId::Facil,
        DifficultyId::Intermedio,
        DifficultyId::Dificil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyId::Facil => "facil",
            DifficultyId::Intermedio => "intermedio",
            DifficultyId::Dificil => "dificil",
        }
    }

}

impl FromStr for DifficultyId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facil" | "fácil" | "easy" => Ok(DifficultyId::Facil),
            "intermedio" | "medium" => Ok(DifficultyId::Intermedio),
            "dificil" | "difícil" | "hard" => Ok(DifficultyId::Dificil),
            _ => Err(ParseIdError {
                kind: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DifficultyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enemy type identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyId {
    Enemigo1,
    Enemigo2,
    Enemigo3,
    Enemigo4,
    Enemigo5,
}

impl EnemyId {
    pub const ALL: [EnemyId; 5] = [
        EnemyId::Enemigo1,
        EnemyId::Enemigo2,
        EnemyId::Enemigo3,
        EnemyId::Enemigo4,
        EnemyId::Enemigo5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyId::Enemigo1 => "enemigo1",
            EnemyId::Enemigo2 => "enemigo2",
            EnemyId::Enemigo3 => "enemigo3",
            EnemyId::Enemigo4 => "enemigo4",
            EnemyId::Enemigo5 => "enemigo5",
        }
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra scaling applied once the score passes a fraction of the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LateGame {
    /// Fraction of `target_score` at which late-game scaling kicks in
    pub score_fraction: f64,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
}

/// A difficulty preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyPreset {
    pub label: String,
    pub castle_lives: u32,
    pub target_score: u64,
    /// Initial gap between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Floor for the decaying spawn interval (ms)
    pub min_spawn_interval_ms: f64,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
    #[serde(default)]
    pub late_game: Option<LateGame>,
}

impl DifficultyPreset {
    /// Whether late-game scaling applies at this score
    pub fn is_late_game(&self, score: u64) -> bool {
        self.late_game
            .is_some_and(|late| score as f64 >= self.target_score as f64 * late.score_fraction)
    }

    /// Effective (health, speed) multipliers at the given score
    pub fn enemy_multipliers(&self, score: u64) -> (f32, f32) {
        match self.late_game {
            Some(late) if self.is_late_game(score) => (
                self.health_multiplier * late.health_multiplier,
                self.speed_multiplier * late.speed_multiplier,
            ),
            _ => (self.health_multiplier, self.speed_multiplier),
        }
    }

    fn validate(&self, id: DifficultyId) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidPreset {
            difficulty: id,
            reason,
        };
        if self.castle_lives == 0 {
            return Err(invalid("castle lives must be positive"));
        }
        if self.target_score == 0 {
            return Err(invalid("target score must be positive"));
        }
        if self.min_spawn_interval_ms <= 0.0 {
            return Err(invalid("minimum spawn interval must be positive"));
        }
        if self.spawn_interval_ms < self.min_spawn_interval_ms {
            return Err(invalid("spawn interval is below its minimum"));
        }
        if self.health_multiplier <= 0.0 || self.speed_multiplier <= 0.0 {
            return Err(invalid("enemy multipliers must be positive"));
        }
        if let Some(late) = self.late_game {
            if !(late.score_fraction > 0.0 && late.score_fraction <= 1.0) {
                return Err(invalid("late-game threshold must be in (0, 1]"));
            }
            if late.health_multiplier <= 0.0 || late.speed_multiplier <= 0.0 {
                return Err(invalid("late-game multipliers must be positive"));
            }
        }
        Ok(())
    }
}

/// Speed range in pixels per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

/// Enemy catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyType {
    pub base_health: u32,
    pub speed: SpeedRange,
    pub score_value: u64,
    /// Opaque sprite identifier for the renderer
    pub sprite: String,
}

/// Prerequisite for unlocking an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockCondition {
    /// Enemy type whose kills are counted
    pub after: EnemyId,
    pub kills: u32,
}

/// Side effect fired once when a rule unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnlockEffect {
    /// Permanently remove an enemy from the active pool
    Retire(EnemyId),
}

/// One entry of a difficulty's progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRule {
    pub enemy: EnemyId,
    /// `None` means unlocked from the start
    #[serde(default)]
    pub unlock: Option<UnlockCondition>,
    #[serde(default)]
    pub on_unlock: Option<UnlockEffect>,
}

impl ProgressionRule {
    pub fn initial(enemy: EnemyId) -> Self {
        Self {
            enemy,
            unlock: None,
            on_unlock: None,
        }
    }

    pub fn after(enemy: EnemyId, prerequisite: EnemyId, kills: u32) -> Self {
        Self {
            enemy,
            unlock: Some(UnlockCondition {
                after: prerequisite,
                kills,
            }),
            on_unlock: None,
        }
    }

    pub fn retiring(mut self, retired: EnemyId) -> Self {
        self.on_unlock = Some(UnlockEffect::Retire(retired));
        self
    }

    /// Every enemy id this rule mentions
    pub fn referenced_ids(&self) -> impl Iterator<Item = EnemyId> + '_ {
        let prerequisite = self.unlock.map(|c| c.after);
        let retired = self.on_unlock.map(|UnlockEffect::Retire(id)| id);
        std::iter::once(self.enemy).chain(prerequisite).chain(retired)
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub presets: BTreeMap<DifficultyId, DifficultyPreset>,
    pub catalog: BTreeMap<EnemyId, EnemyType>,
    pub progression: BTreeMap<DifficultyId, Vec<ProgressionRule>>,
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} presets, {} enemy types",
            config.presets.len(),
            config.catalog.len()
        );
        Ok(config)
    }

    /// Check every preset, catalog entry and rule set
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (&id, enemy) in &self.catalog {
            if enemy.base_health == 0 {
                return Err(ConfigError::InvalidEnemy {
                    enemy: id,
                    reason: "base health must be positive",
                });
            }
            if enemy.speed.min < 0.0 || enemy.speed.min > enemy.speed.max {
                return Err(ConfigError::InvalidEnemy {
                    enemy: id,
                    reason: "speed range must satisfy 0 <= min <= max",
                });
            }
        }
        for (&id, preset) in &self.presets {
            preset.validate(id)?;
            let rules = self.rules(id);
            if rules.is_empty() {
                return Err(ConfigError::NoProgression { difficulty: id });
            }
            if let Some(rule) = rules
                .iter()
                .find(|r| r.on_unlock == Some(UnlockEffect::Retire(r.enemy)))
            {
                return Err(ConfigError::SelfRetire {
                    difficulty: id,
                    enemy: rule.enemy,
                });
            }
            for enemy in rules.iter().flat_map(ProgressionRule::referenced_ids) {
                if !self.catalog.contains_key(&enemy) {
                    return Err(ConfigError::UnknownEnemy {
                        difficulty: id,
                        enemy,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn preset(&self, id: DifficultyId) -> Result<&DifficultyPreset, ConfigError> {
        self.presets.get(&id).ok_or(ConfigError::MissingPreset(id))
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&EnemyType> {
        self.catalog.get(&id)
    }

    /// Progression rules for a difficulty (empty if none configured)
    pub fn rules(&self, id: DifficultyId) -> &[ProgressionRule] {
        self.progression.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        use DifficultyId::*;
        use EnemyId::*;

        let presets = BTreeMap::from([
            (
                Facil,
                DifficultyPreset {
                    label: "Fácil".into(),
                    castle_lives: 10,
                    target_score: 1000,
                    spawn_interval_ms: 3500.0,
                    min_spawn_interval_ms: 1200.0,
                    health_multiplier: 0.75,
                    speed_multiplier: 0.85,
                    late_game: None,
                },
            ),
            (
                Intermedio,
                DifficultyPreset {
                    label: "Intermedio".into(),
                    castle_lives: 5,
                    target_score: 2000,
                    spawn_interval_ms: 3000.0,
                    min_spawn_interval_ms: 700.0,
                    health_multiplier: 1.0,
                    speed_multiplier: 1.0,
                    late_game: Some(LateGame {
                        score_fraction: 0.7,
                        health_multiplier: 1.25,
                        speed_multiplier: 1.1,
                    }),
                },
            ),
            (
                Dificil,
                DifficultyPreset {
                    label: "Difícil".into(),
                    castle_lives: 3,
                    target_score: 5000,
                    spawn_interval_ms: 2600.0,
                    min_spawn_interval_ms: 450.0,
                    health_multiplier: 1.35,
                    speed_multiplier: 1.25,
                    late_game: None,
                },
            ),
        ]);

        let enemy = |base_health, min, max, score_value, sprite: &str| EnemyType {
            base_health,
            speed: SpeedRange { min, max },
            score_value,
            sprite: sprite.into(),
        };
        let catalog = BTreeMap::from([
            (Enemigo1, enemy(2, 0.5, 1.0, 10, "assets/enemigo1.svg")),
            (Enemigo2, enemy(4, 1.0, 2.0, 25, "assets/enemigo2.svg")),
            (Enemigo3, enemy(6, 0.8, 1.4, 40, "assets/enemigo3.svg")),
            (Enemigo4, enemy(9, 1.2, 1.8, 60, "assets/enemigo4.svg")),
            (Enemigo5, enemy(14, 0.6, 1.0, 100, "assets/enemigo5.svg")),
        ]);

        let progression = BTreeMap::from([
            (
                Facil,
                vec![
                    ProgressionRule::initial(Enemigo1),
                    ProgressionRule::after(Enemigo2, Enemigo1, 8),
                    ProgressionRule::after(Enemigo3, Enemigo2, 10),
                ],
            ),
            (
                Intermedio,
                vec![
                    ProgressionRule::initial(Enemigo1),
                    ProgressionRule::after(Enemigo2, Enemigo1, 6),
                    ProgressionRule::after(Enemigo3, Enemigo2, 6),
                    ProgressionRule::after(Enemigo4, Enemigo3, 8).retiring(Enemigo1),
                ],
            ),
            (
                Dificil,
                vec![
                    ProgressionRule::initial(Enemigo1),
                    ProgressionRule::initial(Enemigo2),
                    ProgressionRule::after(Enemigo3, Enemigo2, 5),
                    ProgressionRule::after(Enemigo4, Enemigo3, 6).retiring(Enemigo1),
                    ProgressionRule::after(Enemigo5, Enemigo4, 6).retiring(Enemigo2),
                ],
            ),
        ]);

        Self {
            presets,
            catalog,
            progression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_catalog_is_monotonic() {
        let config = GameConfig::default();
        let entries: Vec<_> = config.catalog.values().collect();
        for pair in entries.windows(2) {
            assert!(pair[0].base_health < pair[1].base_health);
            assert!(pair[0].score_value < pair[1].score_value);
        }
    }

    #[test]
    fn test_late_game_multipliers() {
        let config = GameConfig::default();
        let preset = config.preset(DifficultyId::Intermedio).unwrap();
        assert_eq!(preset.enemy_multipliers(0), (1.0, 1.0));
        assert!(!preset.is_late_game(1399));
        assert!(preset.is_late_game(1400));
        assert_eq!(preset.enemy_multipliers(1400), (1.25, 1.1));

        // No late game configured: multipliers never change
        let easy = config.preset(DifficultyId::Facil).unwrap();
        assert_eq!(easy.enemy_multipliers(u64::MAX), (0.75, 0.85));
    }

    #[test]
    fn test_missing_preset() {
        let mut config = GameConfig::default();
        config.presets.remove(&DifficultyId::Dificil);
        assert!(matches!(
            config.preset(DifficultyId::Dificil),
            Err(ConfigError::MissingPreset(DifficultyId::Dificil))
        ));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let mut config = GameConfig::default();
        config.catalog.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_unknown_enemy_rejected() {
        let mut config = GameConfig::default();
        config.catalog.remove(&EnemyId::Enemigo4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownEnemy {
                enemy: EnemyId::Enemigo4,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_spawn_bounds_rejected() {
        let mut config = GameConfig::default();
        if let Some(preset) = config.presets.get_mut(&DifficultyId::Facil) {
            preset.min_spawn_interval_ms = 5000.0;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPreset {
                difficulty: DifficultyId::Facil,
                ..
            })
        ));
    }

    #[test]
    fn test_json_round_trip_of_builtin_table() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        assert!(json.contains("\"enemigo1\""));
        assert!(json.contains("\"retire\":\"enemigo1\""));
        let parsed = GameConfig::from_json(&json).unwrap();
        assert_eq!(parsed, GameConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Fácil".parse(), Ok(DifficultyId::Facil));
        assert_eq!("hard".parse(), Ok(DifficultyId::Dificil));
        let err = "nightmare".parse::<DifficultyId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty 'nightmare'");
    }
}
