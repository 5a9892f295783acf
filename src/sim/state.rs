//! Run state and entity store
//!
//! Everything owned by a single run lives in [`GameState`]. A new run builds
//! a fresh value; nothing is carried over from the previous one.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progression::EnemyProgression;
use crate::config::{DifficultyId, DifficultyPreset, EnemyId, EnemyType, GameConfig};
use crate::consts::*;
use crate::error::ConfigError;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run started yet
    Idle,
    /// Simulation advancing every frame
    Running,
    /// Terminal until the run is re-initialized
    Ended(Outcome),
}

/// Something that happened during a step (for UI messages and logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MonsterSpawned { id: u32, kind: EnemyId, health: u32 },
    ProjectileFired { id: u32, power: u32 },
    CastleHit { lives_remaining: u32 },
    MonsterKilled { id: u32, kind: EnemyId, score: u64 },
    EnemyUnlocked(EnemyId),
    EnemyRetired(EnemyId),
    Victory,
    Defeat,
}

/// Drawable surface dimensions (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn terrain_height(&self) -> f32 {
        self.height * TERRAIN_FRACTION
    }

    /// Y coordinate of the terrain surface
    pub fn ground_y(&self) -> f32 {
        self.height - self.terrain_height()
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(1024.0, 600.0)
    }
}

/// The auto-firing hero (fixed position)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub pos: Vec2,
    pub size: Vec2,
    pub last_fire_ms: f64,
    pub fire_interval_ms: f64,
}

impl Hero {
    /// Right edge of the hero; monsters crossing it hit the castle
    pub fn front_x(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Top-left corner of a projectile leaving the hero
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.front_x(),
            self.pos.y + self.size.y / 2.0 - PROJECTILE_HEIGHT / 2.0,
        )
    }
}

/// The castle being defended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Castle {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u32,
    pub lives_max: u32,
}

impl Castle {
    /// Remaining health as 0..=1 (for the health bar)
    pub fn health_fraction(&self) -> f32 {
        if self.lives_max == 0 {
            0.0
        } else {
            self.lives as f32 / self.lives_max as f32
        }
    }
}

/// An approaching enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub kind: EnemyId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame, leftward
    pub speed: f32,
    pub health: u32,
    pub health_max: u32,
    pub score_value: u64,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.health_max.max(1) as f32
    }
}

/// A hero shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame, rightward
    pub speed: f32,
    /// Damage dealt on hit (attack power at fire time)
    pub power: u32,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub difficulty: DifficultyId,
    pub preset: DifficultyPreset,
    catalog: BTreeMap<EnemyId, EnemyType>,
    pub area: PlayArea,
    /// Castle lives remaining (mirrored in `castle.lives`)
    pub lives: u32,
    pub score: u64,
    /// Damage per projectile, raised by correct quiz answers
    pub attack_power: u32,
    pub phase: GamePhase,
    pub last_spawn_ms: f64,
    pub spawn_interval_ms: f64,
    pub hero: Hero,
    pub castle: Castle,
    /// Live monsters, oldest first
    pub monsters: Vec<Monster>,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    pub progression: EnemyProgression,
    next_id: u32,
}

impl GameState {
    /// Initialize a run. Fails if the config does not validate or the
    /// difficulty has no preset; nothing is created in that case.
    pub fn new(
        config: &GameConfig,
        difficulty: DifficultyId,
        area: PlayArea,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let preset = config.preset(difficulty)?.clone();

        let ground_y = area.ground_y();
        let max_castle = (area.height - area.terrain_height() - CASTLE_HEADROOM).max(CASTLE_MIN_SIZE);
        let castle_size = max_castle.min(CASTLE_MAX_SIZE);
        let castle = Castle {
            pos: Vec2::new(
                CASTLE_X,
                (ground_y - castle_size + CASTLE_SINK).max(0.0),
            ),
            size: Vec2::splat(castle_size),
            lives: preset.castle_lives,
            lives_max: preset.castle_lives,
        };

        let hero = Hero {
            pos: Vec2::new(
                CASTLE_X + castle_size / 2.0 - HERO_WIDTH / 2.0,
                ground_y - HERO_HEIGHT,
            ),
            size: Vec2::new(HERO_WIDTH, HERO_HEIGHT),
            last_fire_ms: 0.0,
            fire_interval_ms: HERO_FIRE_INTERVAL_MS,
        };

        let progression = EnemyProgression::initialize(config.rules(difficulty));

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            lives: preset.castle_lives,
            score: 0,
            attack_power: BASE_ATTACK_POWER,
            phase: GamePhase::Running,
            last_spawn_ms: 0.0,
            spawn_interval_ms: preset.spawn_interval_ms,
            preset,
            catalog: config.catalog.clone(),
            area,
            hero,
            castle,
            monsters: Vec::new(),
            projectiles: Vec::new(),
            progression,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Catalog entry this run was configured with
    pub fn enemy_type(&self, id: EnemyId) -> Option<&EnemyType> {
        self.catalog.get(&id)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    /// Correct quiz answer: projectiles fired from now on hit one point harder
    pub fn grant_attack_power(&mut self) -> u32 {
        self.attack_power += 1;
        self.attack_power
    }

    /// Drop one castle life (floored at zero)
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.castle.lives = self.lives;
        self.lives
    }

    /// Pick a random spawnable enemy type
    pub fn roll_enemy(&mut self) -> Option<EnemyId> {
        self.progression.active_pool().choose(&mut self.rng).copied()
    }

    /// Spawn a monster at the right edge of the play area, on the ground.
    ///
    /// Health and speed are scaled by the preset, including late-game
    /// scaling once the score passes the threshold.
    pub fn spawn_monster(&mut self, kind: EnemyId) -> Option<GameEvent> {
        let Some(enemy) = self.catalog.get(&kind) else {
            log::warn!("Enemy {} missing from catalog, skipping spawn", kind);
            return None;
        };
        let (health_mult, speed_mult) = self.preset.enemy_multipliers(self.score);
        let health = ((enemy.base_health as f32 * health_mult).round() as u32).max(1);
        let base_speed = self.rng.random_range(enemy.speed.min..=enemy.speed.max);
        let score_value = enemy.score_value;

        let id = self.next_entity_id();
        let size = Vec2::new(MONSTER_WIDTH, MONSTER_HEIGHT);
        self.monsters.push(Monster {
            id,
            kind,
            pos: Vec2::new(self.area.width, self.area.ground_y() - size.y),
            size,
            speed: base_speed * speed_mult,
            health,
            health_max: health,
            score_value,
        });
        log::debug!("Spawned {} #{} (hp {})", kind, id, health);
        Some(GameEvent::MonsterSpawned { id, kind, health })
    }

    /// Fire one projectile from the hero at the current attack power
    pub fn fire_projectile(&mut self) -> GameEvent {
        let id = self.next_entity_id();
        let power = self.attack_power;
        self.projectiles.push(Projectile {
            id,
            pos: self.hero.muzzle(),
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed: PROJECTILE_SPEED,
            power,
        });
        GameEvent::ProjectileFired { id, power }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state(difficulty: DifficultyId) -> GameState {
        GameState::new(&GameConfig::default(), difficulty, PlayArea::default(), 7).unwrap()
    }

    #[test]
    fn test_new_state_matches_preset() {
        let config = GameConfig::default();
        for difficulty in DifficultyId::ALL {
            let state = new_state(difficulty);
            let preset = config.preset(difficulty).unwrap();
            assert_eq!(state.lives, preset.castle_lives);
            assert_eq!(state.castle.lives, preset.castle_lives);
            assert_eq!(state.castle.lives_max, preset.castle_lives);
            assert_eq!(state.score, 0);
            assert_eq!(state.attack_power, 1);
            assert_eq!(state.phase, GamePhase::Running);
            assert!(state.monsters.is_empty());
            assert!(state.projectiles.is_empty());
        }
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 0.001
    }

    #[test]
    fn test_layout() {
        let state = new_state(DifficultyId::Facil);
        let area = PlayArea::default();
        // 600 * 0.15 = 90 terrain; castle = min(260, max(160, 600 - 90 - 60))
        assert!((area.ground_y() - 510.0).abs() < 0.001);
        assert!(approx(state.castle.size, Vec2::splat(260.0)));
        assert!(approx(state.castle.pos, Vec2::new(40.0, 270.0)));
        assert!(approx(state.hero.pos, Vec2::new(146.0, 446.0)));
        assert!(approx(state.hero.muzzle(), Vec2::new(194.0, 473.0)));
    }

    #[test]
    fn test_layout_small_area() {
        let state = GameState::new(
            &GameConfig::default(),
            DifficultyId::Facil,
            PlayArea::new(400.0, 200.0),
            7,
        )
        .unwrap();
        // Castle never shrinks below 160 and never leaves the top of the area
        assert!(approx(state.castle.size, Vec2::splat(160.0)));
        assert!(state.castle.pos.y >= 0.0);
    }

    #[test]
    fn test_missing_preset_is_fatal() {
        let mut config = GameConfig::default();
        config.presets.clear();
        let result = GameState::new(&config, DifficultyId::Facil, PlayArea::default(), 1);
        assert!(matches!(result, Err(ConfigError::MissingPreset(_))));
    }

    #[test]
    fn test_invalid_catalog_rejected_before_run() {
        let mut config = GameConfig::default();
        if let Some(enemy) = config.catalog.get_mut(&EnemyId::Enemigo1) {
            enemy.speed.min = 3.0;
        }
        let result = GameState::new(&config, DifficultyId::Facil, PlayArea::default(), 1);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnemy {
                enemy: EnemyId::Enemigo1,
                ..
            })
        ));

        config.catalog.clear();
        let result = GameState::new(&config, DifficultyId::Facil, PlayArea::default(), 1);
        assert!(matches!(result, Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_spawn_health_scaling() {
        let mut state = new_state(DifficultyId::Facil);
        // 2 * 0.75 = 1.5 rounds to 2
        let event = state.spawn_monster(EnemyId::Enemigo1);
        assert!(matches!(
            event,
            Some(GameEvent::MonsterSpawned { health: 2, .. })
        ));
        let monster = &state.monsters[0];
        assert_eq!(monster.pos.x, state.area.width);
        assert_eq!(monster.pos.y + monster.size.y, state.area.ground_y());
        assert!(monster.speed >= 0.5 * 0.85 && monster.speed <= 1.0 * 0.85);
    }

    #[test]
    fn test_spawn_late_game_scaling() {
        let mut state = new_state(DifficultyId::Intermedio);
        state.score = 1400;
        state.spawn_monster(EnemyId::Enemigo2);
        // 4 * 1.25 = 5
        assert_eq!(state.monsters[0].health, 5);
        assert!(state.monsters[0].speed >= 1.0 * 1.1 - 0.0001);
    }

    #[test]
    fn test_fire_uses_current_attack_power() {
        let mut state = new_state(DifficultyId::Facil);
        state.grant_attack_power();
        state.grant_attack_power();
        let event = state.fire_projectile();
        assert!(matches!(event, GameEvent::ProjectileFired { power: 3, .. }));
        // Firing does not consume attack power
        assert_eq!(state.attack_power, 3);
        assert_eq!(state.projectiles[0].pos, state.hero.muzzle());
    }

    #[test]
    fn test_lose_life_floors_at_zero() {
        let mut state = new_state(DifficultyId::Dificil);
        for _ in 0..10 {
            state.lose_life();
        }
        assert_eq!(state.lives, 0);
        assert_eq!(state.castle.lives, 0);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = new_state(DifficultyId::Facil);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
