//! Read-only view of a run for renderers
//!
//! A snapshot is a plain copy: drawing from it can never mutate the run.

use serde::Serialize;

use super::state::{GamePhase, GameState, Outcome};
use crate::assets::{CASTLE_SPRITE, HERO_SPRITE};
use crate::config::EnemyId;

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    fn new(pos: glam::Vec2, size: glam::Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroView {
    pub rect: Rect,
    pub sprite: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CastleView {
    pub rect: Rect,
    pub sprite: &'static str,
    pub lives: u32,
    pub lives_max: u32,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonsterView {
    pub id: u32,
    pub kind: EnemyId,
    pub rect: Rect,
    pub sprite: String,
    pub health: u32,
    pub health_max: u32,
    /// Width fraction of the health bar
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub rect: Rect,
    pub power: u32,
    /// Brighter shots for higher power
    pub glow_alpha: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub difficulty_label: String,
    pub width: f32,
    pub height: f32,
    pub terrain_height: f32,
    pub hero: HeroView,
    pub castle: CastleView,
    pub monsters: Vec<MonsterView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: u64,
    pub target_score: u64,
    pub lives: u32,
    pub attack_power: u32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let monsters = state
            .monsters
            .iter()
            .map(|m| MonsterView {
                id: m.id,
                kind: m.kind,
                rect: Rect::new(m.pos, m.size),
                sprite: state
                    .enemy_type(m.kind)
                    .map(|e| e.sprite.clone())
                    .unwrap_or_default(),
                health: m.health,
                health_max: m.health_max,
                health_fraction: m.health_fraction(),
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                rect: Rect::new(p.pos, p.size),
                power: p.power,
                glow_alpha: glow_alpha(p.power),
            })
            .collect();

        Self {
            phase: state.phase,
            difficulty_label: state.preset.label.clone(),
            width: state.area.width,
            height: state.area.height,
            terrain_height: state.area.terrain_height(),
            hero: HeroView {
                rect: Rect::new(state.hero.pos, state.hero.size),
                sprite: HERO_SPRITE,
            },
            castle: CastleView {
                rect: Rect::new(state.castle.pos, state.castle.size),
                sprite: CASTLE_SPRITE,
                lives: state.castle.lives,
                lives_max: state.castle.lives_max,
                health_fraction: state.castle.health_fraction(),
            },
            monsters,
            projectiles,
            score: state.score,
            target_score: state.preset.target_score,
            lives: state.lives,
            attack_power: state.attack_power,
        }
    }

    /// HUD lines: castle, goal, score, attack power
    pub fn hud(&self) -> [String; 4] {
        [
            format!("🏰 Castillo: {}/{}", self.lives, self.castle.lives_max),
            format!("🎯 Meta ({}): {}", self.difficulty_label, self.target_score),
            format!("Puntuación: {}", self.score),
            format!("🔥 Poder de Ataque: {}", self.attack_power),
        ]
    }

    /// Game-over overlay text, once the run has ended
    pub fn outcome_text(&self) -> Option<OutcomeText> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(OutcomeText::for_outcome(outcome)),
            _ => None,
        }
    }
}

/// Projectile fill alpha: 0.5 at power 0, +0.1 per point, capped at 1
pub fn glow_alpha(power: u32) -> f32 {
    (0.5 + power as f32 * 0.1).min(1.0)
}

/// Overlay text shown when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub message: &'static str,
}

impl OutcomeText {
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Victory => Self {
                title: "¡VICTORIA!",
                subtitle: "Has defendido el castillo con éxito.",
                message: "¡El castillo sigue en pie!",
            },
            Outcome::Defeat => Self {
                title: "¡FIN DEL JUEGO!",
                subtitle: "Los monstruos han superado tus defensas.",
                message: "¡El juego ha terminado!",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DifficultyId, GameConfig};
    use crate::sim::state::PlayArea;

    fn state() -> GameState {
        GameState::new(
            &GameConfig::default(),
            DifficultyId::Intermedio,
            PlayArea::default(),
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = state();
        state.spawn_monster(EnemyId::Enemigo1);
        state.fire_projectile();
        state.monsters[0].health = 1;

        let snapshot = RenderSnapshot::capture(&state);
        assert_eq!(snapshot.lives, 5);
        assert_eq!(snapshot.target_score, 2000);
        assert_eq!(snapshot.monsters.len(), 1);
        assert_eq!(snapshot.monsters[0].sprite, "assets/enemigo1.svg");
        assert!((snapshot.monsters[0].health_fraction - 0.5).abs() < 1e-6);
        assert_eq!(snapshot.projectiles[0].power, 1);
        assert!((snapshot.projectiles[0].glow_alpha - 0.6).abs() < 1e-6);
        assert_eq!(snapshot.hero.sprite, HERO_SPRITE);
        assert!(snapshot.outcome_text().is_none());
    }

    #[test]
    fn test_hud_text() {
        let snapshot = RenderSnapshot::capture(&state());
        let hud = snapshot.hud();
        assert_eq!(hud[0], "🏰 Castillo: 5/5");
        assert_eq!(hud[1], "🎯 Meta (Intermedio): 2000");
        assert_eq!(hud[2], "Puntuación: 0");
        assert_eq!(hud[3], "🔥 Poder de Ataque: 1");
    }

    #[test]
    fn test_outcome_text() {
        let mut state = state();
        state.phase = GamePhase::Ended(Outcome::Victory);
        let text = RenderSnapshot::capture(&state).outcome_text().unwrap();
        assert_eq!(text.title, "¡VICTORIA!");
    }

    #[test]
    fn test_glow_caps_at_one() {
        assert!((glow_alpha(1) - 0.6).abs() < 1e-6);
        assert_eq!(glow_alpha(50), 1.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&RenderSnapshot::capture(&state())).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
    }
}
