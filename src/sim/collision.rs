//! Projectile vs monster collision
//!
//! Everything is an axis-aligned box. A projectile resolves against at most
//! one monster per step and is spent on that hit whether or not the monster
//! survives.

use super::state::{Monster, Projectile};
use crate::aabb_overlap;

/// Outcome of a projectile striking a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResult {
    /// Index into the monster list that was struck
    pub monster_index: usize,
    /// Damage actually removed from the monster
    pub damage: u32,
    /// Monster health reached zero
    pub killed: bool,
}

/// Whether a projectile's box overlaps a monster's box
#[inline]
pub fn projectile_overlaps(projectile: &Projectile, monster: &Monster) -> bool {
    aabb_overlap(projectile.pos, projectile.size, monster.pos, monster.size)
}

/// Newest living monster the projectile overlaps
pub fn find_target(projectile: &Projectile, monsters: &[Monster]) -> Option<usize> {
    monsters
        .iter()
        .rposition(|m| m.is_alive() && projectile_overlaps(projectile, m))
}

/// Apply a projectile's power to a monster. Health floors at zero.
pub fn apply_hit(monster: &mut Monster, monster_index: usize, power: u32) -> HitResult {
    let damage = power.min(monster.health);
    monster.health -= damage;
    HitResult {
        monster_index,
        damage,
        killed: !monster.is_alive(),
    }
}

/// Find and apply this projectile's hit, if any
pub fn resolve_projectile(projectile: &Projectile, monsters: &mut [Monster]) -> Option<HitResult> {
    let index = find_target(projectile, monsters)?;
    Some(apply_hit(&mut monsters[index], index, projectile.power))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyId;
    use glam::Vec2;

    fn monster(id: u32, x: f32, health: u32) -> Monster {
        Monster {
            id,
            kind: EnemyId::Enemigo1,
            pos: Vec2::new(x, 100.0),
            size: Vec2::new(48.0, 64.0),
            speed: 1.0,
            health,
            health_max: health,
            score_value: 10,
        }
    }

    fn projectile(x: f32, power: u32) -> Projectile {
        Projectile {
            id: 99,
            pos: Vec2::new(x, 120.0),
            size: Vec2::new(15.0, 10.0),
            speed: 8.0,
            power,
        }
    }

    #[test]
    fn test_overlap_and_miss() {
        let m = monster(1, 200.0, 2);
        assert!(projectile_overlaps(&projectile(190.0, 1), &m));
        assert!(!projectile_overlaps(&projectile(100.0, 1), &m));
        // Vertical miss
        let mut high = projectile(200.0, 1);
        high.pos.y = 10.0;
        assert!(!projectile_overlaps(&high, &m));
    }

    #[test]
    fn test_single_target_per_projectile() {
        // Overlapping both: the most recently spawned one takes the hit
        let mut monsters = vec![monster(1, 200.0, 3), monster(2, 205.0, 3)];
        let hit = resolve_projectile(&projectile(200.0, 1), &mut monsters).unwrap();
        assert_eq!(hit.monster_index, 1);
        assert_eq!(monsters[0].health, 3);
        assert_eq!(monsters[1].health, 2);
    }

    #[test]
    fn test_dead_monsters_are_not_targets() {
        let mut monsters = vec![monster(1, 200.0, 3), monster(2, 205.0, 0)];
        let hit = resolve_projectile(&projectile(200.0, 1), &mut monsters).unwrap();
        assert_eq!(hit.monster_index, 0);
    }

    #[test]
    fn test_power_at_least_health_kills() {
        let mut m = monster(1, 200.0, 2);
        let hit = apply_hit(&mut m, 0, 5);
        assert!(hit.killed);
        assert_eq!(hit.damage, 2);
        assert_eq!(m.health, 0);
        assert!(m.health <= m.health_max);
    }

    #[test]
    fn test_no_target() {
        let mut monsters = vec![monster(1, 600.0, 2)];
        assert!(resolve_projectile(&projectile(100.0, 1), &mut monsters).is_none());
    }
}
