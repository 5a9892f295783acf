//! Per-frame simulation step
//!
//! Order within a step is fixed:
//! 1. spawn decision
//! 2. hero auto-fire
//! 3. projectile advance
//! 4. monster advance and castle damage
//! 5. projectile vs monster collisions
//!
//! Contact damage (4) always resolves before projectile hits (5), so a
//! monster that reaches the hero this step damages the castle even if a
//! projectile overlaps it. Steps 4 and 5 walk their lists newest first; the
//! stored lists stay oldest first. Once a run has ended, steps do nothing.

use super::collision;
use super::progression::ProgressionEvent;
use super::state::{GameEvent, GamePhase, GameState, Monster, Outcome};
use crate::config::EnemyId;
use crate::consts::SPAWN_DECAY;

/// Advance the run to wall-clock time `now_ms`.
///
/// Returns the events produced by this step, in order.
pub fn tick(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Running {
        return events;
    }

    // 1. Spawn
    if now_ms - state.last_spawn_ms > state.spawn_interval_ms {
        state.last_spawn_ms = now_ms;
        state.spawn_interval_ms =
            (state.spawn_interval_ms * SPAWN_DECAY).max(state.preset.min_spawn_interval_ms);
        spawn_from_pool(state, &mut events);
    }

    // 2. Hero auto-fire
    if now_ms - state.hero.last_fire_ms > state.hero.fire_interval_ms {
        state.hero.last_fire_ms = now_ms;
        events.push(state.fire_projectile());
    }

    // 3. Projectiles move right and leave past the right edge
    let width = state.area.width;
    for projectile in &mut state.projectiles {
        projectile.pos.x += projectile.speed;
    }
    state
        .projectiles
        .retain(|p| p.pos.x + p.size.x <= width);

    // 4. Monsters move left; reaching the hero costs a castle life
    advance_monsters(state, &mut events);
    if state.is_over() {
        return events;
    }

    // 5. Collisions
    resolve_collisions(state, &mut events);

    events
}

/// Spawn one monster from the active pool, re-evaluating unlocks if the pool
/// is empty. Skips the spawn if nothing is eligible.
fn spawn_from_pool(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let kind = match state.roll_enemy() {
        Some(kind) => Some(kind),
        None => {
            let changes = state.progression.evaluate_unlocks();
            push_progression_events(events, changes);
            state.roll_enemy()
        }
    };

    match kind {
        Some(kind) => events.extend(state.spawn_monster(kind)),
        None => log::warn!("Active enemy pool is empty, skipping spawn"),
    }
}

fn advance_monsters(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let hero_front = state.hero.front_x();
    let monsters = std::mem::take(&mut state.monsters);
    let mut advancing: Vec<Monster> = Vec::with_capacity(monsters.len());

    for mut monster in monsters.into_iter().rev() {
        if state.is_over() {
            // Defeat already happened this step; older monsters stay put
            advancing.push(monster);
            continue;
        }

        monster.pos.x -= monster.speed;
        if monster.pos.x < hero_front {
            let lives_remaining = state.lose_life();
            log::debug!(
                "{} #{} reached the castle ({} lives left)",
                monster.kind,
                monster.id,
                lives_remaining
            );
            events.push(GameEvent::CastleHit { lives_remaining });
            if lives_remaining == 0 {
                end_run(state, Outcome::Defeat, events);
            }
        } else {
            advancing.push(monster);
        }
    }

    advancing.reverse();
    state.monsters = advancing;
}

fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut remaining = Vec::with_capacity(projectiles.len());

    for projectile in projectiles.into_iter().rev() {
        if state.is_over() {
            remaining.push(projectile);
            continue;
        }

        let Some(hit) = collision::resolve_projectile(&projectile, &mut state.monsters) else {
            remaining.push(projectile);
            continue;
        };

        if hit.killed {
            let monster = &state.monsters[hit.monster_index];
            let (id, kind, score) = (monster.id, monster.kind, monster.score_value);
            award_kill(state, id, kind, score, events);
        }
    }

    remaining.reverse();
    state.projectiles = remaining;
    state.monsters.retain(Monster::is_alive);
}

fn award_kill(
    state: &mut GameState,
    id: u32,
    kind: EnemyId,
    score: u64,
    events: &mut Vec<GameEvent>,
) {
    let changes = state.progression.register_kill(kind);
    state.score += score;
    log::debug!("Killed {} #{} (+{}, score {})", kind, id, score, state.score);
    events.push(GameEvent::MonsterKilled { id, kind, score });
    push_progression_events(events, changes);

    if state.score >= state.preset.target_score {
        end_run(state, Outcome::Victory, events);
    }
}

fn push_progression_events(events: &mut Vec<GameEvent>, changes: Vec<ProgressionEvent>) {
    events.extend(changes.into_iter().map(|change| match change {
        ProgressionEvent::Unlocked(id) => GameEvent::EnemyUnlocked(id),
        ProgressionEvent::Retired(id) => GameEvent::EnemyRetired(id),
    }));
}

fn end_run(state: &mut GameState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    if state.is_over() {
        return;
    }
    state.phase = GamePhase::Ended(outcome);
    log::info!(
        "Run ended: {:?} ({}, score {}/{}, lives {})",
        outcome,
        state.preset.label,
        state.score,
        state.preset.target_score,
        state.lives
    );
    events.push(match outcome {
        Outcome::Victory => GameEvent::Victory,
        Outcome::Defeat => GameEvent::Defeat,
    });
}
