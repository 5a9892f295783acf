//! Enemy unlock progression
//!
//! Tracks per-type kill counts for the current run and decides which enemy
//! types may spawn. Unlock thresholds count kills of the prerequisite type
//! only, never total kills. Retirement is one-way: a retired id never
//! re-enters the pool.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{EnemyId, ProgressionRule, UnlockEffect};

/// Change to the active pool caused by an unlock evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionEvent {
    Unlocked(EnemyId),
    Retired(EnemyId),
}

/// Per-run unlock state for one difficulty's rule set
#[derive(Debug, Clone)]
pub struct EnemyProgression {
    rules: Vec<ProgressionRule>,
    /// Parallel to `rules`
    unlocked: Vec<bool>,
    active_pool: Vec<EnemyId>,
    retired: BTreeSet<EnemyId>,
    kills: BTreeMap<EnemyId, u32>,
}

impl EnemyProgression {
    /// Reset kill counters and unlock everything without a prerequisite.
    ///
    /// If nothing unlocks but rules exist, the first rule is forced open so a
    /// run always has something to spawn.
    pub fn initialize(rules: &[ProgressionRule]) -> Self {
        let kills = rules
            .iter()
            .flat_map(ProgressionRule::referenced_ids)
            .map(|id| (id, 0))
            .collect();

        let mut progression = Self {
            rules: rules.to_vec(),
            unlocked: vec![false; rules.len()],
            active_pool: Vec::new(),
            retired: BTreeSet::new(),
            kills,
        };

        progression.evaluate_unlocks();

        if progression.active_pool.is_empty() && !progression.rules.is_empty() {
            log::warn!(
                "No enemy unlocked at start, forcing {}",
                progression.rules[0].enemy
            );
            progression.unlock(0);
        }

        progression
    }

    /// Count a kill, then re-check every locked rule
    pub fn register_kill(&mut self, enemy: EnemyId) -> Vec<ProgressionEvent> {
        *self.kills.entry(enemy).or_insert(0) += 1;
        self.evaluate_unlocks()
    }

    /// Unlock every locked rule whose condition now holds
    pub fn evaluate_unlocks(&mut self) -> Vec<ProgressionEvent> {
        let mut events = Vec::new();
        for index in 0..self.rules.len() {
            if self.unlocked[index] {
                continue;
            }
            let ready = match self.rules[index].unlock {
                None => true,
                Some(condition) => self.kills(condition.after) >= condition.kills,
            };
            if ready {
                events.extend(self.unlock(index));
            }
        }
        events
    }

    /// Mark a rule unlocked and fire its side effect (exactly once per rule)
    fn unlock(&mut self, index: usize) -> Vec<ProgressionEvent> {
        let mut events = Vec::new();
        if self.unlocked[index] {
            return events;
        }
        self.unlocked[index] = true;

        let enemy = self.rules[index].enemy;
        let effect = self.rules[index].on_unlock;
        if self.retired.contains(&enemy) {
            log::debug!("{} unlocked but already retired, not spawnable", enemy);
        } else if !self.active_pool.contains(&enemy) {
            self.active_pool.push(enemy);
            log::info!("Enemy unlocked: {}", enemy);
            events.push(ProgressionEvent::Unlocked(enemy));
        }

        if let Some(UnlockEffect::Retire(retired)) = effect
            && self.retired.insert(retired)
        {
            self.active_pool.retain(|&id| id != retired);
            log::info!("Enemy retired: {} (replaced by {})", retired, enemy);
            events.push(ProgressionEvent::Retired(retired));
        }

        events
    }

    /// Enemy types currently eligible to spawn
    pub fn active_pool(&self) -> &[EnemyId] {
        &self.active_pool
    }

    pub fn kills(&self, enemy: EnemyId) -> u32 {
        self.kills.get(&enemy).copied().unwrap_or(0)
    }

    pub fn total_kills(&self) -> u32 {
        self.kills.values().sum()
    }

    pub fn is_retired(&self, enemy: EnemyId) -> bool {
        self.retired.contains(&enemy)
    }

    pub fn is_unlocked(&self, enemy: EnemyId) -> bool {
        self.rules
            .iter()
            .zip(&self.unlocked)
            .any(|(rule, &unlocked)| unlocked && rule.enemy == enemy)
    }
}
