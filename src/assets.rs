//! Sprite table
//!
//! Sprites load asynchronously before the first run. A sprite that fails to
//! load is logged and drawn as a flat placeholder rectangle instead; it never
//! stops the game.

use std::collections::BTreeMap;

use crate::config::GameConfig;

pub const HERO_SPRITE: &str = "assets/hero.svg";
pub const CASTLE_SPRITE: &str = "assets/castle.svg";

/// What a sprite is used for (decides the placeholder colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRole {
    Hero,
    Castle,
    Monster,
}

impl SpriteRole {
    pub fn for_sprite(sprite: &str) -> Self {
        match sprite {
            HERO_SPRITE => SpriteRole::Hero,
            CASTLE_SPRITE => SpriteRole::Castle,
            _ => SpriteRole::Monster,
        }
    }

    pub fn placeholder_color(&self) -> &'static str {
        match self {
            SpriteRole::Hero => "#007BFF",
            SpriteRole::Castle => "#a8a29e",
            SpriteRole::Monster => "#28a745",
        }
    }
}

/// How to draw one sprite reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSlot<'a> {
    /// Loaded image, keyed by its sprite reference
    Image(&'a str),
    Placeholder { color: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Loaded,
    Failed,
}

/// Load results for every sprite the game may draw
#[derive(Debug, Clone, Default)]
pub struct SpriteTable {
    entries: BTreeMap<String, LoadState>,
}

impl SpriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(sprite, loaded)` pairs
    pub fn from_results<I, S>(results: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (sprite, loaded) in results {
            let sprite = sprite.into();
            if loaded {
                table.record_loaded(sprite);
            } else {
                table.record_failed(sprite);
            }
        }
        table
    }

    pub fn record_loaded(&mut self, sprite: impl Into<String>) {
        self.entries.insert(sprite.into(), LoadState::Loaded);
    }

    pub fn record_failed(&mut self, sprite: impl Into<String>) {
        let sprite = sprite.into();
        log::warn!("Sprite {} failed to load, using placeholder", sprite);
        self.entries.insert(sprite, LoadState::Failed);
    }

    pub fn is_loaded(&self, sprite: &str) -> bool {
        self.entries.get(sprite) == Some(&LoadState::Loaded)
    }

    /// Sprites that failed or were never reported
    pub fn missing<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .map(String::as_str)
            .filter(|s| !self.is_loaded(s))
            .collect()
    }

    pub fn resolve<'a>(&self, sprite: &'a str) -> SpriteSlot<'a> {
        if self.is_loaded(sprite) {
            SpriteSlot::Image(sprite)
        } else {
            SpriteSlot::Placeholder {
                color: SpriteRole::for_sprite(sprite).placeholder_color(),
            }
        }
    }
}

/// Hero, castle and every catalog sprite, deduplicated
pub fn required_sprites(config: &GameConfig) -> Vec<String> {
    let mut sprites = vec![HERO_SPRITE.to_string(), CASTLE_SPRITE.to_string()];
    for enemy in config.catalog.values() {
        if !sprites.contains(&enemy.sprite) {
            sprites.push(enemy.sprite.clone());
        }
    }
    sprites
}
