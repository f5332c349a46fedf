//! Game configuration
//!
//! Read from environment variables:
//!
//! - `TETRIS_SEED`: RNG seed (u32)
//! - `TETRIS_RANDOMIZER`: `bag` (default) or `uniform`
//! - `TETRIS_LINES_PER_LEVEL`: lines needed per level (default 10, minimum 1)
//! - `TETRIS_START_LEVEL`: first level (default 1, minimum 1)
//!
//! Unparseable values fall back to the default and log a warning.

use std::str::FromStr;

use tracing::warn;

use crate::rng::Randomizer;
use crate::types::{LINES_PER_LEVEL, LINE_SCORES, START_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub randomizer: Randomizer,
    pub lines_per_level: u32,
    pub start_level: u32,
    /// Points per lock indexed by rows cleared (before the level multiplier)
    pub line_scores: [u32; 5],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::Bag,
            lines_per_level: LINES_PER_LEVEL,
            start_level: START_LEVEL,
            line_scores: LINE_SCORES,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = parse_or(&lookup, "TETRIS_SEED", defaults.seed);

        let randomizer = match lookup("TETRIS_RANDOMIZER") {
            Some(raw) if !raw.trim().is_empty() => Randomizer::from_str(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown TETRIS_RANDOMIZER, using bag");
                defaults.randomizer
            }),
            _ => defaults.randomizer,
        };

        let lines_per_level =
            parse_or(&lookup, "TETRIS_LINES_PER_LEVEL", defaults.lines_per_level).max(1);
        let start_level = parse_or(&lookup, "TETRIS_START_LEVEL", defaults.start_level).max(1);

        Self {
            seed,
            randomizer,
            lines_per_level,
            start_level,
            line_scores: defaults.line_scores,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparseable config value");
            default
        }),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_source_gives_defaults() {
        let cfg = GameConfig::from_lookup(|_| None);
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let cfg = GameConfig::from_lookup(lookup_from(&[
            ("TETRIS_SEED", "777"),
            ("TETRIS_RANDOMIZER", "uniform"),
            ("TETRIS_LINES_PER_LEVEL", "5"),
            ("TETRIS_START_LEVEL", "3"),
        ]));
        assert_eq!(cfg.seed, 777);
        assert_eq!(cfg.randomizer, Randomizer::Uniform);
        assert_eq!(cfg.lines_per_level, 5);
        assert_eq!(cfg.start_level, 3);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = GameConfig::from_lookup(lookup_from(&[
            ("TETRIS_SEED", "not-a-number"),
            ("TETRIS_RANDOMIZER", "weighted"),
            ("TETRIS_LINES_PER_LEVEL", "0"),
            ("TETRIS_START_LEVEL", ""),
        ]));
        assert_eq!(cfg.seed, 1);
        assert_eq!(cfg.randomizer, Randomizer::Bag);
        assert_eq!(cfg.lines_per_level, 1);
        assert_eq!(cfg.start_level, START_LEVEL);
    }
}
