//! Engine configuration
//!
//! The defaults are the level-progressive rule set. [`EngineConfig::classic`]
//! is the reduced variant: fixed score table, fixed speed, no rotation and
//! no hard drop.

use serde::{Deserialize, Serialize};

use crate::scoring::{ScoringPolicy, ScoringRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringRule,
    pub rotation: bool,
    pub hard_drop: bool,
    pub speed_progression: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringRule::LevelMultiplier,
            rotation: true,
            hard_drop: true,
            speed_progression: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl EngineConfig {
    pub fn classic() -> Self {
        Self {
            scoring: ScoringRule::Classic,
            rotation: false,
            hard_drop: false,
            speed_progression: false,
        }
    }

    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::new(self.scoring, self.speed_progression)
    }

    /// Create from environment variables; missing or unparsable values keep the default
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(default)
        };

        Self {
            scoring: lookup("BLOCKFALL_SCORING")
                .as_deref()
                .and_then(ScoringRule::from_str)
                .unwrap_or(defaults.scoring),
            rotation: flag("BLOCKFALL_ROTATION", defaults.rotation),
            hard_drop: flag("BLOCKFALL_HARD_DROP", defaults.hard_drop),
            speed_progression: flag("BLOCKFALL_SPEED_PROGRESSION", defaults.speed_progression),
        }
    }
}
