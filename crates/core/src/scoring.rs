//! Scoring module - line clear points, level progression and drop speed
//!
//! Two rule sets exist:
//! - `LevelMultiplier` (default): `lines * 100 * level`, speed follows level
//! - `Classic`: fixed 40/100/300/1200 table, no level multiplier

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_DROP_MS, CLASSIC_LINE_SCORES, DROP_INTERVAL_MIN_MS, DROP_STEP_MS,
    HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_CLEAR_BASE,
};

/// Line clear scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringRule {
    #[default]
    LevelMultiplier,
    Classic,
}

impl ScoringRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "level" | "levelmultiplier" => Some(ScoringRule::LevelMultiplier),
            "classic" | "table" => Some(ScoringRule::Classic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRule::LevelMultiplier => "level",
            ScoringRule::Classic => "classic",
        }
    }
}

/// Session counters touched by scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}

/// Level for a cumulative line count (1-based)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Drop interval for a level: 1000ms at level 1, 100ms faster per level, 100ms floor
pub fn drop_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    BASE_DROP_MS
        .saturating_sub(steps.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Points for clearing `lines` rows at `level`
pub fn calculate_line_score(rule: ScoringRule, lines: u32, level: u32) -> u32 {
    match rule {
        ScoringRule::LevelMultiplier => lines
            .saturating_mul(LINE_CLEAR_BASE)
            .saturating_mul(level),
        ScoringRule::Classic => {
            let idx = (lines as usize).min(CLASSIC_LINE_SCORES.len() - 1);
            CLASSIC_LINE_SCORES[idx]
        }
    }
}

/// Hard drop bonus: +1 per row traveled
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Scoring and speed configuration of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoringPolicy {
    pub rule: ScoringRule,
    /// When false the drop speed stays at [`BASE_DROP_MS`]
    pub speed_progression: bool,
}

impl ScoringPolicy {
    pub fn new(rule: ScoringRule, speed_progression: bool) -> Self {
        Self {
            rule,
            speed_progression,
        }
    }

    pub fn line_score(&self, lines: u32, level: u32) -> u32 {
        calculate_line_score(self.rule, lines, level)
    }

    pub fn level_for(&self, total_lines: u32) -> u32 {
        calculate_level(total_lines)
    }

    pub fn drop_speed_ms(&self, level: u32) -> u32 {
        if self.speed_progression {
            drop_interval_ms(level)
        } else {
            BASE_DROP_MS
        }
    }
}
