//! Line clearer - runs once per lock and folds cleared rows into the counters

use crate::board::Board;
use crate::scoring::{Progress, ScoringPolicy};

/// Result of clearing rows after a lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub level_before: u32,
    pub level_after: u32,
}

impl ClearOutcome {
    pub fn level_changed(&self) -> bool {
        self.level_before != self.level_after
    }
}

/// Clear full rows and update `progress`.
///
/// Points use the level in effect when the piece locked; the level is
/// recomputed from the new line total afterwards.
pub fn resolve_lock(
    board: &mut Board,
    progress: &mut Progress,
    policy: &ScoringPolicy,
) -> ClearOutcome {
    let level_before = progress.level;
    let lines_cleared = board.clear_full_rows() as u32;

    let mut score_delta = 0;
    if lines_cleared > 0 {
        score_delta = policy.line_score(lines_cleared, level_before);
        progress.lines += lines_cleared;
        progress.score = progress.score.saturating_add(score_delta);
        progress.level = policy.level_for(progress.lines);
    }

    ClearOutcome {
        lines_cleared,
        score_delta,
        level_before,
        level_after: progress.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringRule;
    use crate::types::{ColorId, BOARD_WIDTH};

    fn fill_rows(board: &mut Board, rows: std::ops::Range<i8>) {
        for y in rows {
            for x in 0..BOARD_WIDTH as i8 {
                board.fill(x, y, ColorId::Green);
            }
        }
    }

    #[test]
    fn test_no_clear_leaves_progress() {
        let mut board = Board::new();
        board.fill(0, 19, ColorId::Red);
        let mut progress = Progress::default();

        let policy = ScoringPolicy::new(ScoringRule::LevelMultiplier, true);
        let outcome = resolve_lock(&mut board, &mut progress, &policy);
        assert_eq!(outcome.lines_cleared, 0);
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.level_changed());
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn test_clear_scores_with_level_before_update() {
        let mut board = Board::new();
        fill_rows(&mut board, 18..20);
        let mut progress = Progress {
            score: 50,
            level: 1,
            lines: 9,
        };

        let policy = ScoringPolicy::new(ScoringRule::LevelMultiplier, true);
        let outcome = resolve_lock(&mut board, &mut progress, &policy);
        assert_eq!(outcome.lines_cleared, 2);
        assert_eq!(outcome.score_delta, 200);
        assert_eq!(outcome.level_before, 1);
        assert_eq!(outcome.level_after, 2);
        assert_eq!(progress.score, 250);
        assert_eq!(progress.lines, 11);
    }

    #[test]
    fn test_classic_rule() {
        let mut board = Board::new();
        fill_rows(&mut board, 16..20);
        let mut progress = Progress {
            score: 0,
            level: 3,
            lines: 20,
        };

        let policy = ScoringPolicy::new(ScoringRule::Classic, false);
        let outcome = resolve_lock(&mut board, &mut progress, &policy);
        assert_eq!(outcome.score_delta, 1200);
        assert_eq!(progress.level, 3);
        assert_eq!(progress.lines, 24);
    }
}
