//! Game rules: board size, scoring table and gravity timing
//!
//! Loaded from the `[rules]` table of the settings file; every field falls back to the
//! classic defaults when omitted.

use crate::tetromino::Variant;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Largest board side the engine and the terminal renderer accept
pub const MAX_BOARD_SIDE: usize = 64;

/// Rejected rules or a broken shape table. Raised once at startup, never during play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("board must be at least 4x4, got {width}x{height}")]
    BoardTooSmall { width: usize, height: usize },
    #[error("board must be at most {max}x{max}, got {width}x{height}")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("lines_per_level must be greater than zero")]
    ZeroLinesPerLevel,
    #[error("min_drop_ms must be greater than zero")]
    ZeroMinimumInterval,
    #[error("min_drop_ms ({min}) exceeds base_drop_ms ({base})")]
    MinimumAboveBase { min: u64, base: u64 },
    #[error("rotation {rotation} of {variant:?} breaks the shape table invariants")]
    MalformedShape { variant: Variant, rotation: usize },
}

/// Tunable constants of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub width: usize,
    pub height: usize,
    /// Lines needed to advance one level
    pub lines_per_level: u32,
    /// Gravity interval at level 1, in milliseconds
    pub base_drop_ms: u64,
    /// Interval reduction per level, in milliseconds
    pub drop_decay_ms: u64,
    /// Gravity never gets faster than this
    pub min_drop_ms: u64,
    /// Points per simultaneous line clear, indexed by line count
    pub line_scores: [u64; 5],
    /// Points per cell of hard drop
    pub hard_drop_points: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            lines_per_level: 10,
            base_drop_ms: 1000,
            drop_decay_ms: 80,
            min_drop_ms: 100,
            line_scores: [0, 100, 300, 600, 1000],
            hard_drop_points: 2,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.width < 4 || self.height < 4 {
            return Err(RulesError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(RulesError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.lines_per_level == 0 {
            return Err(RulesError::ZeroLinesPerLevel);
        }
        if self.min_drop_ms == 0 {
            return Err(RulesError::ZeroMinimumInterval);
        }
        if self.min_drop_ms > self.base_drop_ms {
            return Err(RulesError::MinimumAboveBase {
                min: self.min_drop_ms,
                base: self.base_drop_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval for a level: `max(min, base - (level - 1) * decay)`
    pub fn drop_interval(&self, level: u32) -> Duration {
        let decay = u64::from(level.saturating_sub(1)).saturating_mul(self.drop_decay_ms);
        let ms = self.base_drop_ms.saturating_sub(decay).max(self.min_drop_ms);
        Duration::from_millis(ms)
    }

    /// Level reached after clearing `lines` in total
    pub fn level_for(&self, lines: u32) -> u32 {
        lines / self.lines_per_level + 1
    }

    /// Points for clearing `count` rows at once, before the level multiplier
    pub fn line_score(&self, count: u32) -> u64 {
        let last = self.line_scores.len() - 1;
        self.line_scores[(count as usize).min(last)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Rules::default().validate(), Ok(()));
    }

    #[test]
    fn test_drop_interval_curve() {
        let rules = Rules::default();
        assert_eq!(rules.drop_interval(1), Duration::from_millis(1000));
        assert_eq!(rules.drop_interval(2), Duration::from_millis(920));
        assert_eq!(rules.drop_interval(12), Duration::from_millis(120));
        assert_eq!(rules.drop_interval(13), Duration::from_millis(100));
        assert_eq!(rules.drop_interval(50), Duration::from_millis(100));
    }

    #[test]
    fn test_level_for_lines() {
        let rules = Rules::default();
        assert_eq!(rules.level_for(0), 1);
        assert_eq!(rules.level_for(9), 1);
        assert_eq!(rules.level_for(10), 2);
        assert_eq!(rules.level_for(35), 4);
    }

    #[test]
    fn test_rejects_bad_rules() {
        let small = Rules {
            width: 3,
            ..Rules::default()
        };
        assert_eq!(
            small.validate(),
            Err(RulesError::BoardTooSmall { width: 3, height: 20 })
        );

        let huge = Rules {
            width: 40_000,
            height: 4,
            ..Rules::default()
        };
        assert_eq!(
            huge.validate(),
            Err(RulesError::BoardTooLarge {
                width: 40_000,
                height: 4,
                max: MAX_BOARD_SIDE
            })
        );
        let tall = Rules {
            height: MAX_BOARD_SIDE + 1,
            ..Rules::default()
        };
        assert!(matches!(tall.validate(), Err(RulesError::BoardTooLarge { .. })));
        let largest = Rules {
            width: MAX_BOARD_SIDE,
            height: MAX_BOARD_SIDE,
            ..Rules::default()
        };
        assert_eq!(largest.validate(), Ok(()));

        let no_levels = Rules {
            lines_per_level: 0,
            ..Rules::default()
        };
        assert_eq!(no_levels.validate(), Err(RulesError::ZeroLinesPerLevel));

        let inverted = Rules {
            min_drop_ms: 2000,
            ..Rules::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(RulesError::MinimumAboveBase { .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let rules: Rules = toml::from_str("width = 12\nmin_drop_ms = 50").unwrap();
        assert_eq!(rules.width, 12);
        assert_eq!(rules.height, 20);
        assert_eq!(rules.min_drop_ms, 50);
        assert_eq!(rules.line_scores, [0, 100, 300, 600, 1000]);
    }
}
