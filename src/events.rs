//! Events derived from consecutive snapshots
//!
//! Log lines and high-score saves are driven by what changed between two snapshots; the
//! engine itself never calls out to either.

use crate::game::{GameData, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PieceLocked,
    LinesCleared(u32),
    LevelUp(u32),
    GameOver { score: u64, high_score: u64 },
}

/// Everything observable that happened going from `prev` to `next`
pub fn diff(prev: &GameData, next: &GameData) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match (prev.phase, next.phase) {
        (Phase::Menu | Phase::GameOver, Phase::Playing) => {
            events.push(GameEvent::Started);
            return events;
        }
        (Phase::Playing, Phase::Paused) => events.push(GameEvent::Paused),
        (Phase::Paused, Phase::Playing) => events.push(GameEvent::Resumed),
        _ => {}
    }

    // a lock that clears every row it touched can leave the board unchanged
    let locked = prev.board != next.board || next.lines_cleared_total > prev.lines_cleared_total;
    if prev.phase == Phase::Playing && next.phase != Phase::Paused && locked {
        events.push(GameEvent::PieceLocked);
    }

    if next.lines_cleared_total > prev.lines_cleared_total {
        events.push(GameEvent::LinesCleared(
            next.lines_cleared_total - prev.lines_cleared_total,
        ));
    }

    if next.level > prev.level {
        events.push(GameEvent::LevelUp(next.level));
    }

    if next.phase == Phase::GameOver && prev.phase != Phase::GameOver {
        events.push(GameEvent::GameOver {
            score: next.score,
            high_score: next.high_score,
        });
    }

    events
}
