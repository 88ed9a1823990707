//! Core game state and logic
//!
//! `Engine::transition` maps a snapshot and an action to the next snapshot. Rejected
//! actions (a blocked move, a rotate while paused, ...) hand back an unchanged copy.
//! `Game` wraps an engine around the one live snapshot and serializes actions through
//! an ordered queue.

use crate::board::Board;
use crate::collision::{drop_distance, is_valid, lock};
use crate::events::{GameEvent, diff};
use crate::kicks;
use crate::piece::Piece;
use crate::randomizer::VariantSource;
use crate::rules::{Rules, RulesError};
use crate::score::{clear_lines, hard_drop_points, line_clear_points};
use crate::tetromino::{Variant, verify_catalog};
use serde::Serialize;
use std::collections::VecDeque;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Discrete requests a driver can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    Pause,
    Resume,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    /// Gravity step, issued by the driver's timer
    Tick,
    /// End the current game and record the high score
    GameOver,
}

/// Authoritative game snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameData {
    pub board: Board,
    pub current_piece: Option<Piece>,
    pub next_variant: Variant,
    pub score: u64,
    pub level: u32,
    pub lines_cleared_total: u32,
    pub phase: Phase,
    pub high_score: u64,
}

/// The state machine: rules plus the source of upcoming variants
pub struct Engine<S = Box<dyn VariantSource>> {
    rules: Rules,
    source: S,
}

impl<S: VariantSource> Engine<S> {
    /// Validate the rules and the shape table up front; gameplay never fails afterwards
    pub fn new(rules: Rules, source: S) -> Result<Self, RulesError> {
        rules.validate()?;
        verify_catalog()?;
        Ok(Self { rules, source })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Menu snapshot with an empty board, carrying a previously saved high score
    pub fn initial(&mut self, high_score: u64) -> GameData {
        GameData {
            board: Board::new(self.rules.width, self.rules.height),
            current_piece: None,
            next_variant: self.source.next_variant(),
            score: 0,
            level: 1,
            lines_cleared_total: 0,
            phase: Phase::Menu,
            high_score,
        }
    }

    /// Apply one action to a snapshot
    pub fn transition(&mut self, state: &GameData, action: Action) -> GameData {
        match (state.phase, action) {
            (_, Action::GameOver) => game_over(state.clone()),
            (Phase::Menu | Phase::GameOver, Action::Start) => self.start(state),
            (Phase::Playing, Action::Pause) => GameData {
                phase: Phase::Paused,
                ..state.clone()
            },
            (Phase::Paused, Action::Resume) => GameData {
                phase: Phase::Playing,
                ..state.clone()
            },
            (Phase::Playing, Action::MoveLeft) => self.shift(state, -1),
            (Phase::Playing, Action::MoveRight) => self.shift(state, 1),
            (Phase::Playing, Action::Rotate) => self.rotate(state),
            (Phase::Playing, Action::SoftDrop | Action::Tick) => self.fall(state),
            (Phase::Playing, Action::HardDrop) => self.hard_drop(state),
            _ => state.clone(),
        }
    }

    fn start(&mut self, state: &GameData) -> GameData {
        let current = self.source.next_variant();
        let next = self.source.next_variant();
        tracing::info!(?current, ?next, high_score = state.high_score, "starting new game");

        GameData {
            board: Board::new(self.rules.width, self.rules.height),
            current_piece: Some(Piece::spawn(current, self.rules.width)),
            next_variant: next,
            score: 0,
            level: 1,
            lines_cleared_total: 0,
            phase: Phase::Playing,
            high_score: state.high_score,
        }
    }

    fn shift(&self, state: &GameData, dx: i32) -> GameData {
        let Some(piece) = &state.current_piece else {
            return state.clone();
        };
        let moved = piece.translated(dx, 0);
        if !is_valid(&state.board, &moved) {
            return state.clone();
        }
        GameData {
            current_piece: Some(moved),
            ..state.clone()
        }
    }

    fn rotate(&self, state: &GameData) -> GameData {
        let Some(piece) = &state.current_piece else {
            return state.clone();
        };
        match kicks::rotate(&state.board, piece) {
            Some(rotated) => GameData {
                current_piece: Some(rotated),
                ..state.clone()
            },
            None => state.clone(),
        }
    }

    /// One row of gravity; a piece that cannot fall locks instead
    fn fall(&mut self, state: &GameData) -> GameData {
        let Some(piece) = &state.current_piece else {
            return state.clone();
        };
        let moved = piece.translated(0, 1);
        if is_valid(&state.board, &moved) {
            return GameData {
                current_piece: Some(moved),
                ..state.clone()
            };
        }
        self.lock_and_advance(state, piece, 0)
    }

    fn hard_drop(&mut self, state: &GameData) -> GameData {
        let Some(piece) = &state.current_piece else {
            return state.clone();
        };
        let distance = drop_distance(&state.board, piece);
        let landed = piece.translated(0, distance as i32);
        let bonus = hard_drop_points(distance, &self.rules);
        self.lock_and_advance(state, &landed, bonus)
    }

    /// Lock `piece`, clear rows, score, then spawn the announced next variant.
    /// `bonus` is added to the score ahead of the line-clear points.
    fn lock_and_advance(&mut self, state: &GameData, piece: &Piece, bonus: u64) -> GameData {
        let locked = lock(&state.board, piece);
        let (board, cleared) = clear_lines(&locked);

        let score = state.score + bonus + line_clear_points(cleared, state.level, &self.rules);
        let lines_cleared_total = state.lines_cleared_total + cleared;
        let level = self.rules.level_for(lines_cleared_total);
        tracing::debug!(variant = ?piece.variant, x = piece.x, y = piece.y, cleared, "piece locked");

        let spawned = Piece::spawn(state.next_variant, self.rules.width);
        if !is_valid(&board, &spawned) {
            tracing::debug!(variant = ?spawned.variant, "spawn blocked");
            return game_over(GameData {
                board,
                current_piece: None,
                next_variant: state.next_variant,
                score,
                level,
                lines_cleared_total,
                phase: state.phase,
                high_score: state.high_score,
            });
        }

        GameData {
            board,
            current_piece: Some(spawned),
            next_variant: self.source.next_variant(),
            score,
            level,
            lines_cleared_total,
            phase: state.phase,
            high_score: state.high_score,
        }
    }
}

/// Enter the game-over phase, keeping the best of the current and saved scores
fn game_over(state: GameData) -> GameData {
    let high_score = state.score.max(state.high_score);
    if state.phase != Phase::GameOver {
        tracing::info!(score = state.score, high_score, "game over");
    }
    GameData {
        phase: Phase::GameOver,
        high_score,
        ..state
    }
}

/// The live game: one snapshot, one writer, one ordered action queue
pub struct Game<S = Box<dyn VariantSource>> {
    engine: Engine<S>,
    state: GameData,
    queue: VecDeque<Action>,
}

impl<S: VariantSource> Game<S> {
    /// Create a game sitting in the menu
    pub fn new(rules: Rules, source: S, high_score: u64) -> Result<Self, RulesError> {
        let mut engine = Engine::new(rules, source)?;
        let state = engine.initial(high_score);
        Ok(Self {
            engine,
            state,
            queue: VecDeque::new(),
        })
    }

    pub fn state(&self) -> &GameData {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        self.engine.rules()
    }

    /// Queue an action; nothing changes until `process`
    pub fn submit(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Apply queued actions in submission order and report what changed
    pub fn process(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(action) = self.queue.pop_front() {
            let next = self.engine.transition(&self.state, action);
            events.extend(diff(&self.state, &next));
            self.state = next;
        }
        events
    }

    /// Submit a single action and process the queue
    pub fn apply(&mut self, action: Action) -> Vec<GameEvent> {
        self.submit(action);
        self.process()
    }
}
