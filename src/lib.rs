//! BLOCKFALL - a deterministic falling-block puzzle engine
//!
//! The engine (`game`) is a state machine over immutable snapshots: every action maps a
//! `GameData` to the next one. Randomness, timing and persistence are injected by the
//! driver, so a game can be replayed exactly from its seed and action log.

pub mod board;
pub mod collision;
pub mod events;
pub mod game;
pub mod input;
pub mod kicks;
pub mod piece;
pub mod randomizer;
pub mod rules;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod timer;
pub mod ui;

pub use board::{Board, Cell};
pub use events::GameEvent;
pub use game::{Action, Engine, Game, GameData, Phase};
pub use piece::Piece;
pub use randomizer::{ScriptedSource, UniformSource, VariantSource};
pub use rules::{Rules, RulesError};
pub use tetromino::{Rotation, Shape, Variant};
