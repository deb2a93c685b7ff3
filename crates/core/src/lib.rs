//! Core game logic - pure, deterministic and testable
//!
//! This crate contains the rules and the session state machine of the
//! falling-block engine. It has no dependencies on rendering, input, timing
//! sources or I/O:
//!
//! - **Deterministic**: the same seed and the same command/time stream give
//!   the same game
//! - **Total**: every command is accepted in every state; invalid ones are
//!   ignored
//! - **Zero-allocation hot paths**: shapes and boards live inline
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, fill/query and full-row compaction
//! - [`pieces`]: shape matrices, the seven templates and piece instances
//! - [`rng`]: injectable randomness sources
//! - [`catalog`]: uniform piece selection
//! - [`controller`]: collision, movement, rotation and hard drop
//! - [`line_clear`]: per-lock row clearing and counter updates
//! - [`scoring`]: score table, level and drop speed
//! - [`scheduler`]: the single periodic descent timer
//! - [`config`]: rule toggles
//! - [`game_state`]: the session state machine
//! - [`snapshot`]: read-only observable state
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::Command;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//! assert!(game.score() > 0); // hard drop awards a point per row
//!
//! // One second of game time: one automatic descent step at level 1.
//! assert_eq!(game.advance(1000), 1);
//! ```
//!
//! # Timing
//!
//! The session owns its scheduler; hosts feed elapsed milliseconds into
//! [`GameSession::advance`](game_state::GameSession::advance). The
//! descent interval is 1000ms at level 1, 100ms shorter per level, with a
//! 100ms floor.

pub mod board;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::PieceCatalog;
pub use config::EngineConfig;
pub use game_state::{GameSession, LockEvent};
pub use pieces::{template, Piece, PieceTemplate, ShapeMatrix, TEMPLATES};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scheduler::GameLoopScheduler;
pub use scoring::{
    calculate_level, calculate_line_score, drop_interval_ms, Progress, ScoringPolicy, ScoringRule,
};
pub use snapshot::{GameSnapshot, PieceSnapshot};
