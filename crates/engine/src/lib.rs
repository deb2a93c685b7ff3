//! Session host - drives a `GameSession` from real time and a command stream
//!
//! The core crate is clock-free: it only knows "this many milliseconds
//! passed". This crate supplies that time from tokio, serializes command
//! delivery with scheduler wake-ups, publishes snapshots, and records a JSONL
//! event log that [`replay`] can play back deterministically.
//!
//! # Log records
//!
//! One JSON object per line, discriminated by `type`:
//!
//! - `start`: seed and engine config, always first
//! - `advance`: milliseconds fed to the session
//! - `command`: one command, in delivery order
//! - `lock`: outcome of a piece lock, checked during replay

pub mod config;
pub mod log;
pub mod replay;
pub mod runtime;

pub use config::HostConfig;
pub use log::{EventLog, LogRecord};
pub use replay::{replay_file, replay_str, ReplayReport};
pub use runtime::{run_session, SessionHost};
