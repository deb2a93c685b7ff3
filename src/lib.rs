//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,engine,types}` so
//! tests, benches and the binary share one import path.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
