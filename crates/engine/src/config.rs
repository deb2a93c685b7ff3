//! Host configuration

use std::env;

/// Settings for the session host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Seed for the piece generator. `None` picks one at start.
    pub seed: Option<u32>,
    /// Append the JSONL event log here when set.
    pub log_path: Option<String>,
    /// Capacity of the inbound command channel.
    pub max_pending_commands: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            max_pending_commands: 64,
        }
    }
}

impl HostConfig {
    /// Read `BLOCKFALL_SEED`, `BLOCKFALL_LOG_PATH` and `BLOCKFALL_MAX_PENDING`.
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let max_pending_commands = lookup("BLOCKFALL_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            seed,
            log_path,
            max_pending_commands,
        }
    }

    /// The configured seed, or a fresh random one.
    ///
    /// Sessions always run on a seeded generator so the event log can
    /// reproduce them.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}
