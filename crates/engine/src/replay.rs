//! Deterministic replay of an event log
//!
//! A session is a pure function of its seed, config and the ordered
//! advance/command stream, so feeding the logged stream into a fresh session
//! must reproduce every logged lock. A mismatch means the log and the engine
//! disagree and replay stops with an error.
//!
//! Logs are opened in append mode, so one file may hold several sessions.
//! Each `start` record begins a new run; the report describes the last one.

use std::collections::VecDeque;
use std::path::Path;

use anyhow::{bail, ensure, Context};

use blockfall_core::{EngineConfig, GameSession, GameSnapshot, LockEvent};

use crate::log::LogRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub seed: u32,
    pub config: EngineConfig,
    pub snapshot: GameSnapshot,
    /// Number of `start` records seen
    pub sessions: usize,
    pub commands: usize,
    pub ticks: u32,
    pub locks: usize,
}

struct Run {
    seed: u32,
    config: EngineConfig,
    session: GameSession,
    pending: VecDeque<LockEvent>,
    commands: usize,
    ticks: u32,
    locks: usize,
}

impl Run {
    fn new(seed: u32, config: EngineConfig) -> Self {
        Self {
            seed,
            config,
            session: GameSession::with_config(config, seed),
            pending: VecDeque::new(),
            commands: 0,
            ticks: 0,
            locks: 0,
        }
    }

    fn finish(&self) -> anyhow::Result<()> {
        ensure!(
            self.pending.is_empty(),
            "session seed={}: {} replayed lock(s) missing from the log",
            self.seed,
            self.pending.len()
        );
        Ok(())
    }
}

fn current(run: &mut Option<Run>, line_no: usize) -> anyhow::Result<&mut Run> {
    run.as_mut()
        .with_context(|| format!("line {}: record before any start record", line_no))
}

pub fn replay_str(text: &str) -> anyhow::Result<ReplayReport> {
    let mut run: Option<Run> = None;
    let mut sessions = 0;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let rec = LogRecord::from_line(line)
            .with_context(|| format!("line {}: invalid record", line_no))?;

        match rec {
            LogRecord::Start { seed, config } => {
                if let Some(prev) = &run {
                    prev.finish()?;
                }
                run = Some(Run::new(seed, config));
                sessions += 1;
            }
            LogRecord::Advance { ms } => {
                let run = current(&mut run, line_no)?;
                let pending = &mut run.pending;
                run.ticks += run.session.advance_with(ms, |event| pending.push_back(event));
            }
            LogRecord::Command { command } => {
                let run = current(&mut run, line_no)?;
                run.commands += 1;
                run.session.apply(command);
                if let Some(event) = run.session.take_last_event() {
                    run.pending.push_back(event);
                }
            }
            LogRecord::Lock(expected) => {
                let run = current(&mut run, line_no)?;
                let actual = run.pending.pop_front().with_context(|| {
                    format!("line {}: logged lock was not reproduced", line_no)
                })?;
                ensure!(
                    actual == expected,
                    "line {}: lock diverged: logged {:?}, replayed {:?}",
                    line_no,
                    expected,
                    actual
                );
                run.locks += 1;
            }
        }
    }

    let Some(run) = run else {
        bail!("event log has no start record");
    };
    run.finish()?;

    Ok(ReplayReport {
        seed: run.seed,
        config: run.config,
        snapshot: run.session.snapshot(),
        sessions,
        commands: run.commands,
        ticks: run.ticks,
        locks: run.locks,
    })
}

pub fn replay_file(path: impl AsRef<Path>) -> anyhow::Result<ReplayReport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading event log {}", path.display()))?;
    replay_str(&text)
}
