//! Session runtime
//!
//! One task owns the `GameSession`. It waits on either the next command or
//! the scheduler's next due tick, so commands and ticks are applied strictly
//! one after another. Before anything is applied, the wall time that passed
//! since the last step is fed to the session.

use anyhow::{anyhow, Context};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use blockfall_core::{EngineConfig, GameSession, GameSnapshot};
use blockfall_types::Command;

use crate::config::HostConfig;
use crate::log::{EventLog, LogRecord};

/// Converts wall time into whole milliseconds for the session.
///
/// `last` moves forward by exactly what was handed out, so sub-millisecond
/// remainders carry into the next reading.
struct Clock {
    last: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn take_elapsed_ms(&mut self) -> u32 {
        let elapsed = Instant::now().saturating_duration_since(self.last);
        let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.last += Duration::from_millis(u64::from(ms));
        ms
    }

    fn deadline_in(&self, ms: u32) -> Instant {
        self.last + Duration::from_millis(u64::from(ms))
    }
}

fn record(log: Option<&EventLog>, rec: LogRecord) {
    if let Some(log) = log {
        log.record(rec);
    }
}

fn feed_time(session: &mut GameSession, ms: u32, log: Option<&EventLog>) {
    if ms == 0 {
        return;
    }
    record(log, LogRecord::Advance { ms });
    session.advance_with(ms, |event| {
        if event.game_over {
            eprintln!("[blockfall] game over");
        }
        record(log, LogRecord::Lock(event));
    });
}

fn publish(snapshots: &watch::Sender<GameSnapshot>, session: &GameSession, scratch: &mut GameSnapshot) {
    session.snapshot_into(scratch);
    let snap = *scratch;
    snapshots.send_if_modified(|current| {
        if *current == snap {
            false
        } else {
            *current = snap;
            true
        }
    });
}

/// Drive `session` until the command channel closes.
///
/// Every change is published on `snapshots`. Returns the final snapshot.
pub async fn run_session(
    mut session: GameSession,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<GameSnapshot>,
    log: Option<EventLog>,
) -> anyhow::Result<GameSnapshot> {
    let mut clock = Clock::new();
    let mut scratch = GameSnapshot::default();
    publish(&snapshots, &session, &mut scratch);

    loop {
        let due = session
            .scheduler()
            .time_until_next_tick()
            .map(|ms| clock.deadline_in(ms));

        tokio::select! {
            biased;

            cmd = commands.recv() => {
                feed_time(&mut session, clock.take_elapsed_ms(), log.as_ref());
                let Some(command) = cmd else {
                    break;
                };
                record(log.as_ref(), LogRecord::Command { command });
                session.apply(command);
                if let Some(event) = session.take_last_event() {
                    if event.game_over {
                        eprintln!("[blockfall] game over");
                    }
                    record(log.as_ref(), LogRecord::Lock(event));
                }
            }
            _ = sleep_until(due.unwrap_or_else(Instant::now)), if due.is_some() => {
                feed_time(&mut session, clock.take_elapsed_ms(), log.as_ref());
            }
        }

        publish(&snapshots, &session, &mut scratch);
    }

    publish(&snapshots, &session, &mut scratch);
    if let Some(log) = log {
        log.close().await?;
    }
    Ok(session.snapshot())
}

/// A running session on the current tokio runtime
#[derive(Debug)]
pub struct SessionHost {
    seed: u32,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<anyhow::Result<GameSnapshot>>,
}

impl SessionHost {
    /// Create a session and spawn its runtime task.
    ///
    /// Opens the event log first when one is configured; a log that cannot be
    /// opened is an error rather than a silently unrecorded session.
    pub async fn start(host: HostConfig, engine: EngineConfig) -> anyhow::Result<Self> {
        let seed = host.resolve_seed();
        let session = GameSession::with_config(engine, seed);

        let log = match &host.log_path {
            Some(path) => Some(EventLog::open(path).await?),
            None => None,
        };
        record(log.as_ref(), LogRecord::Start { seed, config: engine });

        eprintln!(
            "[blockfall] session started: seed={} scoring={} rotation={} hard_drop={} speed_progression={}",
            seed,
            engine.scoring.as_str(),
            engine.rotation,
            engine.hard_drop,
            engine.speed_progression
        );

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(host.max_pending_commands.max(1));
        let (snap_tx, snap_rx) = watch::channel(session.snapshot());
        let task = tokio::spawn(run_session(session, cmd_rx, snap_tx, log));

        Ok(Self {
            seed,
            commands: cmd_tx,
            snapshots: snap_rx,
            task,
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub async fn send(&self, command: Command) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("session has stopped"))
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snapshots.borrow()
    }

    /// Close the command channel and wait for the session to wind down.
    pub async fn finish(self) -> anyhow::Result<GameSnapshot> {
        let Self { commands, task, .. } = self;
        drop(commands);
        task.await.context("session task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::replay_file;
    use blockfall_types::{SessionState, SPAWN_X, SPAWN_Y};

    fn seeded(seed: u32) -> HostConfig {
        HostConfig {
            seed: Some(seed),
            ..HostConfig::default()
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("blockfall-{}-{}.jsonl", name, std::process::id()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_gravity_follows_wall_clock() {
        let host = SessionHost::start(seeded(1), EngineConfig::default())
            .await
            .unwrap();
        assert_eq!(host.snapshot().active.unwrap().y, SPAWN_Y);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let snap = host.finish().await.unwrap();
        assert_eq!(snap.active.unwrap().y, SPAWN_Y + 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_applied_in_order() {
        let host = SessionHost::start(seeded(3), EngineConfig::default())
            .await
            .unwrap();
        for _ in 0..3 {
            host.send(Command::MoveLeft).await.unwrap();
        }
        let snap = host.finish().await.unwrap();
        assert_eq!(snap.active.unwrap().x, SPAWN_X - 3);
        assert_eq!(snap.active.unwrap().y, SPAWN_Y);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_descent() {
        let host = SessionHost::start(seeded(5), EngineConfig::default())
            .await
            .unwrap();
        host.send(Command::PauseToggle).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5000)).await;

        let snap = host.snapshot();
        assert_eq!(snap.state, SessionState::Paused);
        assert_eq!(snap.active.unwrap().y, SPAWN_Y);
        host.finish().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_ticks() {
        let host = SessionHost::start(seeded(8), EngineConfig::default())
            .await
            .unwrap();
        let mut rx = host.subscribe();
        rx.borrow_and_update();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().active.unwrap().y, SPAWN_Y + 1);
        host.finish().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_logged_session_replays_to_same_snapshot() {
        let path = temp_path("runtime-replay");
        let _ = std::fs::remove_file(&path);

        let host = SessionHost::start(
            HostConfig {
                seed: Some(2024),
                log_path: Some(path.to_string_lossy().into_owned()),
                ..HostConfig::default()
            },
            EngineConfig::default(),
        )
        .await
        .unwrap();

        for command in [Command::MoveLeft, Command::Rotate, Command::HardDrop] {
            host.send(command).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(1200)).await;
        for command in [Command::MoveRight, Command::MoveRight, Command::HardDrop] {
            host.send(command).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(3300)).await;
        let live = host.finish().await.unwrap();

        let report = replay_file(&path).unwrap();
        assert_eq!(report.snapshot, live);
        assert_eq!(report.seed, 2024);
        assert_eq!(report.commands, 6);
        assert!(report.locks >= 2);
        let _ = std::fs::remove_file(&path);
    }
}
