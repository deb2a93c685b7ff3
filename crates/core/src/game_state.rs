//! Game session - the single owner of board, pieces, counters and timer
//!
//! Every command and every tick runs to completion against `&mut self`, so a
//! tick and a command can never interleave. Commands are total: anything not
//! valid in the current state is ignored and reported as `false`.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::catalog::PieceCatalog;
use crate::config::EngineConfig;
use crate::controller;
use crate::line_clear::resolve_lock;
use crate::pieces::Piece;
use crate::rng::{RandomSource, SimpleRng};
use crate::scheduler::GameLoopScheduler;
use crate::scoring::{calculate_drop_score, Progress, ScoringPolicy};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Command, SessionState, BASE_DROP_MS, SPAWN_X, SPAWN_Y};

/// What happened when the active piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// Level after the clear
    pub level: u32,
    /// The drop interval changed. The scheduler restarts on every level
    /// change, this flag only reports a different interval.
    pub speed_changed: bool,
    /// The replacement piece could not spawn
    pub game_over: bool,
}

#[derive(Debug)]
pub struct GameSession {
    config: EngineConfig,
    policy: ScoringPolicy,
    catalog: PieceCatalog,
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    progress: Progress,
    drop_speed_ms: u32,
    state: SessionState,
    scheduler: GameLoopScheduler,
    /// Restart counter
    episode: u32,
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Default rules, deterministic pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_config(EngineConfig::default(), seed)
    }

    pub fn with_config(config: EngineConfig, seed: u32) -> Self {
        Self::with_source(config, Box::new(SimpleRng::new(seed)))
    }

    /// Session drawing pieces from an arbitrary source.
    ///
    /// The session starts `Running` with active and next pieces spawned and
    /// the scheduler started at the initial speed.
    pub fn with_source(config: EngineConfig, source: Box<dyn RandomSource>) -> Self {
        let mut session = Self {
            config,
            policy: config.policy(),
            catalog: PieceCatalog::new(source),
            board: Board::new(),
            active: None,
            next: None,
            progress: Progress::default(),
            drop_speed_ms: BASE_DROP_MS,
            state: SessionState::Running,
            scheduler: GameLoopScheduler::new(),
            episode: 0,
            last_event: None,
        };
        session.begin();
        session
    }

    /// Initial spawn sequence plus scheduler start
    fn begin(&mut self) {
        self.spawn_piece();
        if self.state != SessionState::GameOver {
            self.scheduler.start(self.drop_speed_ms);
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn drop_speed_ms(&self) -> u32 {
        self.drop_speed_ms
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn scheduler(&self) -> &GameLoopScheduler {
        &self.scheduler
    }

    /// Anchor y where the active piece would land. None once the game is
    /// over, since the blocked spawn already overlaps the board.
    pub fn ghost_y(&self) -> Option<i8> {
        if self.game_over() {
            return None;
        }
        let active = self.active?;
        Some(active.y + controller::drop_distance(&self.board, &active) as i8)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Promote next to active, draw a new next, detect a blocked spawn
    fn spawn_piece(&mut self) {
        let next = match self.next.take() {
            Some(piece) => piece,
            None => self.catalog.spawn(),
        };
        let piece = next.at(SPAWN_X, SPAWN_Y);
        self.next = Some(self.catalog.spawn());

        let blocked = controller::collides(&self.board, &piece, 0, 0);
        self.active = Some(piece);
        if blocked {
            self.state = SessionState::GameOver;
            self.scheduler.stop();
        }
    }

    /// Feed elapsed time to the scheduler and run every tick that falls due.
    ///
    /// Ticks are handled one at a time, so a speed change or a game over
    /// caused by one tick applies before the next is considered. Returns the
    /// number of ticks delivered. The last lock event stays available through
    /// [`take_last_event`](Self::take_last_event).
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut last = None;
        let ticks = self.advance_with(elapsed_ms, |event| last = Some(event));
        if last.is_some() {
            self.last_event = last;
        }
        ticks
    }

    /// Like [`advance`](Self::advance), handing every lock event to `on_lock`
    /// in order instead of keeping only the last one. An unread event from an
    /// earlier command is left in place and not reported.
    pub fn advance_with(&mut self, elapsed_ms: u32, mut on_lock: impl FnMut(LockEvent)) -> u32 {
        let unread = self.last_event.take();
        let mut remaining = elapsed_ms;
        let mut ticks = 0;
        while let Some(used) = self.scheduler.poll(remaining) {
            remaining -= used;
            ticks += 1;
            self.tick();
            if let Some(event) = self.last_event.take() {
                on_lock(event);
            }
        }
        self.last_event = unread;
        ticks
    }

    /// Scheduler tick: automatic descent unless paused or over
    pub fn tick(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.step_down();
        true
    }

    /// Move the active piece down one row, or lock it when blocked.
    /// Returns true if the piece moved.
    fn step_down(&mut self) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        if controller::try_move(&self.board, &mut active, 0, 1) {
            self.active = Some(active);
            return true;
        }
        self.lock_piece();
        false
    }

    /// Commit the active piece, clear rows, rescore and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        // Cells above the visible board are dropped.
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.board.fill(x, y, piece.color);
            }
        }

        let outcome = resolve_lock(&mut self.board, &mut self.progress, &self.policy);

        // A level change recomputes the speed and restarts the timer, even
        // when the interval comes out the same.
        let mut speed_changed = false;
        if outcome.level_changed() {
            let speed = self.policy.drop_speed_ms(self.progress.level);
            speed_changed = speed != self.drop_speed_ms;
            self.drop_speed_ms = speed;
            self.scheduler.reschedule(speed);
        }

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared: outcome.lines_cleared,
            score_delta: outcome.score_delta,
            level: outcome.level_after,
            speed_changed,
            game_over: self.game_over(),
        });
    }

    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        let moved = controller::try_move(&self.board, &mut active, dx, dy);
        self.active = Some(active);
        moved
    }

    fn rotate(&mut self) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        let rotated = controller::rotate(&self.board, &mut active);
        self.active = Some(active);
        rotated
    }

    /// Drop to the floor and award +1 per row. The piece locks on the next
    /// descent step, not here.
    fn hard_drop(&mut self) -> u32 {
        let Some(mut active) = self.active else {
            return 0;
        };
        let rows = controller::hard_drop(&self.board, &mut active);
        self.active = Some(active);
        self.progress.score = self
            .progress
            .score
            .saturating_add(calculate_drop_score(rows));
        rows
    }

    /// Full reset: board, counters, pieces and timer. The piece source keeps
    /// its stream, so a restarted seeded session deals a new sequence.
    pub fn restart(&mut self) {
        self.scheduler.stop();
        self.board.clear();
        self.progress = Progress::default();
        self.drop_speed_ms = BASE_DROP_MS;
        self.active = None;
        self.next = None;
        self.state = SessionState::Running;
        self.last_event = None;
        self.episode = self.episode.wrapping_add(1);
        self.begin();
    }

    /// Apply a command. Returns whether it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::PauseToggle => match self.state {
                SessionState::Running => {
                    self.state = SessionState::Paused;
                    true
                }
                SessionState::Paused => {
                    self.state = SessionState::Running;
                    true
                }
                SessionState::GameOver => false,
            },
            Command::Restart => {
                self.restart();
                true
            }
            _ if self.state != SessionState::Running => false,
            Command::MoveLeft => self.shift(-1, 0),
            Command::MoveRight => self.shift(1, 0),
            Command::SoftDrop => {
                self.step_down();
                true
            }
            Command::Rotate => self.config.rotation && self.rotate(),
            Command::HardDrop => self.config.hard_drop && self.hard_drop() > 0,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.map(PieceSnapshot::from);
        out.state = self.state;
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.drop_speed_ms = self.drop_speed_ms;
        out.episode = self.episode;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
