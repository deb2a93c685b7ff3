use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, ShapeMatrix};
use crate::types::{
    ColorId, PieceKind, SessionState, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: ColorId,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of everything a front end renders.
/// Board cells are color codes, 0 = empty (see `ColorId::code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PieceSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceSnapshot>,
    pub state: SessionState,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_speed_ms: u32,
    pub episode: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            state: SessionState::Running,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            drop_speed_ms: BASE_DROP_MS,
            episode: 0,
        }
    }
}
