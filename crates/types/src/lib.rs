//! Core types shared across the workspace
//! Pure data types: board constants, colors, cells, commands and session states.

use serde::{Deserialize, Serialize};

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor for every new piece: `floor(W/2) - 1`, top row.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;
pub const SPAWN_Y: i8 = 0;

/// Drop speed (milliseconds per automatic descent step)
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_MS: u32 = 100;
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line before the level multiplier
pub const LINE_CLEAR_BASE: u32 = 100;

/// Fixed-table scoring (no level multiplier), indexed by lines cleared
pub const CLASSIC_LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per row traveled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 1;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Color of a filled cell. One per canonical template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

impl ColorId {
    /// Display color as a CSS hex string
    pub fn hex(&self) -> &'static str {
        match self {
            ColorId::Cyan => "#0ff",
            ColorId::Yellow => "#ff0",
            ColorId::Magenta => "#f0f",
            ColorId::Green => "#0f0",
            ColorId::Red => "#f00",
            ColorId::Blue => "#00f",
            ColorId::Orange => "#fa0",
        }
    }

    /// Compact grid code (1..=7); 0 is reserved for empty cells
    pub fn code(&self) -> u8 {
        match self {
            ColorId::Cyan => 1,
            ColorId::Yellow => 2,
            ColorId::Magenta => 3,
            ColorId::Green => 4,
            ColorId::Red => 5,
            ColorId::Blue => 6,
            ColorId::Orange => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ColorId::Cyan),
            2 => Some(ColorId::Yellow),
            3 => Some(ColorId::Magenta),
            4 => Some(ColorId::Green),
            5 => Some(ColorId::Red),
            6 => Some(ColorId::Blue),
            7 => Some(ColorId::Orange),
            _ => None,
        }
    }
}

/// Cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ColorId),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<ColorId> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }

    /// Grid code: 0 for empty, [`ColorId::code`] otherwise
    pub fn code(&self) -> u8 {
        self.color().map_or(0, |c| c.code())
    }
}

/// Discrete commands accepted by a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    PauseToggle,
    Restart,
}

impl Command {
    /// Parse command from its wire name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "pausetoggle" => Some(Command::PauseToggle),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::PauseToggle => "pauseToggle",
            Command::Restart => "restart",
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Running,
    Paused,
    GameOver,
}
