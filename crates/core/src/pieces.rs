//! Pieces module - shape matrices, the seven canonical templates and piece instances
//!
//! A template is read-only process-wide data. A [`Piece`] carries its own copy
//! of the shape matrix, so rotating a piece never touches the template.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{ColorId, PieceKind, SPAWN_X, SPAWN_Y};

/// Largest bounding box side a shape may have
pub const MAX_SHAPE_DIM: usize = 4;

/// Upper bound on filled cells in one shape
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Offsets `(dx, dy)` of the filled cells of a shape, relative to its anchor
pub type CellOffsets = ArrayVec<(i8, i8), MAX_SHAPE_CELLS>;

/// Boolean shape matrix (rows x cols), stored inline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl ShapeMatrix {
    /// Build a matrix from 0/1 rows.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than [`MAX_SHAPE_DIM`] on a side.
    pub const fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0, "shape matrix must not be empty");
        assert!(
            R <= MAX_SHAPE_DIM && C <= MAX_SHAPE_DIM,
            "shape matrix exceeds the maximum dimension"
        );

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                bits[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether cell (r, c) is set; false outside the matrix
    pub fn get(&self, r: usize, c: usize) -> bool {
        r < self.rows() && c < self.cols() && self.bits[r][c]
    }

    /// Offsets of every set cell, row by row
    pub fn cells(&self) -> CellOffsets {
        let mut out = CellOffsets::new();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if self.bits[r][c] {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// 90 degree clockwise rotation: an R x C matrix becomes C x R with
    /// `rotated[c][R - 1 - r] = original[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows();
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..rows {
            for c in 0..self.cols() {
                bits[c][rows - 1 - r] = self.bits[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

impl From<ShapeMatrix> for Vec<Vec<bool>> {
    fn from(shape: ShapeMatrix) -> Self {
        (0..shape.rows())
            .map(|r| shape.bits[r][..shape.cols()].to_vec())
            .collect()
    }
}

impl TryFrom<Vec<Vec<bool>>> for ShapeMatrix {
    type Error = String;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err("shape matrix must not be empty".to_string());
        }
        if rows.len() > MAX_SHAPE_DIM || cols > MAX_SHAPE_DIM {
            return Err(format!(
                "shape matrix {}x{} exceeds {}x{}",
                rows.len(),
                cols,
                MAX_SHAPE_DIM,
                MAX_SHAPE_DIM
            ));
        }
        if rows.iter().any(|row| row.len() != cols) {
            return Err("shape matrix rows must have equal length".to_string());
        }

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            bits[r][..cols].copy_from_slice(row);
        }
        Ok(Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        })
    }
}

/// Immutable shape + color definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: ColorId,
}

/// The seven canonical templates, in [`PieceKind::ALL`] order
pub static TEMPLATES: [PieceTemplate; 7] = [
    PieceTemplate {
        kind: PieceKind::I,
        shape: ShapeMatrix::from_rows([[1, 1, 1, 1]]),
        color: ColorId::Cyan,
    },
    PieceTemplate {
        kind: PieceKind::O,
        shape: ShapeMatrix::from_rows([[1, 1], [1, 1]]),
        color: ColorId::Yellow,
    },
    PieceTemplate {
        kind: PieceKind::T,
        shape: ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]),
        color: ColorId::Magenta,
    },
    PieceTemplate {
        kind: PieceKind::S,
        shape: ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
        color: ColorId::Green,
    },
    PieceTemplate {
        kind: PieceKind::Z,
        shape: ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
        color: ColorId::Red,
    },
    PieceTemplate {
        kind: PieceKind::J,
        shape: ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1]]),
        color: ColorId::Blue,
    },
    PieceTemplate {
        kind: PieceKind::L,
        shape: ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1]]),
        color: ColorId::Orange,
    },
];

/// Template for a piece kind
pub fn template(kind: PieceKind) -> &'static PieceTemplate {
    match kind {
        PieceKind::I => &TEMPLATES[0],
        PieceKind::O => &TEMPLATES[1],
        PieceKind::T => &TEMPLATES[2],
        PieceKind::S => &TEMPLATES[3],
        PieceKind::Z => &TEMPLATES[4],
        PieceKind::J => &TEMPLATES[5],
        PieceKind::L => &TEMPLATES[6],
    }
}

/// A piece instance: its own shape copy, color and anchor.
///
/// The anchor is the board coordinate of the shape's top-left corner; `y`
/// may be negative while the piece is above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: ColorId,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Instantiate a template at the spawn anchor
    pub fn from_template(template: &PieceTemplate) -> Self {
        Self {
            kind: template.kind,
            shape: template.shape,
            color: template.color,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn new(kind: PieceKind) -> Self {
        Self::from_template(template(kind))
    }

    /// Move the anchor to (x, y)
    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    /// Replace the shape, keeping kind, color and anchor
    pub fn with_shape(self, shape: ShapeMatrix) -> Self {
        Self { shape, ..self }
    }

    /// Absolute board coordinates of every filled cell.
    ///
    /// Coordinates saturate at the `i8` limits; a saturated cell is off the
    /// board either way.
    pub fn cells(&self) -> CellOffsets {
        self.shape
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
            .collect()
    }
}
