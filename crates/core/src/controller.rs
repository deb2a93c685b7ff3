//! Active piece controller - collision, translation, rotation and hard drop
//!
//! Every operation reads the board and never writes it. The board is open
//! above the top edge: cells with negative y never collide.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `piece` shifted by (dx, dy) would overlap a wall, the floor or a
/// filled cell
pub fn collides(board: &Board, piece: &Piece, dx: i8, dy: i8) -> bool {
    // Sums are taken in i16: anchor + shape offset + shift can leave i8.
    let ox = i16::from(piece.x) + i16::from(dx);
    let oy = i16::from(piece.y) + i16::from(dy);
    piece.shape.cells().iter().any(|&(cx, cy)| {
        let x = ox + i16::from(cx);
        let y = oy + i16::from(cy);
        if x < 0 || x >= i16::from(BOARD_WIDTH) || y >= i16::from(BOARD_HEIGHT) {
            return true;
        }
        // In range here, so both fit in i8.
        y >= 0 && board.is_occupied(x as i8, y as i8)
    })
}

/// Shift the piece by (dx, dy) if that does not collide.
///
/// A shift whose anchor would not fit in `i8` is refused as well.
pub fn try_move(board: &Board, piece: &mut Piece, dx: i8, dy: i8) -> bool {
    let (Some(x), Some(y)) = (piece.x.checked_add(dx), piece.y.checked_add(dy)) else {
        return false;
    };
    if collides(board, piece, dx, dy) {
        return false;
    }
    piece.x = x;
    piece.y = y;
    true
}

/// Rotate the piece 90 degrees clockwise in place.
///
/// No kicks: if the rotated shape collides at the current anchor the
/// original shape is kept and `false` is returned.
pub fn rotate(board: &Board, piece: &mut Piece) -> bool {
    let original = piece.shape;
    piece.shape = original.rotated_cw();
    if collides(board, piece, 0, 0) {
        piece.shape = original;
        return false;
    }
    true
}

/// Rows the piece can still fall before it is blocked
pub fn drop_distance(board: &Board, piece: &Piece) -> u32 {
    let mut probe = *piece;
    let mut rows = 0;
    while try_move(board, &mut probe, 0, 1) {
        rows += 1;
    }
    rows
}

/// Move the piece down until blocked; returns the rows traveled
pub fn hard_drop(board: &Board, piece: &mut Piece) -> u32 {
    let mut rows = 0;
    while try_move(board, piece, 0, 1) {
        rows += 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::ShapeMatrix;
    use crate::types::{ColorId, PieceKind};

    #[test]
    fn test_no_collision_on_empty_board() {
        let board = Board::new();
        let piece = Piece::new(PieceKind::T);
        assert!(!collides(&board, &piece, 0, 0));
        assert!(!collides(&board, &piece, 0, 1));
    }

    #[test]
    fn test_walls_and_floor_collide() {
        let board = Board::new();
        let piece = Piece::new(PieceKind::O).at(0, 18);

        assert!(collides(&board, &piece, -1, 0));
        assert!(collides(&board, &piece, 0, 1));
        assert!(!collides(&board, &piece, 1, 0));

        let right = Piece::new(PieceKind::O).at(8, 0);
        assert!(collides(&board, &right, 1, 0));
    }

    #[test]
    fn test_above_top_is_open() {
        let board = Board::new();
        let piece = Piece::new(PieceKind::I).at(3, -5);
        assert!(!collides(&board, &piece, 0, 0));
        assert!(!collides(&board, &piece, 0, -10));
    }

    #[test]
    fn test_filled_cell_collides() {
        let mut board = Board::new();
        board.fill(5, 2, ColorId::Red);
        let piece = Piece::new(PieceKind::O); // cells (4..=5, 0..=1)

        assert!(!collides(&board, &piece, 0, 0));
        assert!(collides(&board, &piece, 0, 1));
        assert!(!collides(&board, &piece, -1, 1));
    }

    #[test]
    fn test_negative_cells_ignore_board_content() {
        let mut board = Board::new();
        board.fill(4, 0, ColorId::Red);
        // Column piece reaching from y=-3 to y=0
        let piece = Piece::new(PieceKind::I)
            .at(4, -4)
            .with_shape(ShapeMatrix::from_rows([[1], [1], [1], [1]]));
        assert!(!collides(&board, &piece, 0, 0));
        assert!(collides(&board, &piece, 0, 1));
    }

    #[test]
    fn test_try_move_leaves_piece_on_failure() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::O).at(0, 0);
        assert!(!try_move(&board, &mut piece, -1, 0));
        assert_eq!((piece.x, piece.y), (0, 0));
        assert!(try_move(&board, &mut piece, 1, 1));
        assert_eq!((piece.x, piece.y), (1, 1));
    }

    #[test]
    fn test_rotate_reverts_when_blocked() {
        let board = Board::new();
        // Horizontal I on the floor: the vertical form would poke through it.
        let mut piece = Piece::new(PieceKind::I).at(3, 19);
        let before = piece.shape;
        assert!(!rotate(&board, &mut piece));
        assert_eq!(piece.shape, before);
    }

    #[test]
    fn test_rotate_against_right_wall_reverts() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::I).at(0, 5);
        assert!(rotate(&board, &mut piece)); // now 4x1 at x=0
        piece.x = 9;
        let vertical = piece.shape;
        // Rotating back to horizontal would need x 9..=12
        assert!(!rotate(&board, &mut piece));
        assert_eq!(piece.shape, vertical);
    }

    #[test]
    fn test_four_rotations_restore_piece() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind).at(3, 5);
            let original = piece.shape;
            for _ in 0..4 {
                assert!(rotate(&board, &mut piece), "{:?}", kind);
            }
            assert_eq!(piece.shape, original);
            assert_eq!((piece.x, piece.y), (3, 5));
        }
    }

    #[test]
    fn test_hard_drop_counts_rows() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::O);
        assert_eq!(drop_distance(&board, &piece), 18);
        assert_eq!(hard_drop(&board, &mut piece), 18);
        assert_eq!(piece.y, 18);
        assert_eq!(hard_drop(&board, &mut piece), 0);
    }

    #[test]
    fn test_hard_drop_stops_on_stack() {
        let mut board = Board::new();
        board.fill(4, 10, ColorId::Blue);
        let mut piece = Piece::new(PieceKind::O);
        assert_eq!(hard_drop(&board, &mut piece), 8);
        assert_eq!(piece.y, 8);
    }
}
