//! Pieces tests - templates, matrix rotation and collision

use blockfall::core::controller::{collides, drop_distance, hard_drop, rotate, try_move};
use blockfall::core::{template, Board, Piece, ShapeMatrix, TEMPLATES};
use blockfall::types::{ColorId, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

// ============== Template Tests ==============

#[test]
fn test_template_table_matches_kinds() {
    assert_eq!(TEMPLATES.len(), 7);
    for (t, kind) in TEMPLATES.iter().zip(PieceKind::ALL) {
        assert_eq!(t.kind, kind);
        assert_eq!(template(kind).kind, kind);
        assert_eq!(t.shape.cells().len(), 4, "{:?} should have 4 cells", kind);
    }
}

#[test]
fn test_template_colors() {
    let expected = [
        (PieceKind::I, "#0ff"),
        (PieceKind::O, "#ff0"),
        (PieceKind::T, "#f0f"),
        (PieceKind::S, "#0f0"),
        (PieceKind::Z, "#f00"),
        (PieceKind::J, "#00f"),
        (PieceKind::L, "#fa0"),
    ];
    for (kind, hex) in expected {
        assert_eq!(template(kind).color.hex(), hex, "{:?}", kind);
    }
}

#[test]
fn test_template_shapes() {
    assert_eq!(template(PieceKind::I).shape, ShapeMatrix::from_rows([[1, 1, 1, 1]]));
    assert_eq!(template(PieceKind::O).shape, ShapeMatrix::from_rows([[1, 1], [1, 1]]));
    assert_eq!(
        template(PieceKind::T).shape,
        ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]])
    );
    assert_eq!(
        template(PieceKind::L).shape,
        ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1]])
    );
}

#[test]
fn test_spawn_anchor() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(SPAWN_X, 4);
    }
}

#[test]
fn test_instances_do_not_share_template_shape() {
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::T).at(4, 5);
    assert!(rotate(&board, &mut piece));
    assert_ne!(piece.shape, template(PieceKind::T).shape);
    assert_eq!(Piece::new(PieceKind::T).shape, template(PieceKind::T).shape);
}

// ============== Rotation Tests ==============

#[test]
fn test_four_rotations_restore_shape() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind).at(3, 8);
        let original = piece.shape;
        for _ in 0..4 {
            assert!(rotate(&board, &mut piece), "{:?} should rotate freely", kind);
        }
        assert_eq!(piece.shape, original, "{:?}", kind);
    }
}

#[test]
fn test_rotation_swaps_dimensions() {
    let shape = template(PieceKind::J).shape;
    let rotated = shape.rotated_cw();
    assert_eq!((rotated.rows(), rotated.cols()), (shape.cols(), shape.rows()));
    // J = [[1,0,0],[1,1,1]] -> [[1,1],[1,0],[1,0]]
    assert_eq!(rotated, ShapeMatrix::from_rows([[1, 1], [1, 0], [1, 0]]));
}

#[test]
fn test_blocked_rotation_reverts() {
    let board = Board::new();
    // Horizontal I at the bottom cannot stand up
    let mut piece = Piece::new(PieceKind::I).at(3, BOARD_HEIGHT as i8 - 1);
    let before = piece;
    assert!(!rotate(&board, &mut piece));
    assert_eq!(piece, before);
}

#[test]
fn test_no_wall_kick() {
    let board = Board::new();
    // Vertical I flush against the right wall: rotating back to horizontal
    // would need a kick to the left
    let vertical = template(PieceKind::I).shape.rotated_cw();
    let mut piece = Piece::new(PieceKind::I)
        .with_shape(vertical)
        .at(BOARD_WIDTH as i8 - 1, 5);
    assert!(!rotate(&board, &mut piece));
    assert_eq!(piece.x, BOARD_WIDTH as i8 - 1);
}

// ============== Collision Tests ==============

#[test]
fn test_collides_matches_bounds_and_occupancy() {
    let mut board = Board::new();
    board.fill(5, 10, ColorId::Red);

    for kind in PieceKind::ALL {
        for x in -2..BOARD_WIDTH as i8 + 2 {
            for y in -2..BOARD_HEIGHT as i8 + 2 {
                let piece = Piece::new(kind).at(x, y);
                let expected = piece.cells().iter().any(|&(cx, cy)| {
                    cx < 0
                        || cx >= BOARD_WIDTH as i8
                        || cy >= BOARD_HEIGHT as i8
                        || (cy >= 0 && board.is_occupied(cx, cy))
                });
                assert_eq!(
                    collides(&board, &piece, 0, 0),
                    expected,
                    "{:?} at ({}, {})",
                    kind,
                    x,
                    y
                );
            }
        }
    }
}

#[test]
fn test_collides_with_extreme_offsets() {
    let mut board = Board::new();
    board.fill(0, 19, ColorId::Red);
    let offsets: [i8; 7] = [i8::MIN, -127, -20, -1, 0, 1, i8::MAX];

    for kind in PieceKind::ALL {
        for (ax, ay) in [(0i8, 18i8), (4, 0), (8, -3), (-100, 100)] {
            let piece = Piece::new(kind).at(ax, ay);
            for dx in offsets {
                for dy in offsets {
                    let expected = piece.shape.cells().iter().any(|&(cx, cy)| {
                        let x = i16::from(ax) + i16::from(cx) + i16::from(dx);
                        let y = i16::from(ay) + i16::from(cy) + i16::from(dy);
                        x < 0
                            || x >= i16::from(BOARD_WIDTH)
                            || y >= i16::from(BOARD_HEIGHT)
                            || (y >= 0 && board.is_occupied(x as i8, y as i8))
                    });
                    assert_eq!(
                        collides(&board, &piece, dx, dy),
                        expected,
                        "{:?} at ({}, {}) by ({}, {})",
                        kind,
                        ax,
                        ay,
                        dx,
                        dy
                    );
                }
            }
        }
    }
}

#[test]
fn test_try_move_through_floor_is_refused() {
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::O).at(0, 18);

    assert!(collides(&board, &piece, 0, 110));
    assert!(!try_move(&board, &mut piece, 0, 110));
    assert!(!try_move(&board, &mut piece, 0, i8::MAX));
    assert_eq!((piece.x, piece.y), (0, 18));
}

#[test]
fn test_try_move_refuses_anchor_overflow() {
    let board = Board::new();
    // Far above the board: no cell collides, but the anchor would leave i8
    let mut piece = Piece::new(PieceKind::I).at(0, -100);
    assert!(!collides(&board, &piece, 0, -100));
    assert!(!try_move(&board, &mut piece, 0, -100));
    assert_eq!(piece.y, -100);

    assert!(try_move(&board, &mut piece, 0, -28));
    assert_eq!(piece.y, i8::MIN);
}

#[test]
fn test_cells_saturate_off_board() {
    let piece = Piece::new(PieceKind::I).at(126, 0);
    let xs: Vec<i8> = piece.cells().iter().map(|&(x, _)| x).collect();
    assert_eq!(xs, vec![126, 127, 127, 127]);
}

#[test]
fn test_cells_above_board_do_not_collide() {
    let board = Board::new();
    let piece = Piece::new(PieceKind::O).at(4, -2);
    assert!(!collides(&board, &piece, 0, 0));
    assert!(!collides(&board, &piece, 0, 1));
}

#[test]
fn test_try_move_never_leaves_collision() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        if x != 4 {
            board.fill(x, 15, ColorId::Blue);
        }
    }

    let moves = [(-1, 0), (1, 0), (0, 1)];
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind);
        for step in 0..200 {
            let (dx, dy) = moves[step % moves.len()];
            let before = piece;
            let moved = try_move(&board, &mut piece, dx, dy);
            assert!(!collides(&board, &piece, 0, 0));
            if !moved {
                assert_eq!(piece, before);
            }
        }
    }
}

#[test]
fn test_hard_drop_distance() {
    let mut board = Board::new();
    board.fill(4, 12, ColorId::Red);
    let mut piece = Piece::new(PieceKind::O);

    assert_eq!(drop_distance(&board, &piece), 10);
    assert_eq!(hard_drop(&board, &mut piece), 10);
    assert_eq!(piece.y, 10);
    assert!(collides(&board, &piece, 0, 1));
}
