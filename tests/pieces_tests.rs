//! Pieces module tests - shape tables and rotation indices

use term_tetris::core::pieces::{cells_at, get_shape, shapes, Tetromino, SPAWN_POSITION};
use term_tetris::types::{PieceKind, RotateDirection, BOARD_WIDTH};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, 0), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(get_shape(PieceKind::I, 1), [(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_o_piece_has_single_state() {
    assert_eq!(shapes(PieceKind::O).len(), 1);
    assert_eq!(get_shape(PieceKind::O, 0), [(1, 0), (2, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(get_shape(PieceKind::T, 0), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::T, 1), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, 2), [(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, 3), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

/// Sorted cells shifted so the leftmost column is 0.
fn normalized(cells: impl IntoIterator<Item = (i8, i8)>) -> Vec<(i8, i8)> {
    let mut cells: Vec<(i8, i8)> = cells.into_iter().collect();
    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    for c in &mut cells {
        c.0 -= min_x;
    }
    cells.sort();
    cells
}

#[test]
fn test_s_and_z_are_mirrors() {
    for rotation in 0..2 {
        let s = get_shape(PieceKind::S, rotation);
        let z = get_shape(PieceKind::Z, rotation);
        let mirrored = normalized(s.iter().map(|&(x, y)| (2 - x, y)));
        assert_eq!(mirrored, normalized(z), "rotation {}", rotation);
    }
}

#[test]
fn test_j_and_l_spawn_shapes() {
    assert_eq!(get_shape(PieceKind::J, 0), [(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::L, 0), [(2, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_all_shapes_have_four_cells_in_distinct_states() {
    for kind in PieceKind::ALL {
        let table = shapes(kind);
        for (i, a) in table.iter().enumerate() {
            for b in &table[i + 1..] {
                let mut a = a.to_vec();
                let mut b = b.to_vec();
                a.sort();
                b.sort();
                assert_ne!(a, b, "{:?} has duplicate rotation states", kind);
            }
        }
    }
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_cells_fit_top_rows() {
    assert_eq!(SPAWN_POSITION, (3, 0));

    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        assert_eq!((piece.x, piece.y), SPAWN_POSITION);
        assert_eq!(piece.rotation, 0);

        for (x, y) in piece.cells() {
            assert!((3..=6).contains(&x), "{:?} spawns outside columns 3-6", kind);
            assert!((0..=1).contains(&y), "{:?} spawns below row 1", kind);
        }
    }
}

#[test]
fn test_cells_at_offsets_shape_by_anchor() {
    assert_eq!(
        cells_at(PieceKind::I, 1, 7, 16),
        [(9, 16), (9, 17), (9, 18), (9, 19)]
    );
}

// ============== Rotation Tests ==============

#[test]
fn test_full_cycle_returns_to_start() {
    for kind in PieceKind::ALL {
        let mut piece = Tetromino::new(kind);
        for _ in 0..kind.rotation_states() {
            let rotation = piece.rotate(RotateDirection::Clockwise);
            piece = piece.with(rotation, piece.x, piece.y);
        }
        assert_eq!(piece, Tetromino::new(kind), "{:?}", kind);
    }
}

#[test]
fn test_cw_then_ccw_is_identity() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        let cw = piece.with(piece.rotate(RotateDirection::Clockwise), piece.x, piece.y);
        let back = cw.rotate(RotateDirection::CounterClockwise);
        assert_eq!(back, piece.rotation, "{:?}", kind);
    }
}

#[test]
fn test_two_state_pieces_toggle() {
    for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
        let piece = Tetromino::new(kind);
        assert_eq!(piece.rotate(RotateDirection::Clockwise), 1);
        assert_eq!(piece.rotate(RotateDirection::CounterClockwise), 1);
    }
}

#[test]
fn test_vertical_i_at_right_wall_has_no_room_to_rotate() {
    // Vertical I in the last column: the horizontal state would stick out.
    let piece = Tetromino {
        kind: PieceKind::I,
        rotation: 1,
        x: 7,
        y: 5,
    };
    let rotated = piece.cells_at(piece.rotate(RotateDirection::Clockwise), piece.x, piece.y);
    assert!(rotated.iter().any(|&(x, _)| x >= BOARD_WIDTH as i8));
}
