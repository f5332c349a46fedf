//! Board tests - collision, locking and row clearing

use term_tetris::core::Board;
use term_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), 200);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_free(x, y), "Cell ({}, {}) should be free", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(0, 0, Some(PieceKind::I)));
    assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_board_is_valid_cells() {
    let mut board = Board::new();
    let square = [(3, 5), (4, 5), (3, 6), (4, 6)];

    assert!(board.is_valid(&square));

    board.set(4, 6, Some(PieceKind::L));
    assert!(!board.is_valid(&square));

    // Any cell outside the board invalidates the whole piece.
    assert!(!Board::new().is_valid(&[(8, 0), (9, 0), (10, 0), (9, 1)]));
    assert!(!Board::new().is_valid(&[(0, -1), (0, 0), (1, 0), (2, 0)]));
    assert!(!Board::new().is_valid(&[(0, 18), (0, 19), (0, 20), (1, 19)]));
}

#[test]
fn test_board_lock_piece_success() {
    let mut board = Board::new();
    let square = [(3, 5), (4, 5), (3, 6), (4, 6)];

    assert!(board.lock(&square, PieceKind::O));

    for (x, y) in square {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::O)));
    }
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_board_lock_piece_collision() {
    let mut board = Board::new();
    board.set(4, 5, Some(PieceKind::T));

    assert!(!board.lock(&[(3, 5), (4, 5), (3, 6), (4, 6)], PieceKind::O));

    assert_eq!(board.get(3, 5), Some(None));
    assert_eq!(board.get(4, 5), Some(Some(PieceKind::T)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_board_lock_piece_out_of_bounds() {
    let mut board = Board::new();
    assert!(!board.lock(&[(7, 5), (8, 5), (9, 5), (10, 5)], PieceKind::I));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_is_row_full() {
    let mut board = Board::new();
    assert!(!board.is_row_full(5));

    fill_row(&mut board, 5, PieceKind::T);
    assert!(board.is_row_full(5));

    for x in 0..BOARD_WIDTH as i8 - 1 {
        board.set(x, 6, Some(PieceKind::I));
    }
    assert!(!board.is_row_full(6));
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_board_clear_no_full_rows() {
    let mut board = Board::from_rows(&["XXXXXXXXX.", "X.X.X.X.X."]);
    let before = board.clone();

    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_board_clear_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 18, PieceKind::I);
    fill_row(&mut board, 19, PieceKind::O);
    board.set(0, 17, Some(PieceKind::T));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 18]);

    // The T dropped by the two cleared rows below it.
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.filled_count(), 1);

    // Nothing left to clear.
    assert!(board.clear_full_rows().is_empty());
}

#[test]
fn test_board_clear_multiple_rows_order() {
    let mut board = Board::new();
    fill_row(&mut board, 5, PieceKind::T);
    fill_row(&mut board, 10, PieceKind::I);
    fill_row(&mut board, 15, PieceKind::O);

    board.set(0, 4, Some(PieceKind::J));
    board.set(0, 9, Some(PieceKind::L));
    board.set(0, 14, Some(PieceKind::S));
    board.set(0, 19, Some(PieceKind::Z));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[15, 10, 5]);

    // Each surviving row drops by the number of cleared rows below it.
    assert_eq!(board.get(0, 7), Some(Some(PieceKind::J)));
    assert_eq!(board.get(0, 11), Some(Some(PieceKind::L)));
    assert_eq!(board.get(0, 15), Some(Some(PieceKind::S)));
    // Rows below every cleared row stay where they were.
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::Z)));
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_board_clear_keeps_row_contents_and_order() {
    let mut board = Board::from_rows(&[
        "S.S.S.S.S.",
        "XXXXXXXXXX",
        "L.......L.",
        "XXXXXXXXXX",
    ]);

    assert_eq!(board.clear_full_rows().len(), 2);

    let expected = Board::from_rows(&["S.S.S.S.S.", "L.......L."]);
    assert_eq!(board, expected);
}

#[test]
fn test_board_clear_four_rows() {
    let mut board = Board::from_rows(&[
        "....T.....",
        "XXXXXXXXXX",
        "XXXXXXXXXX",
        "XXXXXXXXXX",
        "XXXXXXXXXX",
    ]);

    assert_eq!(board.clear_full_rows().len(), 4);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_board_clear() {
    let mut board = Board::new();
    fill_row(&mut board, 5, PieceKind::T);

    board.clear();

    assert_eq!(board.filled_count(), 0);
    assert_eq!(board, Board::new());
}
