//! Pieces module - Tetromino shapes and rotation tables
//!
//! Each piece kind maps to a static table with one entry per distinct rotation
//! state. Offsets are (dx, dy) inside a 4x4 box whose top-left corner is the
//! piece anchor. Rotation does not kick: a rotated piece that does not fit is
//! simply rejected by the board.

use crate::types::{PieceKind, RotateDirection};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Absolute board cells occupied by a piece
pub type PieceCells = [(i8, i8); 4];

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

const I_SHAPES: [PieceShape; 2] = [
    // horizontal
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    // vertical
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_SHAPES: [PieceShape; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// Rotation table for a piece kind, one shape per distinct rotation state.
pub fn shapes(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation index.
///
/// The index wraps at the kind's rotation state count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let table = shapes(kind);
    table[rotation as usize % table.len()]
}

/// Absolute cells for a shape anchored at (x, y)
pub fn cells_at(kind: PieceKind, rotation: u8, x: i8, y: i8) -> PieceCells {
    get_shape(kind, rotation).map(|(dx, dy)| (x + dx, y + dy))
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Index into the kind's rotation table
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute cells the piece would occupy with this rotation and anchor.
    pub fn cells_at(&self, rotation: u8, x: i8, y: i8) -> PieceCells {
        cells_at(self.kind, rotation, x, y)
    }

    /// Absolute cells the piece occupies right now
    pub fn cells(&self) -> PieceCells {
        self.cells_at(self.rotation, self.x, self.y)
    }

    /// Rotation index after one step in `direction`. The piece is not changed.
    pub fn rotate(&self, direction: RotateDirection) -> u8 {
        direction.apply(self.rotation, self.kind.rotation_states())
    }

    /// Anchor after moving by (dx, dy). The piece is not changed.
    pub fn translate(&self, dx: i8, dy: i8) -> (i8, i8) {
        (self.x + dx, self.y + dy)
    }

    /// Copy of this piece with a new rotation and anchor
    pub fn with(&self, rotation: u8, x: i8, y: i8) -> Self {
        Self {
            rotation,
            x,
            y,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_match_rotation_state_counts() {
        for kind in PieceKind::ALL {
            assert_eq!(shapes(kind).len(), kind.rotation_states() as usize);
        }
    }

    #[test]
    fn every_shape_has_four_distinct_minos_inside_4x4_box() {
        for kind in PieceKind::ALL {
            for shape in shapes(kind) {
                for (i, a) in shape.iter().enumerate() {
                    assert!((0..4).contains(&a.0) && (0..4).contains(&a.1));
                    for b in &shape[i + 1..] {
                        assert_ne!(a, b, "{:?} has duplicate mino", kind);
                    }
                }
            }
        }
    }

    #[test]
    fn get_shape_wraps_rotation_index() {
        assert_eq!(get_shape(PieceKind::I, 2), get_shape(PieceKind::I, 0));
        assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
        assert_eq!(get_shape(PieceKind::T, 5), get_shape(PieceKind::T, 1));
    }

    #[test]
    fn rotate_and_translate_do_not_mutate() {
        let piece = Tetromino::new(PieceKind::T);
        assert_eq!(piece.rotate(RotateDirection::Clockwise), 1);
        assert_eq!(piece.rotate(RotateDirection::CounterClockwise), 3);
        assert_eq!(piece.translate(-1, 2), (2, 2));
        assert_eq!(piece, Tetromino::new(PieceKind::T));
    }

    #[test]
    fn o_piece_rotation_is_identity() {
        let piece = Tetromino::new(PieceKind::O);
        assert_eq!(piece.rotate(RotateDirection::Clockwise), 0);
        assert_eq!(piece.rotate(RotateDirection::CounterClockwise), 0);
    }
}
