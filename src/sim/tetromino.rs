//! Tetromino shapes and the falling piece

use serde::{Deserialize, Serialize};

use crate::consts::TETRIS_COLS;

/// Largest shape side length
const MAX_SIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::L,
        Tetromino::J,
        Tetromino::S,
        Tetromino::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Board value written when this piece locks (never zero)
    pub fn color(self) -> u8 {
        self as u8 + 1
    }

    /// Spawn orientation, rows top to bottom
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            Tetromino::I => &[&[1, 1, 1, 1]],
            Tetromino::O => &[&[1, 1], &[1, 1]],
            Tetromino::T => &[&[1, 1, 1], &[0, 1, 0]],
            Tetromino::L => &[&[1, 1, 1], &[1, 0, 0]],
            Tetromino::J => &[&[1, 1, 1], &[0, 0, 1]],
            Tetromino::S => &[&[1, 1, 0], &[0, 1, 1]],
            Tetromino::Z => &[&[0, 1, 1], &[1, 1, 0]],
        };
        Shape::from_rows(rows)
    }
}

/// Occupancy matrix of up to 4x4 cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: [[u8; MAX_SIDE]; MAX_SIDE],
}

impl Shape {
    /// Build from row slices. Rows longer than 4 cells are truncated.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[0u8; MAX_SIDE]; MAX_SIDE];
        let height = rows.len().min(MAX_SIDE);
        let mut width = 0;
        for (r, row) in rows.iter().take(height).enumerate() {
            width = width.max(row.len().min(MAX_SIDE));
            for (c, &v) in row.iter().take(MAX_SIDE).enumerate() {
                cells[r][c] = u8::from(v != 0);
            }
        }
        Self {
            rows: height,
            cols: width,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn height(&self) -> usize {
        self.rows
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row][col] != 0
    }

    /// Filled cells as (col, row) offsets from the top-left corner
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r][c] != 0)
                .map(move |c| (c, r))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row
    pub fn rotated(&self) -> Self {
        let mut cells = [[0u8; MAX_SIDE]; MAX_SIDE];
        for (r, row) in cells.iter_mut().enumerate().take(self.cols) {
            for (c, cell) in row.iter_mut().enumerate().take(self.rows) {
                *cell = self.cells[self.rows - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// The falling piece: shape plus top-left anchor on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: Tetromino,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Horizontally centered on the top row
    pub fn spawn(kind: Tetromino) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            x: (TETRIS_COLS / 2) as i32 - (shape.width() / 2) as i32,
            y: 0,
        }
    }

    pub fn color(&self) -> u8 {
        self.kind.color()
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(c, r)| (self.x + c as i32, self.y + r as i32))
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in Tetromino::ALL {
            assert_eq!(kind.shape().filled().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_colors_are_nonzero_and_distinct() {
        let colors: Vec<u8> = Tetromino::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(Piece::spawn(Tetromino::I).x, 3);
        assert_eq!(Piece::spawn(Tetromino::O).x, 4);
        assert_eq!(Piece::spawn(Tetromino::T).x, 4);
        assert_eq!(Piece::spawn(Tetromino::Z).y, 0);
    }

    #[test]
    fn test_rotate_i_piece_goes_vertical() {
        let vertical = Tetromino::I.shape().rotated();
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        assert!((0..4).all(|r| vertical.is_filled(r, 0)));
    }

    #[test]
    fn test_rotate_t_piece_clockwise() {
        // [111]      [01]
        // [010]  ->  [11]
        //            [01]
        let rotated = Tetromino::T.shape().rotated();
        assert_eq!(rotated, Shape::from_rows(&[&[0, 1], &[1, 1], &[0, 1]]));
    }

    #[test]
    fn test_rotate_l_piece_clockwise() {
        // [111]      [11]
        // [100]  ->  [01]
        //            [01]
        let rotated = Tetromino::L.shape().rotated();
        assert_eq!(rotated, Shape::from_rows(&[&[1, 1], &[0, 1], &[0, 1]]));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in Tetromino::ALL {
            let shape = kind.shape();
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_piece_cells_follow_anchor() {
        let piece = Piece::spawn(Tetromino::O).offset(1, 2);
        let cells: Vec<(i32, i32)> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 2), (6, 2), (5, 3), (6, 3)]);
    }
}
