//! Tetris playfield: fixed grid, collision predicate and line clearing

use serde::{Deserialize, Serialize};

use super::tetromino::Piece;
use crate::consts::{TETRIS_COLS, TETRIS_ROWS};

/// One board row, 0 = empty, nonzero = color id
pub type Row = [u8; TETRIS_COLS];

/// 10x20 grid, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: [Row; TETRIS_ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: [[0; TETRIS_COLS]; TETRIS_ROWS],
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row; TETRIS_ROWS] {
        &self.rows
    }

    /// Cell value, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.rows[y as usize][x as usize])
    }

    /// Write a cell; out-of-range writes are dropped
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        if Self::in_bounds(x, y) {
            self.rows[y as usize][x as usize] = value;
        }
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..TETRIS_COLS as i32).contains(&x) && (0..TETRIS_ROWS as i32).contains(&y)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&c| c == 0))
    }

    /// True if `piece` moved by (dx, dy) leaves the grid or overlaps a filled cell
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece
            .cells()
            .any(|(x, y)| !matches!(self.get(x + dx, y + dy), Some(0)))
    }

    /// Stamp the piece's cells with its color
    pub fn merge(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            self.set(x, y, color);
        }
    }

    /// Remove full rows, shift the rest down, backfill empty rows on top.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut write_row = TETRIS_ROWS;

        for r in (0..TETRIS_ROWS).rev() {
            if self.rows[r].iter().all(|&c| c != 0) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != r {
                self.rows[write_row] = self.rows[r];
            }
        }

        for row in &mut self.rows[..write_row] {
            *row = [0; TETRIS_COLS];
        }

        cleared
    }
}

/// Collision predicate used before every move, rotation and spawn
pub fn check_collision(piece: &Piece, board: &Board, dx: i32, dy: i32) -> bool {
    board.collides(piece, dx, dy)
}
