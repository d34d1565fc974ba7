use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of one grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub col: Coord,
    pub letter: char,
}

impl Cell {
    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// Fixed-size letter grid, immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LetterGrid {
    letters: Array2<char>,
}

impl LetterGrid {
    pub fn from_letters(letters: Array2<char>) -> Result<Self> {
        let (rows, cols) = letters.dim();
        if rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(PuzzleError::GridTooLarge);
        }
        Ok(Self { letters })
    }

    /// Builds a grid from row strings, one character per cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());

        let mut letters = Vec::with_capacity(height * width);
        for row in rows {
            let before = letters.len();
            letters.extend(row.as_ref().chars());
            if letters.len() - before != width {
                return Err(PuzzleError::RaggedGrid);
            }
        }

        let letters =
            Array2::from_shape_vec((height, width), letters).map_err(|_| PuzzleError::RaggedGrid)?;
        Self::from_letters(letters)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.letters.dim();
        // from_letters guarantees both fit
        (rows as Coord, cols as Coord)
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn letter_at(&self, coords: Coord2) -> Option<char> {
        self.letters.get(coords.to_nd_index()).copied()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.letter_at(coords).map(|letter| Cell {
            row: coords.0,
            col: coords.1,
            letter,
        })
    }

    /// Rows rendered back to strings, in top-to-bottom order.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.letters.rows().into_iter().map(|row| row.iter().collect())
    }
}

impl Index<Coord2> for LetterGrid {
    type Output = char;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.letters[coords.to_nd_index()]
    }
}
