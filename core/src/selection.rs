use alloc::string::String;
use core::mem;
use serde::Serialize;
use smallvec::SmallVec;

use crate::*;

/// Cells along a straight drag path, start first.
pub type Line = SmallVec<[Cell; 16]>;

/// Direction from `start` to `end`, if the two lie on one horizontal, vertical
/// or 45° diagonal line.
pub fn line_direction(start: Coord2, end: Coord2) -> Option<Direction> {
    let (d_row, d_col) = displacement(start, end);
    if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
        return None;
    }
    Direction::from_step((d_row.signum() as i8, d_col.signum() as i8))
}

/// Resolves the cells spanned by a drag from `start` to `end`.
///
/// Returns `None` when either end lies outside the grid or the displacement is
/// not straight. The path holds `max(|Δrow|, |Δcol|) + 1` cells. Accepted
/// displacements always have per-axis steps of -1, 0 or 1, so every
/// interpolated position is integral and the walk is done in exact integer
/// arithmetic; no rounding mode is ever involved.
pub fn resolve_line(grid: &LetterGrid, start: Coord2, end: Coord2) -> Option<Line> {
    if !grid.contains(start) || !grid.contains(end) {
        return None;
    }

    let direction = line_direction(start, end)?;
    let (d_row, d_col) = displacement(start, end);
    let steps = Coord::try_from(d_row.unsigned_abs().max(d_col.unsigned_abs())).ok()?;
    let step = direction.step();
    let bounds = grid.size();

    (0..=steps)
        .map(|i| apply_delta(start, step, i, bounds).and_then(|coords| grid.cell_at(coords)))
        .collect()
}

/// Letters of `cells` concatenated in drag order.
pub fn line_word(cells: &[Cell]) -> String {
    cells.iter().map(|cell| cell.letter).collect()
}

/// The drag path of the gesture in progress. Empty while idle.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Selection {
    cells: Line,
}

impl Selection {
    pub fn is_idle(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.iter().any(|cell| cell.coords() == coords)
    }

    /// Starts a new path at `coords`. Out-of-bounds positions leave the selection idle.
    pub fn begin(&mut self, grid: &LetterGrid, coords: Coord2) -> bool {
        self.cells.clear();
        match grid.cell_at(coords) {
            Some(cell) => {
                self.cells.push(cell);
                true
            }
            None => false,
        }
    }

    /// Re-anchors the path from its start cell to `coords`.
    ///
    /// A non-straight target keeps the previous path. Returns whether the path changed.
    pub fn extend(&mut self, grid: &LetterGrid, coords: Coord2) -> bool {
        let Some(start) = self.start() else {
            return false;
        };

        match resolve_line(grid, start.coords(), coords) {
            Some(line) if line != self.cells => {
                self.cells = line;
                true
            }
            _ => false,
        }
    }

    /// Ends the gesture, handing back the path and leaving the selection idle.
    pub fn finish(&mut self) -> Line {
        mem::take(&mut self.cells)
    }

    pub fn cancel(&mut self) {
        self.cells.clear();
    }
}
