use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// One of the eight straight directions a word can run in, plus `Point` for a
/// single-cell selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Point,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

const DISPLACEMENTS: [((i8, i8), Direction); 9] = [
    ((0, 0), Direction::Point),
    ((-1, 0), Direction::North),
    ((-1, 1), Direction::NorthEast),
    ((0, 1), Direction::East),
    ((1, 1), Direction::SouthEast),
    ((1, 0), Direction::South),
    ((1, -1), Direction::SouthWest),
    ((0, -1), Direction::West),
    ((-1, -1), Direction::NorthWest),
];

impl Direction {
    /// Unit `(row, col)` step for this direction.
    pub fn step(self) -> (i8, i8) {
        DISPLACEMENTS
            .iter()
            .find(|(_, dir)| *dir == self)
            .map(|(step, _)| *step)
            .unwrap_or((0, 0))
    }

    pub fn from_step(step: (i8, i8)) -> Option<Self> {
        DISPLACEMENTS
            .iter()
            .find(|(candidate, _)| *candidate == step)
            .map(|(_, dir)| *dir)
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest
        )
    }
}

/// Signed displacement from `from` to `to`, as `(Δrow, Δcol)`.
pub fn displacement(from: Coord2, to: Coord2) -> (i16, i16) {
    (
        i16::from(to.0) - i16::from(from.0),
        i16::from(to.1) - i16::from(from.1),
    )
}

/// Applies `delta` `times` over to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(
    coords: Coord2,
    delta: (i8, i8),
    times: u8,
    bounds: Coord2,
) -> Option<Coord2> {
    let offset = |base: Coord, step: i8, max: Coord| -> Option<Coord> {
        let next = i16::from(base) + i16::from(step) * i16::from(times);
        let next = Coord::try_from(next).ok()?;
        (next < max).then_some(next)
    };

    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    Some((offset(row, d_row, max_row)?, offset(col, d_col, max_col)?))
}
