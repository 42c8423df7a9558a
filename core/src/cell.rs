use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Closed,
    Open,
    Flagged,
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Closed
    }
}

/// Either the cell is a mine or it holds the number of mines around it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    Mine,
    Count(u8),
}

impl Adjacency {
    /// Numeric form used by the text views, where a mine shows as `9`.
    pub const MINE_VALUE: u8 = 9;

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub const fn value(self) -> u8 {
        match self {
            Self::Mine => Self::MINE_VALUE,
            Self::Count(count) => count,
        }
    }
}

impl Default for Adjacency {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl fmt::Display for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One grid position. Cells never move, so `(row, col)` is their identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub col: Coord,
    pub adjacency: Adjacency,
    pub status: CellStatus,
}

impl Cell {
    pub const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            adjacency: Adjacency::Count(0),
            status: CellStatus::Closed,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.adjacency.is_mine()
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.status, CellStatus::Open)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.status, CellStatus::Flagged)
    }
}
