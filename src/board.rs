//! Grid of cell states seen by one observer.
//!
//! A player owns two boards: the ground-truth board holding its own fleet,
//! and a knowledge board recording what it has learned about the opponent.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::GameError;
use crate::ship::{Footprint, Orientation};

/// Zero-based (row, column) position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Not yet revealed (knowledge boards only).
    #[default]
    Unknown,
    /// Confirmed empty.
    Water,
    /// Part of a horizontal ship (ground-truth boards only).
    ShipHorizontal,
    /// Part of a vertical ship (ground-truth boards only).
    ShipVertical,
    /// Placement preview: the ship fits here.
    Ready,
    /// Placement preview: the ship does not fit here.
    Blocked,
    /// Revealed ship cell (knowledge boards only).
    Hit,
}

impl CellState {
    pub fn is_ship(self) -> bool {
        matches!(self, CellState::ShipHorizontal | CellState::ShipVertical)
    }

    /// Transient placement-preview states.
    pub fn is_highlight(self) -> bool {
        matches!(self, CellState::Ready | CellState::Blocked)
    }

    /// Orientation of a ship cell.
    pub fn ship_orientation(self) -> Option<Orientation> {
        match self {
            CellState::ShipHorizontal => Some(Orientation::Horizontal),
            CellState::ShipVertical => Some(Orientation::Vertical),
            _ => None,
        }
    }

    pub fn ship(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => CellState::ShipHorizontal,
            Orientation::Vertical => CellState::ShipVertical,
        }
    }
}

/// Read-only copy of a board for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub size: usize,
    /// Row-major cells, `cells[row][col]`.
    pub cells: Vec<Vec<CellState>>,
}

impl BoardSnapshot {
    pub fn get(&self, coord: Coord) -> Option<CellState> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }
}

/// An N×N grid of [`CellState`], stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Create a `size`×`size` board with every cell set to `fill`.
    pub fn new(size: usize, fill: CellState) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Empty ground-truth board: all water.
    pub fn water(size: usize) -> Self {
        Self::new(size, CellState::Water)
    }

    /// Fresh knowledge board: nothing revealed.
    pub fn unknown(size: usize) -> Self {
        Self::new(size, CellState::Unknown)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    #[inline]
    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if self.contains(coord) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(GameError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            })
        }
    }

    /// State at `coord`, or `OutOfBounds`.
    pub fn get(&self, coord: Coord) -> Result<CellState, GameError> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// State at `coord`, `None` when out of range.
    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        self.get(coord).ok()
    }

    /// Overwrite the state at `coord`. Out-of-range writes change nothing.
    pub fn set(&mut self, coord: Coord, state: CellState) -> Result<(), GameError> {
        let i = self.index(coord)?;
        self.cells[i] = state;
        Ok(())
    }

    /// Set every cell to `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.iter_mut().for_each(|c| *c = state);
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Iterator over `(coord, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, s)| (Coord::new(i / n, i % n), *s))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|s| **s == state).count()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            cells: self.cells.chunks(self.size.max(1)).map(|r| r.to_vec()).collect(),
        }
    }

    /// Every maximal run of same-orientation ship cells, scanned row-major.
    ///
    /// On a legal ground-truth board each run is exactly one ship, so the
    /// run lengths are the fleet's ship lengths.
    pub fn ship_runs(&self) -> Vec<Footprint> {
        let mut runs = Vec::new();
        for (coord, state) in self.iter() {
            let Some(orient) = state.ship_orientation() else {
                continue;
            };
            // only start a run at its first cell
            if orient.step_back(coord).and_then(|c| self.cell(c)) == Some(state) {
                continue;
            }
            let mut length = 1;
            while self.cell(orient.step(coord, length)) == Some(state) {
                length += 1;
            }
            runs.push(Footprint::new(coord, orient, length));
        }
        runs
    }
}
