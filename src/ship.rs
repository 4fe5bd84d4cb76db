//! Ship definitions, orientation and footprint geometry.

use crate::board::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Coordinate `offset` cells along this orientation from `origin`.
    pub fn step(self, origin: Coord, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => Coord::new(origin.row, origin.col.saturating_add(offset)),
            Orientation::Vertical => Coord::new(origin.row.saturating_add(offset), origin.col),
        }
    }

    /// The cell before `origin` along this orientation, `None` at the edge.
    pub fn step_back(self, origin: Coord) -> Option<Coord> {
        match self {
            Orientation::Horizontal => Some(Coord::new(origin.row, origin.col.checked_sub(1)?)),
            Orientation::Vertical => Some(Coord::new(origin.row.checked_sub(1)?, origin.col)),
        }
    }
}

/// The cells a ship of `length` occupies when anchored at its topmost or
/// leftmost cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub anchor: Coord,
    pub orientation: Orientation,
    pub length: usize,
}

impl Footprint {
    pub fn new(anchor: Coord, orientation: Orientation, length: usize) -> Self {
        Self {
            anchor,
            orientation,
            length,
        }
    }

    /// Last cell of the footprint (bottom or right end).
    pub fn end(&self) -> Coord {
        self.orientation.step(self.anchor, self.length.saturating_sub(1))
    }

    /// Returns `true` if the whole footprint lies inside a `size`×`size` grid.
    pub fn fits(&self, size: usize) -> bool {
        if self.length == 0 {
            return false;
        }
        let end = self.end();
        end.row < size && end.col < size
    }

    /// Iterator over the footprint cells, anchor first.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let fp = *self;
        (0..fp.length).map(move |i| fp.orientation.step(fp.anchor, i))
    }

    pub fn contains(&self, coord: Coord) -> bool {
        let end = self.end();
        (self.anchor.row..=end.row).contains(&coord.row)
            && (self.anchor.col..=end.col).contains(&coord.col)
    }

    /// Every cell of the footprint expanded by one row and column on each
    /// side, clipped to a `size`×`size` grid. Includes the footprint itself
    /// and the diagonal neighbours of its ends.
    pub fn surroundings(&self, size: usize) -> impl Iterator<Item = Coord> {
        let end = self.end();
        let top = self.anchor.row.saturating_sub(1);
        let left = self.anchor.col.saturating_sub(1);
        let bottom = end.row.saturating_add(1).min(size.saturating_sub(1));
        let right = end.col.saturating_add(1).min(size.saturating_sub(1));
        let rows = if size == 0 { 1..=0 } else { top..=bottom };
        rows.flat_map(move |r| (left..=right).map(move |c| Coord::new(r, c)))
    }

    /// Surrounding cells that are not part of the footprint.
    pub fn buffer_ring(&self, size: usize) -> impl Iterator<Item = Coord> {
        let fp = *self;
        self.surroundings(size).filter(move |c| !fp.contains(*c))
    }
}

/// A single ship of a fleet.
///
/// Unplaced ships have no anchor. The orientation is kept even while the
/// ship is unplaced so that toggling before dropping it is remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    length: usize,
    orientation: Orientation,
    anchor: Option<Coord>,
    afloat: bool,
}

impl Ship {
    /// New unplaced, horizontal ship.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            orientation: Orientation::Horizontal,
            anchor: None,
            afloat: true,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn anchor(&self) -> Option<Coord> {
        self.anchor
    }

    pub fn is_placed(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn is_afloat(&self) -> bool {
        self.afloat
    }

    /// Footprint of a placed ship, `None` while unplaced.
    pub fn footprint(&self) -> Option<Footprint> {
        self.anchor
            .map(|anchor| Footprint::new(anchor, self.orientation, self.length))
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub(crate) fn bind(&mut self, anchor: Coord, orientation: Orientation) {
        self.anchor = Some(anchor);
        self.orientation = orientation;
    }

    pub(crate) fn unbind(&mut self) {
        self.anchor = None;
    }

    pub(crate) fn sink(&mut self) {
        self.afloat = false;
    }
}
