//! Placement legality with the one-cell buffer rule, preview highlights and
//! random fleet arrangement.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, CellState, Coord};
use crate::common::GameError;
use crate::fleet::Fleet;
use crate::ship::{Footprint, Orientation, Ship};

/// Random anchors tried before enumerating every legal position.
const RANDOM_ATTEMPTS: usize = 100;

/// Full-fleet restarts before giving up on a random arrangement.
const ARRANGE_RESTARTS: usize = 50;

/// Result of a placement preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// `true` if the ship may be committed here.
    pub accepted: bool,
    /// Cells changed to `Ready` or `Blocked` by the preview.
    pub highlights: Vec<(Coord, CellState)>,
}

impl Board {
    /// Returns `true` if `footprint` lies on the board and every cell of it
    /// and of its buffer ring is water.
    pub fn is_clear(&self, footprint: &Footprint) -> bool {
        footprint.fits(self.size())
            && footprint
                .surroundings(self.size())
                .all(|c| self.cell(c) == Some(CellState::Water))
    }

    /// Preview placing `ship` at `anchor` with `orientation`.
    ///
    /// Any earlier preview is cleared first. Accepted footprints are marked
    /// `Ready`; rejected ones mark their in-bounds water cells `Blocked`.
    /// Committed ship cells are never touched.
    pub fn check_placement(
        &mut self,
        ship: &Ship,
        anchor: Coord,
        orientation: Orientation,
    ) -> Placement {
        self.clear_highlights();
        let footprint = Footprint::new(anchor, orientation, ship.length());
        let mut highlights = Vec::new();

        if !footprint.fits(self.size()) {
            // highlight the part that fits before the edge
            let inside: Vec<Coord> = footprint
                .cells()
                .take_while(|c| self.contains(*c))
                .collect();
            for c in inside {
                self.highlight(c, CellState::Blocked, &mut highlights);
            }
            return Placement {
                accepted: false,
                highlights,
            };
        }

        let accepted = self.is_clear(&footprint);
        let mark = if accepted {
            CellState::Ready
        } else {
            CellState::Blocked
        };
        for c in footprint.cells() {
            self.highlight(c, mark, &mut highlights);
        }
        Placement {
            accepted,
            highlights,
        }
    }

    fn highlight(&mut self, coord: Coord, state: CellState, out: &mut Vec<(Coord, CellState)>) {
        if self.cell(coord) == Some(CellState::Water) && self.set(coord, state).is_ok() {
            out.push((coord, state));
        }
    }

    /// Commit `ship` at `anchor`. Does not re-check legality; callers run
    /// [`Board::check_placement`] first.
    pub fn place(&mut self, ship: &mut Ship, anchor: Coord, orientation: Orientation) {
        let footprint = Footprint::new(anchor, orientation, ship.length());
        for c in footprint.cells() {
            let _ = self.set(c, CellState::ship(orientation));
        }
        ship.bind(anchor, orientation);
    }

    /// Reset every `Ready`/`Blocked` cell to water.
    pub fn clear_highlights(&mut self) {
        let stale: Vec<Coord> = self
            .iter()
            .filter(|(_, s)| s.is_highlight())
            .map(|(c, _)| c)
            .collect();
        for c in stale {
            let _ = self.set(c, CellState::Water);
        }
    }

    /// Return a placed ship's cells to water and unplace it.
    pub fn remove_ship(&mut self, ship: &mut Ship) {
        if let Some(footprint) = ship.footprint() {
            for c in footprint.cells() {
                let _ = self.set(c, CellState::Water);
            }
            ship.unbind();
        }
    }

    /// Place ship `index` of `fleet`, moving it if it is already on the
    /// board. A rejected move leaves the ship where it was.
    pub fn place_ship(
        &mut self,
        fleet: &mut Fleet,
        index: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        let ship = fleet.ship_mut(index)?;
        let previous = ship.footprint();
        self.remove_ship(ship);

        let placement = self.check_placement(ship, anchor, orientation);
        self.clear_highlights();
        if !placement.accepted {
            if let Some(fp) = previous {
                self.place(ship, fp.anchor, fp.orientation);
            }
            return Err(GameError::IllegalPlacement);
        }
        self.place(ship, anchor, orientation);
        Ok(())
    }

    /// Every legal (anchor, orientation) for a ship of `length`.
    pub fn legal_placements(&self, length: usize) -> Vec<(Coord, Orientation)> {
        let mut out = Vec::new();
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            for (anchor, _) in self.iter() {
                if self.is_clear(&Footprint::new(anchor, orient, length)) {
                    out.push((anchor, orient));
                }
            }
        }
        out
    }

    /// Returns a random legal (anchor, orientation) for a ship of `length`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(Coord, Orientation), GameError> {
        let size = self.size();
        if length == 0 || length > size {
            return Err(GameError::UnableToPlaceShip);
        }
        for _ in 0..RANDOM_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (size - 1, size - length),
                Orientation::Vertical => (size - length, size - 1),
            };
            let anchor = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.is_clear(&Footprint::new(anchor, orient, length)) {
                return Ok((anchor, orient));
            }
        }
        let legal = self.legal_placements(length);
        if legal.is_empty() {
            return Err(GameError::UnableToPlaceShip);
        }
        Ok(legal[rng.random_range(0..legal.len())])
    }
}

/// Place every ship of `fleet` at random legal positions on `board`.
///
/// The board is reset to water first. Ships go down longest first; when one
/// no longer fits the whole arrangement starts over.
pub fn arrange_fleet<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &mut Fleet,
    rng: &mut R,
) -> Result<(), GameError> {
    for attempt in 0..ARRANGE_RESTARTS {
        board.fill(CellState::Water);
        fleet.unplace_all();
        match try_arrange(board, fleet, rng) {
            Ok(()) => {
                log::debug!("fleet arranged after {} restart(s)", attempt);
                return Ok(());
            }
            Err(GameError::UnableToPlaceShip) => continue,
            Err(e) => return Err(e),
        }
    }
    board.fill(CellState::Water);
    fleet.unplace_all();
    Err(GameError::UnableToPlaceShip)
}

fn try_arrange<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &mut Fleet,
    rng: &mut R,
) -> Result<(), GameError> {
    for i in 0..fleet.len() {
        let length = fleet.ship(i)?.length();
        let (anchor, orient) = board.random_placement(rng, length)?;
        board.place(fleet.ship_mut(i)?, anchor, orient);
    }
    Ok(())
}
