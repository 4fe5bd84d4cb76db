//! Resolution of a single attack against the defender's fleet.
//!
//! The attacker's knowledge board is the only board written here. A ship is
//! sunk once every cell of its run on the defender's ground-truth board has
//! been revealed as `Hit`; the cells around it are then revealed as water,
//! since the placement buffer rule guarantees nothing else can be there.

use crate::board::{Board, CellState, Coord};
use crate::common::{AttackOutcome, GameError};
use crate::fleet::Fleet;
use crate::ship::Footprint;

/// Resolve an attack on `target`.
///
/// `knowledge` is the attacker's view of the defender, `truth` the
/// defender's own board and `fleet` the defender's ships. Cells already
/// revealed on `knowledge` are rejected with `AlreadyResolved` and nothing
/// changes.
pub fn resolve_attack(
    knowledge: &mut Board,
    truth: &Board,
    fleet: &mut Fleet,
    target: Coord,
) -> Result<AttackOutcome, GameError> {
    if knowledge.get(target)? != CellState::Unknown {
        return Err(GameError::AlreadyResolved);
    }
    let actual = truth.get(target)?;
    let Some(orient) = actual.ship_orientation() else {
        knowledge.set(target, CellState::Water)?;
        return Ok(AttackOutcome::Miss);
    };
    knowledge.set(target, CellState::Hit)?;

    let revealed = |c: Coord| knowledge.cell(c) == Some(CellState::Hit);

    // forward to the end of the run
    let mut end = target;
    loop {
        let next = orient.step(end, 1);
        if truth.cell(next) != Some(actual) {
            break;
        }
        if !revealed(next) {
            return Ok(AttackOutcome::Hit);
        }
        end = next;
    }

    // back to its start
    let mut start = target;
    while let Some(prev) = orient.step_back(start) {
        if truth.cell(prev) != Some(actual) {
            break;
        }
        if !revealed(prev) {
            return Ok(AttackOutcome::Hit);
        }
        start = prev;
    }

    let length = (end.row - start.row) + (end.col - start.col) + 1;
    let run = Footprint::new(start, orient, length);

    let newly_known: alloc::vec::Vec<Coord> = run
        .surroundings(knowledge.size())
        .filter(|c| knowledge.cell(*c) == Some(CellState::Unknown))
        .collect();
    for c in newly_known {
        knowledge.set(c, CellState::Water)?;
    }

    match fleet.find_afloat(&run) {
        Some(idx) => fleet.sink(idx)?,
        None => {
            log::warn!(
                "sunk run at ({}, {}) len {} matches no ship footprint",
                start.row,
                start.col,
                length
            );
            if let Some(idx) = fleet.find_afloat_by_length(length) {
                fleet.sink(idx)?;
            }
        }
    }

    let fleet_destroyed = fleet.is_destroyed();
    log::debug!(
        "sunk length {} at ({}, {}), {} afloat",
        length,
        start.row,
        start.col,
        fleet.afloat_count()
    );
    Ok(AttackOutcome::Sunk {
        length,
        fleet_destroyed,
    })
}
