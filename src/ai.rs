// Target selection for scripted players.
// Uniform sampling over unrevealed cells, no hunt/target heuristics.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{Board, CellState, Coord};
use crate::common::GameError;
use crate::config::TARGET_ATTEMPTS;
use crate::fleet::Fleet;
use crate::placement;

/// Behaviour of a non-human seat.
pub trait Strategy: Send {
    /// Place the whole fleet onto `board`.
    fn arrange_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &mut Fleet,
    ) -> Result<(), GameError> {
        placement::arrange_fleet(board, fleet, rng)
    }

    /// Pick an unrevealed cell of `knowledge` to attack.
    fn choose_target(&mut self, rng: &mut SmallRng, knowledge: &Board) -> Option<Coord>;
}

/// Picks uniformly among unknown cells.
#[derive(Debug, Clone, Copy)]
pub struct RandomStrategy {
    attempts: usize,
}

impl RandomStrategy {
    pub fn new(attempts: usize) -> Self {
        Self { attempts }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(TARGET_ATTEMPTS)
    }
}

impl Strategy for RandomStrategy {
    fn choose_target(&mut self, rng: &mut SmallRng, knowledge: &Board) -> Option<Coord> {
        choose_target(rng, knowledge, self.attempts)
    }
}

/// Sample up to `attempts` random cells looking for an `Unknown` one, then
/// fall back to the first `Unknown` cell in row-major order.
///
/// Returns `None` only when no cell is `Unknown`.
pub fn choose_target<R: Rng + ?Sized>(
    rng: &mut R,
    knowledge: &Board,
    attempts: usize,
) -> Option<Coord> {
    let size = knowledge.size();
    if size == 0 {
        return None;
    }
    for _ in 0..attempts {
        let c = Coord::new(rng.random_range(0..size), rng.random_range(0..size));
        if knowledge.cell(c) == Some(CellState::Unknown) {
            return Some(c);
        }
    }
    knowledge
        .iter()
        .find(|(_, s)| *s == CellState::Unknown)
        .map(|(c, _)| c)
}
