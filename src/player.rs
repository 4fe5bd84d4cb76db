use alloc::string::String;

use crate::board::Board;
use crate::config::GameConfig;
use crate::fleet::Fleet;
use crate::turn::PlayerKind;

/// One seat's state: its fleet, its own board and what it knows of the
/// opponent's board.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    fleet: Fleet,
    own_grid: Board,
    enemy_grid: Board,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind, config: &GameConfig) -> Self {
        Self {
            name: name.into(),
            kind,
            fleet: Fleet::new(&config.fleet),
            own_grid: Board::water(config.board_size),
            enemy_grid: Board::unknown(config.board_size),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Ground-truth board with this player's ships.
    pub fn own_grid(&self) -> &Board {
        &self.own_grid
    }

    /// This player's knowledge of the opponent's board.
    pub fn enemy_grid(&self) -> &Board {
        &self.enemy_grid
    }

    pub(crate) fn setup_parts(&mut self) -> (&mut Board, &mut Fleet) {
        (&mut self.own_grid, &mut self.fleet)
    }

    /// Own board and fleet as seen by an attacker: the board is read-only
    /// once play has begun.
    pub(crate) fn defence_parts(&mut self) -> (&Board, &mut Fleet) {
        (&self.own_grid, &mut self.fleet)
    }

    pub(crate) fn enemy_grid_mut(&mut self) -> &mut Board {
        &mut self.enemy_grid
    }
}
