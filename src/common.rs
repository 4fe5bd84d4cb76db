//! Common types for the rules engine: errors and attack outcomes.

/// Result of resolving a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack landed on water.
    Miss,
    /// Attack hit a ship that still has unrevealed cells.
    Hit,
    /// Attack revealed the last cell of a ship.
    Sunk {
        /// Length of the sunk ship.
        length: usize,
        /// `true` when the defender has no ship left afloat.
        fleet_destroyed: bool,
    },
}

impl AttackOutcome {
    /// Whether the attacker keeps the turn after this outcome.
    pub fn keeps_turn(&self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    /// Whether this outcome ends the game.
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            AttackOutcome::Sunk {
                fleet_destroyed: true,
                ..
            }
        )
    }
}

/// Errors returned by board, session and turn operations.
///
/// None of these are fatal: every one of them leaves the game state exactly
/// as it was before the rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Footprint or buffer ring is occupied or leaves the grid.
    IllegalPlacement,
    /// Attack on a cell already revealed on the attacker's knowledge grid.
    AlreadyResolved,
    /// Request came from a seat that may not act right now.
    NotYourTurn,
    /// Ship index not present in the fleet.
    UnknownShip(usize),
    /// Fleet cannot be confirmed while ships remain unplaced.
    SetupIncomplete,
    /// Request is not valid in the current session phase.
    WrongPhase,
    /// Random arrangement could not find room for every ship.
    UnableToPlaceShip,
    /// Wakeup delivered while no delayed transition was pending.
    NoPendingTransition,
    /// Scripted player found no unrevealed cell to attack.
    NoTargetAvailable,
    /// Rejected configuration value.
    InvalidConfig(&'static str),
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the grid", row, col)
            }
            GameError::IllegalPlacement => write!(f, "Ship cannot be placed there"),
            GameError::AlreadyResolved => write!(f, "Cell was already attacked"),
            GameError::NotYourTurn => write!(f, "It is not this player's turn"),
            GameError::UnknownShip(idx) => write!(f, "No ship with index {}", idx),
            GameError::SetupIncomplete => write!(f, "Not every ship has been placed"),
            GameError::WrongPhase => write!(f, "Request not allowed in the current phase"),
            GameError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            GameError::NoPendingTransition => write!(f, "No delayed transition is pending"),
            GameError::NoTargetAvailable => write!(f, "No unrevealed cell left to attack"),
            GameError::InvalidConfig(why) => write!(f, "Invalid configuration: {}", why),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
