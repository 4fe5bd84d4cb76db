use alloc::vec::Vec;
use core::time::Duration;

use crate::common::GameError;
use crate::turn::Seat;

pub const BOARD_SIZE: usize = 10;

/// Largest accepted board side: columns `A` through `ZZ`.
pub const MAX_BOARD_SIZE: usize = 702;

/// Ships per length, indexed by length: four 1-cell ships, three 2-cell,
/// two 3-cell and one 4-cell.
pub const FLEET_COUNTS: [usize; 5] = [0, 4, 3, 2, 1];

/// Delay between a miss and the other player taking the turn.
pub const CHANGEOVER_DELAY_MS: u64 = 1000;

/// Delay before each attack of a scripted player.
pub const SCRIPTED_ATTACK_DELAY_MS: u64 = 1000;

/// Random samples the targeting strategy draws before scanning.
pub const TARGET_ATTEMPTS: usize = 50;

/// Fleet composition as a count table: `counts[len]` ships of length `len`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct FleetComposition {
    counts: Vec<usize>,
}

impl FleetComposition {
    pub fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    pub fn standard() -> Self {
        Self::new(FLEET_COUNTS.to_vec())
    }

    /// Composition with one ship per listed length.
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let longest = lengths.iter().copied().max().unwrap_or(0);
        let mut counts = alloc::vec![0; longest + 1];
        for &len in lengths {
            counts[len] += 1;
        }
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Ship lengths, longest first.
    pub fn lengths(&self) -> Vec<usize> {
        self.counts
            .iter()
            .enumerate()
            .rev()
            .flat_map(|(len, &n)| core::iter::repeat(len).take(n))
            .filter(|&len| len > 0)
            .collect()
    }

    pub fn ship_count(&self) -> usize {
        self.lengths().len()
    }

    /// Sum of all ship lengths.
    pub fn total_cells(&self) -> usize {
        self.lengths().iter().sum()
    }

    pub fn longest(&self) -> usize {
        self.lengths().first().copied().unwrap_or(0)
    }
}

impl Default for FleetComposition {
    fn default() -> Self {
        Self::standard()
    }
}

/// Match parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: FleetComposition,
    pub changeover_delay_ms: u64,
    pub scripted_attack_delay_ms: u64,
    pub target_attempts: usize,
    pub first_seat: Seat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FleetComposition::standard(),
            changeover_delay_ms: CHANGEOVER_DELAY_MS,
            scripted_attack_delay_ms: SCRIPTED_ATTACK_DELAY_MS,
            target_attempts: TARGET_ATTEMPTS,
            first_seat: Seat::First,
        }
    }
}

impl GameConfig {
    pub fn changeover_delay(&self) -> Duration {
        Duration::from_millis(self.changeover_delay_ms)
    }

    pub fn scripted_attack_delay(&self) -> Duration {
        Duration::from_millis(self.scripted_attack_delay_ms)
    }

    /// Same match with both delays removed, for simulations.
    pub fn without_delays(mut self) -> Self {
        self.changeover_delay_ms = 0;
        self.scripted_attack_delay_ms = 0;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 {
            return Err(GameError::InvalidConfig("board size must be at least 1"));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig("board size must be at most 702"));
        }
        if self.fleet.ship_count() == 0 {
            return Err(GameError::InvalidConfig("fleet has no ships"));
        }
        if self.fleet.longest() > self.board_size {
            return Err(GameError::InvalidConfig("ship longer than the board"));
        }
        Ok(())
    }
}
