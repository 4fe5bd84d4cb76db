//! A player's ships and which of them remain afloat.

use alloc::vec::Vec;

use crate::common::GameError;
use crate::config::FleetComposition;
use crate::ship::{Footprint, Ship};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    /// Unplaced ships for `composition`, longest first.
    pub fn new(composition: &FleetComposition) -> Self {
        Self {
            ships: composition.lengths().into_iter().map(Ship::new).collect(),
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, index: usize) -> Result<&Ship, GameError> {
        self.ships.get(index).ok_or(GameError::UnknownShip(index))
    }

    pub(crate) fn ship_mut(&mut self, index: usize) -> Result<&mut Ship, GameError> {
        self.ships.get_mut(index).ok_or(GameError::UnknownShip(index))
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// Ships not yet sunk.
    pub fn afloat(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|s| s.is_afloat())
    }

    pub fn afloat_count(&self) -> usize {
        self.afloat().count()
    }

    /// Lengths of the ships still afloat, longest first.
    pub fn remaining_lengths(&self) -> Vec<usize> {
        self.afloat().map(Ship::length).collect()
    }

    /// `true` once every ship has been sunk.
    pub fn is_destroyed(&self) -> bool {
        self.afloat_count() == 0
    }

    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(Ship::length).sum()
    }

    /// Index of the afloat ship occupying exactly `footprint`.
    pub fn find_afloat(&self, footprint: &Footprint) -> Option<usize> {
        self.ships
            .iter()
            .position(|s| s.is_afloat() && s.footprint().as_ref() == Some(footprint))
    }

    /// Index of any afloat ship of `length`.
    pub fn find_afloat_by_length(&self, length: usize) -> Option<usize> {
        self.ships
            .iter()
            .position(|s| s.is_afloat() && s.length() == length)
    }

    /// Mark the ship at `index` destroyed.
    pub(crate) fn sink(&mut self, index: usize) -> Result<(), GameError> {
        self.ship_mut(index)?.sink();
        Ok(())
    }

    /// Forget every placement (used before a fresh random arrangement).
    pub(crate) fn unplace_all(&mut self) {
        self.ships.iter_mut().for_each(Ship::unbind);
    }
}
