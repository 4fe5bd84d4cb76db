#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod attack;
mod board;
mod common;
mod config;
mod fleet;
mod placement;
mod player;
mod session;
mod ship;
mod turn;
pub mod render;
#[cfg(feature = "std")]
pub mod host;
#[cfg(feature = "std")]
mod logging;

pub use ai::*;
pub use attack::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use placement::*;
pub use player::*;
pub use session::*;
pub use ship::*;
pub use turn::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
