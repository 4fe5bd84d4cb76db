//! Turn sequencing.
//!
//! The controller decides who may attack and when the turn passes. It never
//! sleeps: every delayed transition is handed to the host as a [`Wakeup`],
//! and the gate stays closed until the host reports it with
//! [`TurnController::wake`]. At most one wakeup is pending at any time.

use core::time::Duration;

use crate::common::{AttackOutcome, GameError};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];
}

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    Human,
    Scripted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnState {
    /// Waiting for an attack from this seat.
    Awaiting(Seat),
    /// Terminal.
    GameOver { winner: Seat },
}

/// Delayed transition the host must deliver back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Wake {
    /// Hand the turn to the other seat after a miss.
    Changeover,
    /// Let the scripted seat fire its next attack.
    ScriptedAttack,
}

/// "Call back after `after`" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wakeup {
    pub after: Duration,
    pub wake: Wake,
}

#[derive(Debug, Clone)]
pub struct TurnController {
    state: TurnState,
    kinds: [PlayerKind; 2],
    ready: bool,
    pending: Option<Wake>,
    changeover_delay: Duration,
    scripted_delay: Duration,
}

impl TurnController {
    pub fn new(
        first: Seat,
        kinds: [PlayerKind; 2],
        changeover_delay: Duration,
        scripted_delay: Duration,
    ) -> Self {
        Self {
            state: TurnState::Awaiting(first),
            kinds,
            ready: false,
            pending: None,
            changeover_delay,
            scripted_delay,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Seat whose turn it is, `None` once the game is over.
    pub fn active(&self) -> Option<Seat> {
        match self.state {
            TurnState::Awaiting(seat) => Some(seat),
            TurnState::GameOver { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.state {
            TurnState::GameOver { winner } => Some(winner),
            TurnState::Awaiting(_) => None,
        }
    }

    /// `true` while an attack from the active seat would be accepted.
    pub fn is_ready(&self) -> bool {
        self.ready && self.pending.is_none() && self.active().is_some()
    }

    pub fn pending(&self) -> Option<Wake> {
        self.pending
    }

    pub fn kind(&self, seat: Seat) -> PlayerKind {
        self.kinds[seat.index()]
    }

    /// Open the first turn.
    pub fn start(&mut self) -> Option<Wakeup> {
        self.open_turn()
    }

    fn open_turn(&mut self) -> Option<Wakeup> {
        let seat = self.active()?;
        match self.kind(seat) {
            PlayerKind::Human => {
                self.ready = true;
                None
            }
            PlayerKind::Scripted => Some(self.schedule(Wake::ScriptedAttack, self.scripted_delay)),
        }
    }

    fn schedule(&mut self, wake: Wake, after: Duration) -> Wakeup {
        self.ready = false;
        self.pending = Some(wake);
        Wakeup { after, wake }
    }

    /// Claim the gate for an attack by `seat`. Closes it until the attack
    /// is settled or released.
    pub fn admit(&mut self, seat: Seat) -> Result<(), GameError> {
        if self.active() != Some(seat) || !self.is_ready() {
            return Err(GameError::NotYourTurn);
        }
        self.ready = false;
        Ok(())
    }

    /// Reopen the gate after an admitted attack was rejected without
    /// resolving anything.
    pub fn release(&mut self, seat: Seat) {
        if self.active() == Some(seat) && self.pending.is_none() {
            self.ready = true;
        }
    }

    /// Apply the outcome of the attack admitted for `seat`.
    pub fn settle(&mut self, seat: Seat, outcome: AttackOutcome) -> Option<Wakeup> {
        if self.active() != Some(seat) {
            return None;
        }
        match outcome {
            AttackOutcome::Miss => Some(self.schedule(Wake::Changeover, self.changeover_delay)),
            AttackOutcome::Sunk {
                fleet_destroyed: true,
                ..
            } => {
                self.state = TurnState::GameOver { winner: seat };
                self.ready = false;
                self.pending = None;
                None
            }
            AttackOutcome::Hit | AttackOutcome::Sunk { .. } => self.open_turn(),
        }
    }

    /// Put `wake` back as the pending transition after its delivery failed.
    pub(crate) fn rearm(&mut self, wake: Wake) {
        if self.active().is_some() {
            self.ready = false;
            self.pending = Some(wake);
        }
    }

    /// Complete the pending delayed transition.
    ///
    /// For `Changeover` the turn passes to the other seat; for
    /// `ScriptedAttack` the gate reopens so the scripted seat can be
    /// admitted. Returns the next wakeup, if the new turn needs one.
    pub fn wake(&mut self, wake: Wake) -> Result<Option<Wakeup>, GameError> {
        if self.pending != Some(wake) {
            return Err(GameError::NoPendingTransition);
        }
        self.pending = None;
        match wake {
            Wake::Changeover => {
                if let TurnState::Awaiting(seat) = self.state {
                    self.state = TurnState::Awaiting(seat.other());
                }
                Ok(self.open_turn())
            }
            Wake::ScriptedAttack => {
                self.ready = true;
                Ok(None)
            }
        }
    }
}
