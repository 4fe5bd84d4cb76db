//! A single match between two seats, from fleet setup to the winner.
//!
//! All requests arrive as [`Command`] values and return a [`Report`] listing
//! what changed. Delays are never waited for here: a report may carry one
//! [`Wakeup`] that the host schedules and later hands back to
//! [`GameSession::wake`].

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use rand::rngs::SmallRng;

use crate::ai::{RandomStrategy, Strategy};
use crate::attack::resolve_attack;
use crate::board::{BoardSnapshot, Coord};
use crate::common::{AttackOutcome, GameError};
use crate::config::GameConfig;
use crate::placement::{self, Placement};
use crate::player::Player;
use crate::ship::Orientation;
use crate::turn::{PlayerKind, Seat, TurnController, TurnState, Wake, Wakeup};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    Playing,
    Finished,
}

/// Which of a seat's two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Own,
    Enemy,
}

/// Request submitted by the host on behalf of a human seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Highlight where a ship would go without committing it.
    PreviewShip {
        seat: Seat,
        ship: usize,
        anchor: Coord,
        orientation: Orientation,
    },
    /// Place or move a ship.
    PlaceShip {
        seat: Seat,
        ship: usize,
        anchor: Coord,
        orientation: Orientation,
    },
    /// Rotate a ship in place.
    ToggleOrientation { seat: Seat, ship: usize },
    /// Take a ship off the board.
    RemoveShip { seat: Seat, ship: usize },
    /// Drop any preview highlights.
    ClearPreview { seat: Seat },
    /// Arrange the whole fleet at random.
    RandomizeFleet { seat: Seat },
    /// Finish setup for this seat.
    ConfirmFleet { seat: Seat },
    /// Attack a cell of the opponent's board.
    Attack { seat: Seat, target: Coord },
}

/// Something that happened while handling a command or wakeup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Previewed {
        seat: Seat,
        ship: usize,
        placement: Placement,
    },
    ShipPlaced {
        seat: Seat,
        ship: usize,
        anchor: Coord,
        orientation: Orientation,
    },
    ShipUnplaced {
        seat: Seat,
        ship: usize,
    },
    PreviewCleared {
        seat: Seat,
    },
    FleetRandomized {
        seat: Seat,
    },
    FleetConfirmed {
        seat: Seat,
    },
    /// `seat` must now place its ships.
    SetupTurn {
        seat: Seat,
    },
    PlayStarted {
        first: Seat,
    },
    Attacked {
        attacker: Seat,
        target: Coord,
        outcome: AttackOutcome,
    },
    ShipSunk {
        owner: Seat,
        length: usize,
        afloat: usize,
    },
    TurnPassed {
        to: Seat,
    },
    GameOver {
        winner: Seat,
    },
}

/// Result of a command or wakeup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub events: Vec<Event>,
    /// Delayed transition the host must schedule, if any.
    pub wakeup: Option<Wakeup>,
}

impl Report {
    fn with(event: Event) -> Self {
        Self {
            events: alloc::vec![event],
            wakeup: None,
        }
    }

    /// Outcome of the last attack in this report.
    pub fn last_outcome(&self) -> Option<AttackOutcome> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Attacked { outcome, .. } => Some(*outcome),
            _ => None,
        })
    }
}

pub struct GameSession {
    config: GameConfig,
    players: [Player; 2],
    confirmed: [bool; 2],
    phase: Phase,
    setup_seat: Seat,
    turns: TurnController,
    strategy: Box<dyn Strategy>,
    rng: SmallRng,
    status: String,
}

impl GameSession {
    /// Create a session for two named seats.
    ///
    /// Scripted seats arrange their fleets immediately. The returned report
    /// announces the first human seat that must place ships, or the start of
    /// play when no seat is human.
    pub fn new(
        config: GameConfig,
        seats: [(&str, PlayerKind); 2],
        rng: SmallRng,
    ) -> Result<(Self, Report), GameError> {
        let strategy = RandomStrategy::new(config.target_attempts);
        Self::with_strategy(config, seats, rng, Box::new(strategy))
    }

    /// Like [`GameSession::new`] with a custom strategy for scripted seats.
    pub fn with_strategy(
        config: GameConfig,
        seats: [(&str, PlayerKind); 2],
        rng: SmallRng,
        strategy: Box<dyn Strategy>,
    ) -> Result<(Self, Report), GameError> {
        config.validate()?;
        let [(name1, kind1), (name2, kind2)] = seats;
        let players = [
            Player::new(name1, kind1, &config),
            Player::new(name2, kind2, &config),
        ];
        let turns = TurnController::new(
            config.first_seat,
            [kind1, kind2],
            config.changeover_delay(),
            config.scripted_attack_delay(),
        );
        let mut session = Self {
            config,
            players,
            confirmed: [false; 2],
            phase: Phase::Setup,
            setup_seat: Seat::First,
            turns,
            strategy,
            rng,
            status: String::new(),
        };
        let mut report = Report::default();
        session.advance_setup(&mut report)?;
        Ok((session, report))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Seat currently placing ships, while in setup.
    pub fn setup_seat(&self) -> Option<Seat> {
        (self.phase == Phase::Setup).then_some(self.setup_seat)
    }

    pub fn turn_state(&self) -> TurnState {
        self.turns.state()
    }

    /// Seat whose turn it is during play.
    pub fn active_seat(&self) -> Option<Seat> {
        match self.phase {
            Phase::Playing => self.turns.active(),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Seat> {
        self.turns.winner()
    }

    /// `true` while the active seat may submit an attack.
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Playing && self.turns.is_ready()
    }

    /// Human-readable status line, e.g. "Alice plays".
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn snapshot(&self, seat: Seat, grid: Grid) -> BoardSnapshot {
        let player = self.player(seat);
        match grid {
            Grid::Own => player.own_grid().snapshot(),
            Grid::Enemy => player.enemy_grid().snapshot(),
        }
    }

    /// Ships of `seat` still afloat.
    pub fn afloat(&self, seat: Seat) -> usize {
        self.player(seat).fleet().afloat_count()
    }

    pub fn remaining_lengths(&self, seat: Seat) -> Vec<usize> {
        self.player(seat).fleet().remaining_lengths()
    }

    /// Dispatch a command.
    pub fn submit(&mut self, command: Command) -> Result<Report, GameError> {
        match command {
            Command::PreviewShip {
                seat,
                ship,
                anchor,
                orientation,
            } => self.preview_ship(seat, ship, anchor, orientation),
            Command::PlaceShip {
                seat,
                ship,
                anchor,
                orientation,
            } => self.place_ship(seat, ship, anchor, orientation),
            Command::ToggleOrientation { seat, ship } => self.toggle_orientation(seat, ship),
            Command::RemoveShip { seat, ship } => self.remove_ship(seat, ship),
            Command::ClearPreview { seat } => self.clear_preview(seat),
            Command::RandomizeFleet { seat } => self.randomize_fleet(seat),
            Command::ConfirmFleet { seat } => self.confirm_fleet(seat),
            Command::Attack { seat, target } => self.attack(seat, target),
        }
    }

    fn setup_player(&mut self, seat: Seat) -> Result<&mut Player, GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::WrongPhase);
        }
        if self.setup_seat != seat {
            return Err(GameError::NotYourTurn);
        }
        Ok(&mut self.players[seat.index()])
    }

    /// Preview a placement. A ship that is already on the board is lifted
    /// off it first, as when it is picked up to be moved.
    pub fn preview_ship(
        &mut self,
        seat: Seat,
        ship: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<Report, GameError> {
        let (board, fleet) = self.setup_player(seat)?.setup_parts();
        let mut report = Report::default();
        let moving = fleet.ship_mut(ship)?;
        if moving.is_placed() {
            board.remove_ship(moving);
            report.events.push(Event::ShipUnplaced { seat, ship });
        }
        let placement = board.check_placement(moving, anchor, orientation);
        report.events.push(Event::Previewed {
            seat,
            ship,
            placement,
        });
        Ok(report)
    }

    /// Place a ship, moving it if it is already on the board. A rejected
    /// move leaves the ship where it was.
    pub fn place_ship(
        &mut self,
        seat: Seat,
        ship: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<Report, GameError> {
        let (board, fleet) = self.setup_player(seat)?.setup_parts();
        if let Err(e) = board.place_ship(fleet, ship, anchor, orientation) {
            log::debug!("{:?} ship {} rejected at ({}, {})", seat, ship, anchor.row, anchor.col);
            return Err(e);
        }
        log::debug!(
            "{:?} ship {} placed at ({}, {}) {:?}",
            seat,
            ship,
            anchor.row,
            anchor.col,
            orientation
        );
        Ok(Report::with(Event::ShipPlaced {
            seat,
            ship,
            anchor,
            orientation,
        }))
    }

    /// Rotate a ship. A placed ship stays at its anchor if it still fits
    /// there, otherwise it goes back to the unplaced pool.
    pub fn toggle_orientation(&mut self, seat: Seat, ship: usize) -> Result<Report, GameError> {
        let (board, fleet) = self.setup_player(seat)?.setup_parts();
        let turning = fleet.ship_mut(ship)?;
        let orientation = turning.orientation().toggled();
        let Some(anchor) = turning.anchor() else {
            turning.set_orientation(orientation);
            return Ok(Report::default());
        };

        board.remove_ship(turning);
        turning.set_orientation(orientation);
        let placement = board.check_placement(turning, anchor, orientation);
        board.clear_highlights();
        if placement.accepted {
            board.place(turning, anchor, orientation);
            Ok(Report::with(Event::ShipPlaced {
                seat,
                ship,
                anchor,
                orientation,
            }))
        } else {
            Ok(Report::with(Event::ShipUnplaced { seat, ship }))
        }
    }

    pub fn remove_ship(&mut self, seat: Seat, ship: usize) -> Result<Report, GameError> {
        let (board, fleet) = self.setup_player(seat)?.setup_parts();
        let lifted = fleet.ship_mut(ship)?;
        if !lifted.is_placed() {
            return Ok(Report::default());
        }
        board.remove_ship(lifted);
        Ok(Report::with(Event::ShipUnplaced { seat, ship }))
    }

    pub fn clear_preview(&mut self, seat: Seat) -> Result<Report, GameError> {
        let (board, _) = self.setup_player(seat)?.setup_parts();
        board.clear_highlights();
        Ok(Report::with(Event::PreviewCleared { seat }))
    }

    pub fn randomize_fleet(&mut self, seat: Seat) -> Result<Report, GameError> {
        self.setup_player(seat)?;
        let (board, fleet) = self.players[seat.index()].setup_parts();
        placement::arrange_fleet(board, fleet, &mut self.rng)?;
        Ok(Report::with(Event::FleetRandomized { seat }))
    }

    /// Finish setup for `seat`. Every ship must be placed.
    pub fn confirm_fleet(&mut self, seat: Seat) -> Result<Report, GameError> {
        let player = self.setup_player(seat)?;
        if !player.fleet().all_placed() {
            return Err(GameError::SetupIncomplete);
        }
        player.setup_parts().0.clear_highlights();
        self.confirmed[seat.index()] = true;
        log::info!("{} confirmed fleet", self.players[seat.index()].name());

        let mut report = Report::with(Event::FleetConfirmed { seat });
        self.advance_setup(&mut report)?;
        Ok(report)
    }

    /// Hand setup to the next unconfirmed seat, arranging scripted fleets on
    /// the way, or start play once every fleet is confirmed.
    fn advance_setup(&mut self, report: &mut Report) -> Result<(), GameError> {
        for seat in Seat::BOTH {
            let i = seat.index();
            if self.confirmed[i] {
                continue;
            }
            if self.players[i].is_human() {
                self.setup_seat = seat;
                self.status = format!("{} place ships", self.players[i].name());
                report.events.push(Event::SetupTurn { seat });
                return Ok(());
            }
            let (board, fleet) = self.players[i].setup_parts();
            self.strategy.arrange_fleet(&mut self.rng, board, fleet)?;
            self.confirmed[i] = true;
            report.events.push(Event::FleetConfirmed { seat });
        }
        self.start_play(report);
        Ok(())
    }

    fn start_play(&mut self, report: &mut Report) {
        self.phase = Phase::Playing;
        report.wakeup = self.turns.start();
        let first = self.config.first_seat;
        self.status = format!("{} plays", self.player(first).name());
        log::info!("play started, {} first", self.player(first).name());
        report.events.push(Event::PlayStarted { first });
    }

    /// Attack from a human seat.
    pub fn attack(&mut self, seat: Seat, target: Coord) -> Result<Report, GameError> {
        match self.phase {
            Phase::Setup => return Err(GameError::WrongPhase),
            Phase::Finished => return Err(GameError::NotYourTurn),
            Phase::Playing => {}
        }
        if !self.player(seat).is_human() {
            return Err(GameError::NotYourTurn);
        }
        self.fire(seat, target)
    }

    fn fire(&mut self, seat: Seat, target: Coord) -> Result<Report, GameError> {
        self.turns.admit(seat)?;

        let [first, second] = &mut self.players;
        let (attacker, defender) = match seat {
            Seat::First => (first, second),
            Seat::Second => (second, first),
        };
        let (truth, fleet) = defender.defence_parts();
        let outcome = match resolve_attack(attacker.enemy_grid_mut(), truth, fleet, target) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.turns.release(seat);
                return Err(e);
            }
        };
        let name = String::from(attacker.name());
        let afloat = defender.fleet().afloat_count();
        log::debug!("{} attacks ({}, {}): {:?}", name, target.row, target.col, outcome);

        let mut report = Report::with(Event::Attacked {
            attacker: seat,
            target,
            outcome,
        });
        if let AttackOutcome::Sunk { length, .. } = outcome {
            log::info!("{} sank a ship of length {}, {} left", name, length, afloat);
            report.events.push(Event::ShipSunk {
                owner: seat.other(),
                length,
                afloat,
            });
        }

        report.wakeup = self.turns.settle(seat, outcome);
        self.status = match outcome {
            AttackOutcome::Miss => format!("{} missed", name),
            _ if outcome.is_game_over() => {
                self.phase = Phase::Finished;
                log::info!("{} won", name);
                report.events.push(Event::GameOver { winner: seat });
                format!("{} won", name)
            }
            _ => format!("{} plays", name),
        };
        Ok(report)
    }

    /// Deliver a wakeup scheduled by an earlier report.
    ///
    /// A scripted attack that fails leaves its wakeup pending, so the host
    /// may deliver it again.
    pub fn wake(&mut self, wake: Wake) -> Result<Report, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::WrongPhase);
        }
        match wake {
            Wake::Changeover => {
                let next = self.turns.wake(wake)?;
                let to = self.turns.active().ok_or(GameError::WrongPhase)?;
                self.status = format!("{} plays", self.player(to).name());
                Ok(Report {
                    events: alloc::vec![Event::TurnPassed { to }],
                    wakeup: next,
                })
            }
            Wake::ScriptedAttack => {
                if self.turns.pending() != Some(wake) {
                    return Err(GameError::NoPendingTransition);
                }
                let seat = self.turns.active().ok_or(GameError::WrongPhase)?;
                let target = self
                    .strategy
                    .choose_target(&mut self.rng, self.players[seat.index()].enemy_grid())
                    .ok_or(GameError::NoTargetAvailable)?;
                self.turns.wake(wake)?;
                self.fire(seat, target).inspect_err(|e| {
                    log::warn!("scripted attack by {:?} failed: {}", seat, e);
                    self.turns.rearm(wake);
                })
            }
        }
    }
}
