use broadside::{
    arrange_fleet, resolve_attack, AttackOutcome, Board, CellState, Coord, Fleet,
    FleetComposition, Footprint, GameError, Orientation,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Sink a lone ship at every legal position on a small board and check
/// exactly its clipped surroundings become known.
#[test]
fn sink_reveals_clipped_surroundings_everywhere() {
    let size = 6;
    for length in 1..=4 {
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            for anchor in Board::water(size).iter().map(|(c, _)| c) {
                let fp = Footprint::new(anchor, orient, length);
                if !fp.fits(size) {
                    continue;
                }
                let mut fleet = Fleet::new(&FleetComposition::from_lengths(&[length]));
                let mut truth = Board::water(size);
                truth.place_ship(&mut fleet, 0, anchor, orient).unwrap();
                let mut knowledge = Board::unknown(size);

                let cells: Vec<Coord> = fp.cells().collect();
                for (i, c) in cells.iter().enumerate() {
                    let outcome = resolve_attack(&mut knowledge, &truth, &mut fleet, *c).unwrap();
                    if i + 1 < cells.len() {
                        assert_eq!(outcome, AttackOutcome::Hit);
                    } else {
                        assert_eq!(
                            outcome,
                            AttackOutcome::Sunk {
                                length,
                                fleet_destroyed: true
                            }
                        );
                    }
                }

                let around: Vec<Coord> = fp.surroundings(size).collect();
                for (c, state) in knowledge.iter() {
                    let expected = if fp.contains(c) {
                        CellState::Hit
                    } else if around.contains(&c) {
                        CellState::Water
                    } else {
                        CellState::Unknown
                    };
                    assert_eq!(state, expected, "{:?} at {:?}", fp, c);
                }
            }
        }
    }
}

/// Hitting a ship's cells in reverse order also ends in a sink.
#[test]
fn sink_detected_from_either_end() {
    let mut fleet = Fleet::new(&FleetComposition::from_lengths(&[4]));
    let mut truth = Board::water(10);
    truth
        .place_ship(&mut fleet, 0, Coord::new(3, 2), Orientation::Vertical)
        .unwrap();
    let mut knowledge = Board::unknown(10);
    let order = [5, 3, 6, 4];
    let outcomes: Vec<AttackOutcome> = order
        .iter()
        .map(|&r| resolve_attack(&mut knowledge, &truth, &mut fleet, Coord::new(r, 2)).unwrap())
        .collect();
    assert_eq!(&outcomes[..3], &[AttackOutcome::Hit; 3]);
    assert!(outcomes[3].is_game_over());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Attacking every cell in random order sinks each ship exactly once,
    /// hits exactly the fleet's cells and never marks a ship cell as water.
    #[test]
    fn full_bombardment_laws(seed in any::<u64>()) {
        let composition = FleetComposition::standard();
        let mut fleet = Fleet::new(&composition);
        let mut truth = Board::water(10);
        let mut rng = SmallRng::seed_from_u64(seed);
        arrange_fleet(&mut truth, &mut fleet, &mut rng).unwrap();

        let mut targets: Vec<Coord> = truth.iter().map(|(c, _)| c).collect();
        targets.shuffle(&mut rng);

        let mut knowledge = Board::unknown(10);
        let mut sunk_lengths = Vec::new();
        let mut game_over_at = None;
        for (i, target) in targets.into_iter().enumerate() {
            match resolve_attack(&mut knowledge, &truth, &mut fleet, target) {
                Ok(AttackOutcome::Sunk { length, fleet_destroyed }) => {
                    sunk_lengths.push(length);
                    if fleet_destroyed {
                        prop_assert!(game_over_at.is_none());
                        game_over_at = Some(i);
                    }
                }
                Ok(_) => {}
                Err(e) => prop_assert_eq!(e, GameError::AlreadyResolved),
            }
        }

        prop_assert!(game_over_at.is_some());
        prop_assert!(fleet.is_destroyed());
        prop_assert_eq!(knowledge.count(CellState::Hit), composition.total_cells());
        sunk_lengths.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(sunk_lengths, composition.lengths());
        prop_assert_eq!(knowledge.count(CellState::Unknown), 0);
        for (c, state) in knowledge.iter() {
            let is_ship = truth.cell(c).map_or(false, |s| s.is_ship());
            prop_assert_eq!(state == CellState::Hit, is_ship);
        }
    }

    /// A rejected repeat attack changes neither board nor fleet.
    #[test]
    fn repeat_attack_is_idempotent(seed in any::<u64>(), picks in 1usize..40) {
        let mut fleet = Fleet::new(&FleetComposition::standard());
        let mut truth = Board::water(10);
        let mut rng = SmallRng::seed_from_u64(seed);
        arrange_fleet(&mut truth, &mut fleet, &mut rng).unwrap();

        let mut knowledge = Board::unknown(10);
        let mut targets: Vec<Coord> = truth.iter().map(|(c, _)| c).collect();
        targets.shuffle(&mut rng);
        for target in targets.iter().take(picks) {
            let _ = resolve_attack(&mut knowledge, &truth, &mut fleet, *target);
        }

        let known: Vec<Coord> = knowledge
            .iter()
            .filter(|(_, s)| *s != CellState::Unknown)
            .map(|(c, _)| c)
            .collect();
        let board_before = knowledge.clone();
        let fleet_before = fleet.clone();
        for c in known {
            prop_assert_eq!(
                resolve_attack(&mut knowledge, &truth, &mut fleet, c),
                Err(GameError::AlreadyResolved)
            );
        }
        prop_assert_eq!(knowledge, board_before);
        prop_assert_eq!(fleet, fleet_before);
    }
}
