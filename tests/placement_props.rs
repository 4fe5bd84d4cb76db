use broadside::{arrange_fleet, Board, CellState, Coord, Fleet, FleetComposition, Orientation};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn chebyshev(a: Coord, b: Coord) -> usize {
    a.row.abs_diff(b.row).max(a.col.abs_diff(b.col))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every arranged fleet keeps a one-cell gap between ships and can be
    /// recovered from the board alone.
    #[test]
    fn arranged_fleet_respects_buffer(
        seed in any::<u64>(),
        size in 6usize..=12,
        lengths in prop::collection::vec(1usize..=4, 1..8),
    ) {
        let composition = FleetComposition::from_lengths(&lengths);
        let mut fleet = Fleet::new(&composition);
        let mut board = Board::water(size);
        let mut rng = SmallRng::seed_from_u64(seed);

        if arrange_fleet(&mut board, &mut fleet, &mut rng).is_err() {
            prop_assert_eq!(board.count(CellState::Water), size * size);
            prop_assert!(fleet.ships().iter().all(|s| !s.is_placed()));
            return Ok(());
        }

        prop_assert!(fleet.all_placed());
        let footprints: Vec<_> = fleet.ships().iter().filter_map(|s| s.footprint()).collect();
        for (i, a) in footprints.iter().enumerate() {
            prop_assert!(a.fits(size));
            for b in &footprints[i + 1..] {
                for ca in a.cells() {
                    for cb in b.cells() {
                        prop_assert!(chebyshev(ca, cb) > 1, "{:?} touches {:?}", a, b);
                    }
                }
            }
        }

        let mut run_lengths: Vec<usize> = board.ship_runs().iter().map(|r| r.length).collect();
        run_lengths.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(run_lengths, composition.lengths());
    }

    /// A preview never changes committed ships and clearing it restores the
    /// board exactly.
    #[test]
    fn preview_is_reversible(
        seed in any::<u64>(),
        length in 1usize..=4,
        row in 0usize..12,
        col in 0usize..12,
        vertical in any::<bool>(),
    ) {
        let mut fleet = Fleet::new(&FleetComposition::standard());
        let mut board = Board::water(10);
        let mut rng = SmallRng::seed_from_u64(seed);
        arrange_fleet(&mut board, &mut fleet, &mut rng).unwrap();
        let before = board.clone();

        let single = Fleet::new(&FleetComposition::from_lengths(&[length]));
        let orient = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let placement = board.check_placement(single.ship(0).unwrap(), Coord::new(row, col), orient);

        for (c, state) in before.iter() {
            if state.is_ship() {
                prop_assert_eq!(board.cell(c), Some(state));
            }
        }
        prop_assert!(placement.highlights.len() <= length);
        board.clear_highlights();
        prop_assert_eq!(board, before);
    }
}
