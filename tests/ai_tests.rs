use broadside::{
    choose_target, Board, CellState, Coord, GameConfig, GameSession, Phase, PlayerKind,
    RandomStrategy, Seat, Strategy,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_fallback_scan_finds_last_unknown() {
    let mut board = Board::new(10, CellState::Water);
    board.set(Coord::new(9, 8), CellState::Unknown).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(choose_target(&mut rng, &board, 0), Some(Coord::new(9, 8)));
    assert_eq!(choose_target(&mut rng, &board, 50), Some(Coord::new(9, 8)));
}

#[test]
fn test_no_target_on_resolved_board() {
    let board = Board::new(10, CellState::Water);
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(choose_target(&mut rng, &board, 50), None);
    assert_eq!(RandomStrategy::default().choose_target(&mut rng, &board), None);
}

#[test]
fn test_ai_vs_ai_game() {
    let config = GameConfig::default().without_delays();
    let rng = SmallRng::seed_from_u64(123);
    let (mut session, mut report) = GameSession::new(
        config,
        [("North", PlayerKind::Scripted), ("South", PlayerKind::Scripted)],
        rng,
    )
    .unwrap();
    assert_eq!(session.phase(), Phase::Playing);

    let mut steps = 0;
    while let Some(wakeup) = report.wakeup {
        report = session.wake(wakeup.wake).unwrap();
        steps += 1;
        assert!(steps < 1000, "game did not finish");
    }

    assert_eq!(session.phase(), Phase::Finished);
    let winner = session.winner().unwrap();
    assert_eq!(session.afloat(winner.other()), 0);
    assert!(session.afloat(winner) > 0);
    assert_eq!(session.status(), format!("{} won", session.player(winner).name()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The target is always unknown, and `None` only when nothing is.
    #[test]
    fn target_is_unknown(
        seed in any::<u64>(),
        revealed in prop::collection::vec(any::<bool>(), 64),
        attempts in 0usize..60,
    ) {
        let mut board = Board::unknown(8);
        for (i, known) in revealed.iter().enumerate() {
            if *known {
                board.set(Coord::new(i / 8, i % 8), CellState::Water).unwrap();
            }
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        match choose_target(&mut rng, &board, attempts) {
            Some(c) => prop_assert_eq!(board.cell(c), Some(CellState::Unknown)),
            None => prop_assert_eq!(board.count(CellState::Unknown), 0),
        }
    }
}

#[test]
fn test_seat_order_matches_config() {
    let config = GameConfig {
        first_seat: Seat::Second,
        ..GameConfig::default().without_delays()
    };
    let (session, report) = GameSession::new(
        config,
        [("North", PlayerKind::Scripted), ("South", PlayerKind::Scripted)],
        SmallRng::seed_from_u64(9),
    )
    .unwrap();
    assert_eq!(session.active_seat(), Some(Seat::Second));
    assert_eq!(session.status(), "South plays");
    assert!(report.wakeup.is_some());
}
