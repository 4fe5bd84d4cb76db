use broadside::{
    level_from, FleetComposition, GameConfig, GameError, GameSession, PlayerKind, Seat,
    BOARD_SIZE, FLEET_COUNTS, MAX_BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use log::LevelFilter;

#[test]
fn test_default_config_matches_classic_game() {
    let config = GameConfig::default();
    assert_eq!(config.board_size, BOARD_SIZE);
    assert_eq!(config.fleet.counts(), &FLEET_COUNTS);
    assert_eq!(config.fleet.lengths(), vec![4, 3, 3, 2, 2, 2, 1, 1, 1, 1]);
    assert_eq!(config.fleet.total_cells(), 20);
    assert_eq!(config.changeover_delay().as_millis(), 1000);
    assert!(config.validate().is_ok());
    assert_eq!(config.without_delays().scripted_attack_delay_ms, 0);
}

#[test]
fn test_validate_rejects_bad_values() {
    let zero = GameConfig {
        board_size: 0,
        ..GameConfig::default()
    };
    assert!(matches!(zero.validate(), Err(GameError::InvalidConfig(_))));

    let empty = GameConfig {
        fleet: FleetComposition::new(vec![0, 0]),
        ..GameConfig::default()
    };
    assert!(matches!(empty.validate(), Err(GameError::InvalidConfig(_))));

    let long = GameConfig {
        board_size: 4,
        fleet: FleetComposition::from_lengths(&[5]),
        ..GameConfig::default()
    };
    assert!(matches!(long.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn test_partial_json_config_uses_defaults() {
    let config: GameConfig =
        serde_json::from_str(r#"{"board_size": 8, "first_seat": "Second"}"#).unwrap();
    assert_eq!(config.board_size, 8);
    assert_eq!(config.first_seat, Seat::Second);
    assert_eq!(config.fleet, FleetComposition::standard());
}

#[test]
fn test_fleet_serializes_as_count_table() {
    let json = serde_json::to_value(GameConfig::default()).unwrap();
    assert_eq!(json["fleet"], serde_json::json!([0, 4, 3, 2, 1]));
    let back: GameConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, GameConfig::default());
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
    assert_eq!(level_from(Some("OFF")), LevelFilter::Off);
    assert_eq!(level_from(Some("bogus")), LevelFilter::Info);
    assert_eq!(level_from(None), LevelFilter::Info);
    broadside::init_logging();
    broadside::init_logging();
}

#[test]
fn test_error_messages() {
    assert_eq!(
        GameError::OutOfBounds { row: 1, col: 12 }.to_string(),
        "Coordinate (1, 12) is outside the grid"
    );
    assert_eq!(GameError::UnknownShip(3).to_string(), "No ship with index 3");
}

#[test]
fn test_oversized_board_is_rejected() {
    let largest = GameConfig {
        board_size: MAX_BOARD_SIZE,
        ..GameConfig::default()
    };
    assert!(largest.validate().is_ok());

    for board_size in [MAX_BOARD_SIZE + 1, 1 << 20, usize::MAX] {
        let config = GameConfig {
            board_size,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
        let result = GameSession::new(
            config,
            [("Alice", PlayerKind::Human), ("Bob", PlayerKind::Scripted)],
            SmallRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }
}
