use broadside::render::{
    column_label, coord_label, glyph, parse_coord, render_board, render_pair,
};
use broadside::{Board, CellState, Coord};

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("A1", 10), Ok(Coord::new(0, 0)));
    assert_eq!(parse_coord(" j10 ", 10), Ok(Coord::new(9, 9)));
    assert_eq!(parse_coord("C4", 10), Ok(Coord::new(3, 2)));
    assert!(parse_coord("K1", 10).is_err());
    assert!(parse_coord("A0", 10).is_err());
    assert!(parse_coord("A11", 10).is_err());
    assert!(parse_coord("5A", 10).is_err());
    assert!(parse_coord("", 10).is_err());
}

#[test]
fn test_coord_label_round_trips() {
    let c = Coord::new(6, 1);
    assert_eq!(coord_label(c), "B7");
    assert_eq!(parse_coord(&coord_label(c), 10), Ok(c));
}

#[test]
fn test_render_board_lines() {
    let mut board = Board::unknown(4);
    board.set(Coord::new(0, 0), CellState::Hit).unwrap();
    board.set(Coord::new(3, 3), CellState::Water).unwrap();
    let text = render_board(&board.snapshot());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains('A') && lines[0].contains('D'));
    assert!(lines[1].contains('X'));
    assert!(lines[4].ends_with('~'));
    assert_eq!(text, board.snapshot().to_string());
}

#[test]
fn test_render_pair_has_both_titles() {
    let own = Board::water(3).snapshot();
    let enemy = Board::unknown(3).snapshot();
    let text = render_pair("Mine", &own, "Theirs", &enemy);
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("Mine"));
    assert!(first.contains("Theirs"));
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn test_glyphs_are_distinct_per_kind() {
    assert_eq!(glyph(CellState::ShipHorizontal), glyph(CellState::ShipVertical));
    assert_ne!(glyph(CellState::Hit), glyph(CellState::Water));
    assert_ne!(glyph(CellState::Ready), glyph(CellState::Blocked));
}

#[test]
fn test_wide_boards_use_letter_pairs() {
    assert_eq!(column_label(25), "Z");
    assert_eq!(column_label(26), "AA");
    assert_eq!(column_label(27), "AB");
    assert_eq!(column_label(701), "ZZ");

    let c = Coord::new(0, 26);
    assert_eq!(coord_label(c), "AA1");
    assert_eq!(parse_coord(&coord_label(c), 30), Ok(c));
    assert_eq!(parse_coord("ab3", 30), Ok(Coord::new(2, 27)));
    for col in [0, 25, 26, 51, 52, 701] {
        let c = Coord::new(701, col);
        assert_eq!(parse_coord(&coord_label(c), 702), Ok(c));
    }
}

#[test]
fn test_wide_columns_off_the_board() {
    assert!(parse_coord("AA1", 26).is_err());
    assert!(parse_coord("ZZZZZZZZZZZZZZZZZZZZZZ1", 702).is_err());
    assert!(parse_coord("A", 10).is_err());
}

#[test]
fn test_large_board_rows_stay_aligned() {
    for size in [30, 100] {
        let text = render_board(&Board::unknown(size).snapshot());
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), size + 1);
        assert!(widths.iter().all(|w| *w == widths[0]), "size {}", size);
    }
    let header = render_board(&Board::unknown(30).snapshot());
    assert!(header.lines().next().unwrap().trim_end().ends_with("AD"));
}
