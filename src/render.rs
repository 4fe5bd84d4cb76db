//! Text rendering of board snapshots and the A1-style coordinate notation.
//!
//! Rendering only ever reads a [`BoardSnapshot`]; nothing here can change
//! game state.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::board::{BoardSnapshot, CellState, Coord};

/// Single-character glyph for a cell.
pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Unknown => '.',
        CellState::Water => '~',
        CellState::ShipHorizontal | CellState::ShipVertical => 'S',
        CellState::Ready => '+',
        CellState::Blocked => '!',
        CellState::Hit => 'X',
    }
}

pub const LEGEND: &str = "Legend: S=Ship  X=Hit  ~=Water  .=Unknown  +=Fits  !=Blocked";

/// Column label in spreadsheet style: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// `A1`-style label for a coordinate (column letters, 1-based row).
pub fn coord_label(coord: Coord) -> String {
    format!("{}{}", column_label(coord.col), coord.row + 1)
}

/// Parse `A1`-style input on a board of `size`.
pub fn parse_coord(input: &str, size: usize) -> Result<Coord, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, row_str) = input.split_at(split);
    if letters.is_empty() {
        return Err("need a column letter and a row number (e.g. A5)".to_string());
    }
    let col = letters
        .bytes()
        .try_fold(0usize, |acc, b| {
            let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
        .filter(|&col| col < size)
        .ok_or_else(|| format!("column '{}' is off the board", letters))?;
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("invalid row '{}'", row_str))?;
    if row == 0 || row > size {
        return Err(format!("row {} is off the board", row));
    }
    Ok(Coord::new(row - 1, col))
}

/// Width of the row-number gutter and of one cell column.
fn widths(size: usize) -> (usize, usize) {
    let row = size.to_string().len().max(2);
    let cell = column_label(size.saturating_sub(1)).len() + 1;
    (row, cell.max(2))
}

fn write_header(out: &mut impl Write, size: usize) -> fmt::Result {
    let (row_w, cell_w) = widths(size);
    write!(out, "{:pad$}", "", pad = row_w + 2)?;
    for c in 0..size {
        write!(out, "{:>w$}", column_label(c), w = cell_w)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, snapshot: &BoardSnapshot, row: usize) -> fmt::Result {
    let (row_w, cell_w) = widths(snapshot.size);
    write!(out, " {:>w$} ", row + 1, w = row_w)?;
    for state in &snapshot.cells[row] {
        write!(out, "{:>w$}", glyph(*state), w = cell_w)?;
    }
    Ok(())
}

/// Labelled grid, one line per row.
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let mut out = String::new();
    let _ = write_board(&mut out, snapshot);
    out
}

fn write_board(out: &mut impl Write, snapshot: &BoardSnapshot) -> fmt::Result {
    write_header(out, snapshot.size)?;
    writeln!(out)?;
    for r in 0..snapshot.cells.len() {
        write_row(out, snapshot, r)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Two grids next to each other with titles, e.g. own fleet and enemy view.
pub fn render_pair(
    left_title: &str,
    left: &BoardSnapshot,
    right_title: &str,
    right: &BoardSnapshot,
) -> String {
    let mut out = String::new();
    let _ = write_pair(&mut out, left_title, left, right_title, right);
    out
}

fn write_pair(
    out: &mut impl Write,
    left_title: &str,
    left: &BoardSnapshot,
    right_title: &str,
    right: &BoardSnapshot,
) -> fmt::Result {
    let (row_w, cell_w) = widths(left.size);
    let width = row_w + 2 + cell_w * left.size;
    writeln!(out, "{:<width$}     {}", left_title, right_title, width = width)?;
    write_header(out, left.size)?;
    write!(out, "     ")?;
    write_header(out, right.size)?;
    writeln!(out)?;
    for r in 0..left.cells.len().max(right.cells.len()) {
        if r < left.cells.len() {
            write_row(out, left, r)?;
        } else {
            write!(out, "{:width$}", "", width = width)?;
        }
        write!(out, "     ")?;
        if r < right.cells.len() {
            write_row(out, right, r)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(f, self)
    }
}
