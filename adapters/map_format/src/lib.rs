#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text map loader and snapshot writer.
//!
//! A map starts with a header line `N M` followed by rows of
//! whitespace-separated `H`, `Z` and `.` tokens (case-insensitive). `M` must be
//! an integer but is otherwise ignored. Snapshots are written as `N` lines of
//! `N` uppercase tokens separated by single spaces.

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use outbreak_core::{CellState, Grid, GridError};
use thiserror::Error;

/// Errors raised while reading or writing map files.
#[derive(Debug, Error)]
pub enum MapFormatError {
    /// The file could not be read or written.
    #[error("could not access map file '{}'", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The input contained no header line.
    #[error("map is missing the 'N M' header line")]
    MissingHeader,
    /// The header line did not hold two integers.
    #[error("could not parse map header '{0}'")]
    InvalidHeader(String),
    /// The header declared a zero-sized grid.
    #[error("map side length must be at least 1")]
    ZeroSide,
    /// A cell token was not one of `H`, `Z` or `.`.
    #[error("unknown cell token '{token}' on line {line}")]
    UnknownToken {
        /// One-based line number holding the token.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// The rows did not hold exactly `N * N` cells.
    #[error("expected {expected} cells, found {found}")]
    CellCount {
        /// Number of cells a square grid of the declared side holds.
        expected: usize,
        /// Number of cells present in the rows that were read.
        found: usize,
    },
    /// The parsed cells could not form a grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parses a map from its textual representation.
pub fn parse_map(input: &str) -> Result<Grid, MapFormatError> {
    let mut lines = input.lines();
    let header = lines.next().ok_or(MapFormatError::MissingHeader)?;
    let side = parse_header(header)?;

    let mut cells = Vec::new();
    for (offset, line) in lines.take(side).enumerate() {
        for token in line.split_whitespace() {
            let cell =
                CellState::from_token(token).map_err(|_| MapFormatError::UnknownToken {
                    line: offset + 2,
                    token: token.to_owned(),
                })?;
            cells.push(cell);
        }
    }

    let expected = side.checked_mul(side).ok_or(GridError::SideTooLarge(side))?;
    if cells.len() != expected {
        return Err(MapFormatError::CellCount {
            expected,
            found: cells.len(),
        });
    }

    Ok(Grid::from_cells(side, cells)?)
}

fn parse_header(header: &str) -> Result<usize, MapFormatError> {
    let invalid = || MapFormatError::InvalidHeader(header.trim().to_owned());

    let mut fields = header.split_whitespace();
    let side = fields
        .next()
        .and_then(|field| field.parse::<usize>().ok())
        .ok_or_else(invalid)?;
    let _declared = fields
        .next()
        .and_then(|field| field.parse::<i64>().ok())
        .ok_or_else(invalid)?;

    if side == 0 {
        return Err(MapFormatError::ZeroSide);
    }
    Ok(side)
}

/// Reads and parses the map stored at `path`.
pub fn read_map(path: &Path) -> Result<Grid, MapFormatError> {
    let contents = fs::read_to_string(path).map_err(|source| MapFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&contents)
}

/// Renders the grid rows as a snapshot without a header.
#[must_use]
pub fn format_grid(grid: &Grid) -> String {
    let side = grid.side();
    let mut out = String::with_capacity(side * side * 2);
    for row in grid.rows() {
        for (column, cell) in row.iter().enumerate() {
            out.push(cell.symbol());
            if column + 1 < side {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the grid as a loadable map, prefixed with an `N N` header.
#[must_use]
pub fn format_map(grid: &Grid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{side} {side}", side = grid.side());
    out.push_str(&format_grid(grid));
    out
}

/// Writes the final-grid snapshot to `path`.
pub fn write_snapshot(grid: &Grid, path: &Path) -> Result<(), MapFormatError> {
    write_text(path, &format_grid(grid))
}

/// Writes the grid as a loadable map to `path`.
pub fn write_map(grid: &Grid, path: &Path) -> Result<(), MapFormatError> {
    write_text(path, &format_map(grid))
}

fn write_text(path: &Path, contents: &str) -> Result<(), MapFormatError> {
    fs::write(path, contents).map_err(|source| MapFormatError::Io {
        path: path.to_path_buf(),
        source,
    })
}
