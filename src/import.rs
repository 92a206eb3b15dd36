//! Import of externally supplied solution grids.
//!
//! An imported file claims to hold a finished solution, not a puzzle, so
//! every parsed field is locked. Validation happens in two distinct stages:
//! structural (all digits 1-9, all fields locked) and semantic (row, column
//! and box uniqueness via `is_solved`). A candidate that passes the first
//! stage can still fail the second.

use std::{fs, io, path::Path};

use log::debug;
use thiserror::Error;

use crate::grid::{Cell, Grid, SIZE};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("the file does not exist or cannot be read")]
    FileInaccessible(#[source] io::Error),
    #[error("the file must contain nine rows of nine comma-separated digits from 1 to 9")]
    NumbersInvalid,
    #[error("the grid is not a valid solution; every row, column and 3x3 box must hold each digit exactly once")]
    NotASolution,
}

/// Best-effort parse of a claimed solution: nine lines of nine
/// comma-separated integers. Missing, malformed or out-of-range entries
/// become 0 and are caught by [`validate_candidate`]. All 81 fields come
/// out locked unconditionally.
pub fn parse_candidate(text: &str) -> Grid {
    let mut grid = Grid::empty();
    for row in &mut grid.cells {
        row.fill(Cell { value: 0, locked: true });
    }
    for (r, line) in text.lines().take(SIZE).enumerate() {
        for (c, token) in line.split(',').take(SIZE).enumerate() {
            grid.cells[r][c].value = match token.trim().parse::<u8>() {
                Ok(v) if v <= 9 => v,
                _ => 0,
            };
        }
    }
    grid
}

/// Structural validation only: every value in 1..=9 and every field locked.
/// Run `is_solved` on top before trusting the grid as a solution.
pub fn validate_candidate(grid: &Grid) -> Result<(), ImportError> {
    for row in &grid.cells {
        for cell in row {
            if !(1..=9).contains(&cell.value) || !cell.locked {
                return Err(ImportError::NumbersInvalid);
            }
        }
    }
    Ok(())
}

/// Reads, parses and fully validates a claimed solution file.
pub fn import_solution(path: impl AsRef<Path>) -> Result<Grid, ImportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(ImportError::FileInaccessible)?;
    let grid = parse_candidate(&text);
    validate_candidate(&grid)?;
    if !grid.is_solved() {
        return Err(ImportError::NotASolution);
    }
    debug!("imported solution from {}", path.display());
    Ok(grid)
}
