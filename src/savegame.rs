//! The in-memory game state and its fixed-width slot file format.
//!
//! Slot grammar: `(4 digits){81}\n(digits)*`. Per field, in row-major
//! order: the solved value, the working value, the solved lock flag and the
//! working lock flag, then a newline and the whole seconds of play time.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    generate::{Difficulty, Generator},
    grid::{fill_random_empty, Grid, Pos, SIZE},
};

pub const SLOT_MIN: u8 = 1;
pub const SLOT_MAX: u8 = 10;

const GRID_DIGITS: usize = SIZE * SIZE * 4;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no savegame stored in this slot")]
    SlotEmpty,
    #[error("the savegame data is corrupt: {0}")]
    Corrupt(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One game in progress: the solution, the player's board and the play
/// time. The persisted slot record is the sole durable copy of this state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Savegame {
    pub solved: Grid,
    pub working: Grid,
    /// Elapsed play time in seconds.
    pub elapsed: f64,
}

impl Savegame {
    /// Starts a fresh game: generate a solution and carve it down.
    pub fn new_game(generator: &mut Generator, difficulty: Difficulty) -> Self {
        let solved = generator.solved_grid();
        let working = generator.carve(&solved, difficulty);
        Self { solved, working, elapsed: 0.0 }
    }

    /// Starts a game from an imported, already validated solution.
    pub fn from_solution(generator: &mut Generator, solved: Grid, difficulty: Difficulty) -> Self {
        let working = generator.carve(&solved, difficulty);
        Self { solved, working, elapsed: 0.0 }
    }

    /// Reveals one random empty field of the working board from the
    /// solution. `None` when the board is already full.
    pub fn reveal_hint(&mut self, rng: &mut impl Rng) -> Option<Pos> {
        fill_random_empty(&self.solved, &mut self.working, rng)
    }

    /// Serializes into the slot grammar. The fractional part of the play
    /// time is truncated.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(GRID_DIGITS + 24);
        for r in 0..SIZE {
            for c in 0..SIZE {
                let s = self.solved.cells[r][c];
                let w = self.working.cells[r][c];
                for digit in [s.value, w.value, s.locked as u8, w.locked as u8] {
                    out.push(char::from(b'0' + digit));
                }
            }
        }
        out.push('\n');
        out.push_str(&(self.elapsed as u64).to_string());
        out
    }

    /// Parses a slot record. Exactly 324 digits must precede the newline;
    /// short or padded records are rejected rather than silently truncated.
    /// An empty time field decodes to 0 seconds.
    pub fn decode(text: &str) -> Result<Self, SaveError> {
        let bytes = text.as_bytes();
        if bytes.len() < GRID_DIGITS + 1 {
            return Err(SaveError::Corrupt("expected 324 grid digits followed by a newline"));
        }

        let mut solved = Grid::empty();
        let mut working = Grid::empty();
        for (i, &byte) in bytes[..GRID_DIGITS].iter().enumerate() {
            if !byte.is_ascii_digit() {
                return Err(SaveError::Corrupt("the grid data holds a non-digit character"));
            }
            let digit = byte - b'0';
            let (r, c) = (i / 4 / SIZE, i / 4 % SIZE);
            match i % 4 {
                0 => solved.cells[r][c].value = digit,
                1 => working.cells[r][c].value = digit,
                2 => solved.cells[r][c].locked = lock_flag(digit)?,
                _ => working.cells[r][c].locked = lock_flag(digit)?,
            }
        }
        if bytes[GRID_DIGITS] != b'\n' {
            return Err(SaveError::Corrupt("expected a newline after the 324 grid digits"));
        }

        // the grid digits and newline are ASCII, so this slice is in bounds
        let mut elapsed = 0.0_f64;
        for byte in text[GRID_DIGITS + 1..].trim_end().bytes() {
            if !byte.is_ascii_digit() {
                return Err(SaveError::Corrupt("the time field holds a non-digit character"));
            }
            elapsed = elapsed * 10.0 + f64::from(byte - b'0');
        }

        Ok(Self { solved, working, elapsed })
    }
}

fn lock_flag(digit: u8) -> Result<bool, SaveError> {
    match digit {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(SaveError::Corrupt("lock flags must be 0 or 1")),
    }
}

/// Numbered on-disk savegame slots, one `.skram` file per slot.
///
/// Slot ids run from [`SLOT_MIN`] to [`SLOT_MAX`]; the surrounding system
/// enforces the range. An absent file is the regular "slot is free" state,
/// reported as [`SaveError::SlotEmpty`] rather than as corruption.
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, slot: u8) -> PathBuf {
        debug_assert!((SLOT_MIN..=SLOT_MAX).contains(&slot), "slot out of range");
        self.dir.join(format!("slot{}.skram", slot - 1))
    }

    pub fn exists(&self, slot: u8) -> bool {
        self.path(slot).is_file()
    }

    pub fn load(&self, slot: u8) -> Result<Savegame, SaveError> {
        let text = match fs::read_to_string(self.path(slot)) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SaveError::SlotEmpty),
            Err(e) => return Err(e.into()),
        };
        Savegame::decode(&text)
    }

    pub fn save(&self, slot: u8, savegame: &Savegame) -> Result<(), SaveError> {
        let path = self.path(slot);
        fs::write(&path, savegame.encode())?;
        debug!("saved slot {} to {}", slot, path.display());
        Ok(())
    }

    pub fn delete(&self, slot: u8) -> Result<(), SaveError> {
        match fs::remove_file(self.path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SaveError::SlotEmpty),
            Err(e) => Err(e.into()),
        }
    }
}
