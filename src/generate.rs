//! Full-grid generation and puzzle carving.

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::grid::{Cell, Grid, Pos, SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of fields the carver empties.
    pub fn empty_cells(self) -> usize {
        match self {
            Difficulty::Easy => 25,
            Difficulty::Medium => 35,
            Difficulty::Hard => 45,
        }
    }

    /// Maps the historical numeric levels 1/2/3; any unrecognized level
    /// falls back to Medium.
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => Difficulty::Easy,
            3 => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Pass a seed to make generation and carving reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Builds one complete solution grid with every field locked.
    ///
    /// The base digit sequence is shuffled once, then laid out band by
    /// band: each of the three rows in a band copies the sequence and
    /// rotates it right by 3, with 2 extra steps between bands. That yields
    /// a grid whose rows, columns and boxes are valid by construction.
    /// Random swaps of rows and columns within their bands then break up
    /// the visible regularity; such swaps leave every row, column and box
    /// digit set intact, so validity is never re-checked. Cannot fail.
    pub fn solved_grid(&mut self) -> Grid {
        let mut seq: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        seq.shuffle(&mut self.rng);

        let mut grid = Grid::empty();
        for band in 0..3 {
            for row in band * 3..band * 3 + 3 {
                for col in 0..SIZE {
                    grid.cells[row][col] = Cell { value: seq[col], locked: true };
                }
                seq.rotate_right(3);
            }
            seq.rotate_right(2);
        }

        for _ in 0..SIZE {
            let band = self.rng.gen_range(0..3) * 3;
            let (a, b) = (self.rng.gen_range(0..3), self.rng.gen_range(0..3));
            grid.swap_rows(band + a, band + b);
        }
        for _ in 0..SIZE {
            let band = self.rng.gen_range(0..3) * 3;
            let (a, b) = (self.rng.gen_range(0..3), self.rng.gen_range(0..3));
            grid.swap_cols(band + a, band + b);
        }
        grid
    }

    /// Empties exactly `difficulty.empty_cells()` distinct fields of a
    /// solved grid and unlocks them for play; every other field keeps its
    /// solved value and stays locked.
    pub fn carve(&mut self, solved: &Grid, difficulty: Difficulty) -> Grid {
        let mut puzzle = solved.clone();
        for _ in 0..difficulty.empty_cells() {
            // resample on collision with an already emptied field
            loop {
                let p = Pos::new(self.rng.gen_range(0..SIZE), self.rng.gen_range(0..SIZE));
                if puzzle.value(p) != 0 {
                    puzzle.cells[p.row][p.col] = Cell { value: 0, locked: false };
                    break;
                }
            }
        }
        debug!("carved {} fields for a {:?} puzzle", difficulty.empty_cells(), difficulty);
        puzzle
    }
}
