//! Row, column and 3x3-box uniqueness checks and the win-condition test.

use itertools::Itertools;

use crate::grid::{Grid, Pos, SIZE};

impl Grid {
    fn unique_in_row(&self, p: Pos) -> bool {
        let v = self.value(p);
        (0..SIZE).filter(|&c| self.cells[p.row][c].value == v).count() == 1
    }

    fn unique_in_col(&self, p: Pos) -> bool {
        let v = self.value(p);
        (0..SIZE).filter(|&r| self.cells[r][p.col].value == v).count() == 1
    }

    fn unique_in_box(&self, p: Pos) -> bool {
        let v = self.value(p);
        let (br, bc) = p.box_origin();
        (br..br + 3)
            .cartesian_product(bc..bc + 3)
            .filter(|&(r, c)| self.cells[r][c].value == v)
            .count()
            == 1
    }

    /// True iff the value at `p` occurs exactly once in its row, its column
    /// and its 3x3 box. Only meaningful for filled fields; an empty field
    /// counts as trivially unique under this scheme.
    pub fn is_cell_consistent(&self, p: Pos) -> bool {
        self.unique_in_row(p) && self.unique_in_col(p) && self.unique_in_box(p)
    }

    /// The sole win-condition test: no empty fields and every field
    /// consistent. Callers re-run this after every edit and every hint.
    pub fn is_solved(&self) -> bool {
        if self.count_empty() > 0 {
            return false;
        }
        (0..SIZE)
            .cartesian_product(0..SIZE)
            .all(|(r, c)| self.is_cell_consistent(Pos::new(r, c)))
    }
}
