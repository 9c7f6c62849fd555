//! Playing field.
//!
//! Fixed-size grid of cell values stored row-major in a flat buffer.
//! Coordinates: `(x, y)` with x growing to the right and y growing downward;
//! row 0 is the top of the field.

/// 0 is empty, 1..=7 is a piece color.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Result of one sweep pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sweep {
    pub rows: u32,
    pub points: u64,
}

/// Points for the first cleared row of a sweep; each further row doubles.
pub const ROW_POINTS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-empty grid. Dimensions are fixed for the grid's lifetime.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell. Values above 7 are clamped to keep the grid valid.
    /// Returns false when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, value: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value.min(7);
                true
            }
            None => false,
        }
    }

    /// Row `y`, or `None` when out of bounds.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Fill a whole row with one value (used to build puzzles and tests).
    pub fn fill_row(&mut self, y: usize, value: Cell) {
        if y < self.height {
            let start = y * self.width;
            self.cells[start..start + self.width].fill(value.min(7));
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.width > 0
            && self
                .row(y)
                .is_some_and(|row| row.iter().all(|&c| c != EMPTY))
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Remove row `y`, shift everything above it down one row and put an
    /// empty row on top.
    fn remove_row(&mut self, y: usize) {
        let w = self.width;
        self.cells.copy_within(0..y * w, w);
        self.cells[..w].fill(EMPTY);
    }

    /// Clear every full row, scanning bottom to top. After a removal the same
    /// index is checked again since the row above has dropped into it.
    /// The k-th cleared row is worth `ROW_POINTS * 2^(k-1)`, saturating at
    /// `u64::MAX` on very tall grids.
    pub fn sweep(&mut self) -> Sweep {
        let mut result = Sweep::default();
        let mut multiplier: u64 = 1;
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                result.rows += 1;
                result.points = result
                    .points
                    .saturating_add(ROW_POINTS.saturating_mul(multiplier));
                multiplier = multiplier.saturating_mul(2);
                continue;
            }
            y -= 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let g = Grid::new(18, 32);
        assert_eq!(g.width(), 18);
        assert_eq!(g.height(), 32);
        assert_eq!(g.filled_count(), 0);
        assert_eq!(g.rows().count(), 32);
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut g = Grid::new(4, 4);
        assert!(g.set(3, 3, 5));
        assert_eq!(g.get(3, 3), Some(5));
        assert!(!g.set(-1, 0, 1));
        assert!(!g.set(0, 4, 1));
        assert_eq!(g.get(4, 0), None);
        assert_eq!(g.get(0, -1), None);
    }

    #[test]
    fn set_clamps_to_palette() {
        let mut g = Grid::new(4, 4);
        g.set(0, 0, 200);
        assert_eq!(g.get(0, 0), Some(7));
    }

    #[test]
    fn sweep_on_empty_grid_does_nothing() {
        let mut g = Grid::new(6, 6);
        assert_eq!(g.sweep(), Sweep::default());
    }

    #[test]
    fn single_row_clear_shifts_stack_down() {
        let mut g = Grid::new(4, 5);
        g.fill_row(4, 1);
        g.set(2, 3, 6);
        let s = g.sweep();
        assert_eq!(s, Sweep { rows: 1, points: 10 });
        assert_eq!(g.get(2, 4), Some(6));
        assert_eq!(g.filled_count(), 1);
    }

    #[test]
    fn doubling_multiplier_per_row() {
        let mut g = Grid::new(4, 6);
        for y in 2..6 {
            g.fill_row(y, 3);
        }
        let s = g.sweep();
        assert_eq!(s.rows, 4);
        assert_eq!(s.points, 10 + 20 + 40 + 80);
        assert_eq!(g.filled_count(), 0);
    }

    #[test]
    fn multiplier_resets_between_sweeps() {
        let mut g = Grid::new(4, 6);
        g.fill_row(5, 1);
        assert_eq!(g.sweep().points, 10);
        g.fill_row(5, 1);
        assert_eq!(g.sweep().points, 10);
    }

    #[test]
    fn non_contiguous_full_rows_are_all_cleared() {
        let mut g = Grid::new(4, 6);
        g.fill_row(5, 1);
        g.set(0, 4, 2);
        g.fill_row(3, 1);
        let s = g.sweep();
        assert_eq!(s, Sweep { rows: 2, points: 30 });
        // the partial row ends up on the floor
        assert_eq!(g.row(5), Some(&[2, 0, 0, 0][..]));
        assert_eq!(g.filled_count(), 1);
    }

    #[test]
    fn row_out_of_bounds_is_none() {
        let g = Grid::new(4, 4);
        assert_eq!(g.row(3).map(<[Cell]>::len), Some(4));
        assert_eq!(g.row(4), None);
        assert!(!g.is_row_full(4));
    }

    #[test]
    fn tall_full_grid_saturates_points() {
        let mut g = Grid::new(4, 80);
        for y in 0..80 {
            g.fill_row(y, 2);
        }
        let s = g.sweep();
        assert_eq!(s.rows, 80);
        assert_eq!(s.points, u64::MAX);
        assert_eq!(g.filled_count(), 0);
    }

    #[test]
    fn top_row_is_swept_too() {
        let mut g = Grid::new(4, 4);
        g.fill_row(0, 4);
        let s = g.sweep();
        assert_eq!(s.rows, 1);
        assert_eq!(g.filled_count(), 0);
    }
}
