//! Tetromino kinds and their shapes.
//!
//! Every kind maps to a `const` template in [`TEMPLATES`]. An active piece
//! owns a copy of its template as a [`Shape`], so rotating it never touches
//! the table.

use super::grid::Cell;

/// Largest bounding box of any piece (the I piece).
pub const MAX_SHAPE: usize = 4;

/// The seven tetromino kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    T,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in draw order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Cell value used for every block of this kind (1..=7).
    pub fn fill(self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Fresh copy of the canonical shape for this kind.
    pub fn shape(self) -> Shape {
        TEMPLATES[self as usize]
    }
}

/// Rotation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    pub fn reverse(self) -> Spin {
        match self {
            Spin::Clockwise => Spin::CounterClockwise,
            Spin::CounterClockwise => Spin::Clockwise,
        }
    }
}

/// Square NxN block matrix (N in 2..=4) stored in a fixed 4x4 buffer.
/// Only the top-left `size` x `size` region is meaningful; the rest stays zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: [[Cell; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    const fn from_rows<const N: usize>(rows: [[Cell; N]; N]) -> Self {
        let mut cells = [[0; MAX_SHAPE]; MAX_SHAPE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self { size: N, cells }
    }

    /// Side length of the bounding box.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.size && y < self.size {
            self.cells[y][x]
        } else {
            0
        }
    }

    /// Iterate `(x, y, value)` over the non-zero cells.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != 0).then_some((x, y, v))
            })
        })
    }

    /// Rotate in place: transpose, then mirror each row (clockwise) or flip
    /// the row order (counter-clockwise).
    pub fn rotate(&mut self, spin: Spin) {
        let n = self.size;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[x][y];
                self.cells[x][y] = self.cells[y][x];
                self.cells[y][x] = tmp;
            }
        }
        match spin {
            Spin::Clockwise => {
                for row in self.cells.iter_mut().take(n) {
                    row[..n].reverse();
                }
            }
            Spin::CounterClockwise => self.cells[..n].reverse(),
        }
    }
}

/// Canonical templates indexed by `PieceKind as usize`.
const TEMPLATES: [Shape; 7] = [
    // I
    Shape::from_rows([[0, 5, 0, 0], [0, 5, 0, 0], [0, 5, 0, 0], [0, 5, 0, 0]]),
    // L
    Shape::from_rows([[0, 3, 0], [0, 3, 0], [0, 3, 3]]),
    // J
    Shape::from_rows([[0, 4, 0], [0, 4, 0], [4, 4, 0]]),
    // O
    Shape::from_rows([[2, 2], [2, 2]]),
    // T
    Shape::from_rows([[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
    // S
    Shape::from_rows([[0, 6, 6], [6, 6, 0], [0, 0, 0]]),
    // Z
    Shape::from_rows([[7, 7, 0], [0, 7, 7], [0, 0, 0]]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_blocks_of_its_fill() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let blocks: Vec<_> = shape.blocks().collect();
            assert_eq!(blocks.len(), 4, "{:?} should have 4 blocks", kind);
            assert!(blocks.iter().all(|&(_, _, v)| v == kind.fill()));
        }
    }

    #[test]
    fn fills_are_distinct_and_in_range() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let f = kind.fill() as usize;
            assert!((1..=7).contains(&f));
            assert!(!seen[f], "duplicate fill {}", f);
            seen[f] = true;
        }
    }

    #[test]
    fn sizes_match_kind() {
        assert_eq!(PieceKind::O.shape().size(), 2);
        assert_eq!(PieceKind::I.shape().size(), 4);
        for kind in [PieceKind::L, PieceKind::J, PieceKind::T, PieceKind::S, PieceKind::Z] {
            assert_eq!(kind.shape().size(), 3);
        }
    }

    #[test]
    fn clockwise_rotation_of_t() {
        let mut t = PieceKind::T.shape();
        t.rotate(Spin::Clockwise);
        // 000/111/010 -> 010/110/010
        let expected = Shape::from_rows([[0, 1, 0], [1, 1, 0], [0, 1, 0]]);
        assert_eq!(t, expected);
    }

    #[test]
    fn counter_clockwise_rotation_of_t() {
        let mut t = PieceKind::T.shape();
        t.rotate(Spin::CounterClockwise);
        // 000/111/010 -> 010/011/010
        let expected = Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]);
        assert_eq!(t, expected);
    }

    #[test]
    fn rotate_then_reverse_restores_shape() {
        for kind in PieceKind::ALL {
            for spin in [Spin::Clockwise, Spin::CounterClockwise] {
                let mut s = kind.shape();
                s.rotate(spin);
                s.rotate(spin.reverse());
                assert_eq!(s, kind.shape(), "{:?} {:?}", kind, spin);
            }
        }
    }

    #[test]
    fn four_turns_is_identity() {
        for kind in PieceKind::ALL {
            let mut s = kind.shape();
            for _ in 0..4 {
                s.rotate(Spin::Clockwise);
            }
            assert_eq!(s, kind.shape());
        }
    }

    #[test]
    fn rotating_copy_leaves_template_alone() {
        let mut s = PieceKind::S.shape();
        s.rotate(Spin::Clockwise);
        assert_ne!(s, PieceKind::S.shape());
        assert_eq!(PieceKind::S.shape().get(1, 0), 6);
    }
}
