/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

/// Whether `other` lies in the 3×3 block centered at `center`.
pub fn within_one(center: Coord2, other: Coord2) -> bool {
    center.0.abs_diff(other.0) <= 1 && center.1.abs_diff(other.1) <= 1
}

/// Walks the 3×3 block around a cell in row-major order, yielding the in-bounds cells
/// other than the center.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    // position inside the 3×3 block, 0..9
    step: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            step: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let (block_row, block_col) = (self.step / 3, self.step % 3);
            self.step += 1;

            if (block_row, block_col) == (1, 1) {
                continue;
            }
            // shifted by one so the cell above/left of row or column 0 is skipped
            let row = u16::from(self.center.0) + u16::from(block_row);
            let col = u16::from(self.center.1) + u16::from(block_col);
            if row == 0 || col == 0 {
                continue;
            }
            let (row, col) = (row - 1, col - 1);
            if row < u16::from(self.bounds.0) && col < u16::from(self.bounds.1) {
                return Some((row as Coord, col as Coord));
            }
        }
        None
    }
}
