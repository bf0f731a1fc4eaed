#![no_std]

extern crate alloc;

use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions and mine count for one game.
///
/// Only built through [`Difficulty::new`] or the presets, deserialization included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DifficultyRepr")]
pub struct Difficulty {
    rows: Coord,
    cols: Coord,
    mine_count: CellCount,
}

/// Unchecked wire form of [`Difficulty`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct DifficultyRepr {
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
}

impl TryFrom<DifficultyRepr> for Difficulty {
    type Error = GameError;

    fn try_from(repr: DifficultyRepr) -> Result<Self> {
        Self::new(repr.rows, repr.cols, repr.mine_count)
    }
}

impl Difficulty {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mine_count: CellCount) -> Self {
        Self {
            rows,
            cols,
            mine_count,
        }
    }

    /// Validates that the board is non-empty and that every first click can get a mine-free
    /// 3×3 opening.
    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        let difficulty = Self::new_unchecked(rows, cols, mine_count);
        if rows == 0 || cols == 0 || mine_count > difficulty.max_mines() {
            return Err(GameError::InvalidDifficulty {
                rows,
                cols,
                mines: mine_count,
            });
        }
        Ok(difficulty)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    /// Largest mine count that still leaves room for the biggest clipped safe zone.
    pub const fn max_mines(&self) -> CellCount {
        let zone_rows = if self.rows < 3 { self.rows } else { 3 };
        let zone_cols = if self.cols < 3 { self.cols } else { 3 };
        self.total_cells().saturating_sub(mult(zone_rows, zone_cols))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (row, col) = coords;
        if row < self.rows && col < self.cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate { row, col })
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} with {} mines", self.rows, self.cols, self.mine_count)
    }
}

/// The fixed difficulty levels a player can pick from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn difficulty(self) -> Difficulty {
        match self {
            Self::Beginner => Difficulty::BEGINNER,
            Self::Intermediate => Difficulty::INTERMEDIATE,
            Self::Expert => Difficulty::EXPERT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        preset.difficulty()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the mines are, fixed once placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        // the mask is sized from `Coord` dimensions so the count fits
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly the given cells; duplicates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(row, col) in mine_coords {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::InvalidCoordinate { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Dimensions and mine count of this layout. Fixed layouts may be denser than
    /// [`Difficulty::new`] allows, since they skip the safe opening.
    pub fn difficulty(&self) -> Difficulty {
        let (rows, cols) = self.size();
        Difficulty::new_unchecked(rows, cols, self.mine_count)
    }

    /// Whether the stored mine count agrees with the mask.
    pub(crate) fn is_consistent(&self) -> bool {
        self.mine_mask.iter().filter(|&&is_mine| is_mine).count() == usize::from(self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn cell_content(&self, coords: Coord2) -> CellContent {
        if self[coords] {
            CellContent::Mine
        } else {
            CellContent::Empty(self.adjacent_mine_count(coords))
        }
    }

    /// All mine positions in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_classic_sizes() {
        assert_eq!(Preset::Beginner.difficulty().size(), (9, 9));
        assert_eq!(Preset::Intermediate.difficulty().mine_count(), 40);
        assert_eq!(Preset::Expert.difficulty(), Difficulty::EXPERT);
        assert_eq!(Difficulty::EXPERT.safe_cell_count(), 480 - 99);
    }

    #[test]
    fn presets_pass_validation() {
        for preset in Preset::ALL {
            let d = preset.difficulty();
            assert_eq!(Difficulty::new(d.rows(), d.cols(), d.mine_count()), Ok(d));
        }
    }

    #[test]
    fn difficulty_rejects_empty_board() {
        assert!(matches!(
            Difficulty::new(0, 5, 0),
            Err(GameError::InvalidDifficulty { .. })
        ));
        assert!(Difficulty::new(5, 0, 0).is_err());
    }

    #[test]
    fn difficulty_requires_room_for_safe_zone() {
        assert_eq!(Difficulty::BEGINNER.max_mines(), 72);
        assert!(Difficulty::new(9, 9, 72).is_ok());
        assert!(Difficulty::new(9, 9, 73).is_err());
        // the whole 2×2 board is the safe zone
        assert!(Difficulty::new(2, 2, 0).is_ok());
        assert!(Difficulty::new(2, 2, 1).is_err());
        assert!(Difficulty::new(1, 5, 2).is_ok());
        assert!(Difficulty::new(1, 5, 3).is_err());
    }

    #[test]
    fn deserializing_difficulty_validates() {
        let ok: Difficulty =
            serde_json::from_str(r#"{"rows":9,"cols":9,"mine_count":10}"#).unwrap();
        assert_eq!(ok, Difficulty::BEGINNER);

        // no room left for the opening
        let crowded = serde_json::from_str::<Difficulty>(r#"{"rows":3,"cols":3,"mine_count":9}"#);
        assert!(crowded.is_err());
        let empty = serde_json::from_str::<Difficulty>(r#"{"rows":0,"cols":4,"mine_count":0}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn difficulty_serializes_as_plain_fields() {
        let json = serde_json::to_string(&Difficulty::EXPERT).unwrap();
        assert_eq!(json, r#"{"rows":16,"cols":30,"mine_count":99}"#);
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let d = Difficulty::BEGINNER;
        assert_eq!(d.validate_coords((8, 8)), Ok((8, 8)));
        assert_eq!(
            d.validate_coords((9, 0)),
            Err(GameError::InvalidCoordinate { row: 9, col: 0 })
        );
        assert!(d.validate_coords((0, 9)).is_err());
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (0, 2), (0, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.cell_content((0, 0)), CellContent::Mine);
        assert_eq!(layout.cell_content((0, 1)), CellContent::Empty(2));
        assert_eq!(layout.cell_content((1, 1)), CellContent::Empty(2));
        assert_eq!(layout.cell_content((2, 2)), CellContent::Empty(0));
        assert_eq!(layout.mine_coords().collect::<alloc::vec::Vec<_>>(), [(0, 0), (0, 2)]);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoordinate { row: 2, col: 0 })
        );
    }
}
