use serde::{Deserialize, Serialize};

use crate::Coord2;

/// What the player has done to a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl RevealState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// What a cell holds once mines have been placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Empty(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `None` for a mine.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Empty(count) => Some(count),
        }
    }
}

/// Player-visible merge of reveal state and content, what a renderer draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Open(u8),
    Mine,
}

impl CellView {
    pub(crate) const fn from_parts(state: RevealState, content: Option<CellContent>) -> Self {
        match (state, content) {
            (RevealState::Flagged, _) => Self::Flagged,
            (RevealState::Revealed, Some(CellContent::Mine)) => Self::Mine,
            (RevealState::Revealed, Some(CellContent::Empty(count))) => Self::Open(count),
            // revealed cells always have placed content
            (RevealState::Revealed, None) | (RevealState::Hidden, _) => Self::Hidden,
        }
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// A single cell whose reveal state changed during an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub state: RevealState,
    /// Set for revealed empty cells.
    pub adjacent_mines: Option<u8>,
}

impl CellChange {
    pub(crate) const fn revealed(coords: Coord2, content: CellContent) -> Self {
        Self {
            coords,
            state: RevealState::Revealed,
            adjacent_mines: content.adjacent_mines(),
        }
    }

    pub const fn view(&self) -> CellView {
        match (self.state, self.adjacent_mines) {
            (RevealState::Revealed, Some(count)) => CellView::Open(count),
            (RevealState::Revealed, None) => CellView::Mine,
            (RevealState::Flagged, _) => CellView::Flagged,
            (RevealState::Hidden, _) => CellView::Hidden,
        }
    }
}
