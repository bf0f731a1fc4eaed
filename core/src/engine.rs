use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - AwaitingFirstMove -> InProgress (first reveal, mines get placed)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    AwaitingFirstMove,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_awaiting_first_move(self) -> bool {
        matches!(self, Self::AwaitingFirstMove)
    }

    /// No moves are accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Placement {
    Deferred(RandomMineGenerator),
    Placed(MineLayout),
}

/// Everything a renderer needs after a reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub changed: Vec<CellChange>,
    pub previous_phase: Phase,
    pub phase: Phase,
}

impl RevealReport {
    fn unchanged(phase: Phase) -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            changed: Vec::new(),
            previous_phase: phase,
            phase,
        }
    }

    /// The game clock should start.
    pub fn started(&self) -> bool {
        self.previous_phase.is_awaiting_first_move() && !self.phase.is_awaiting_first_move()
    }

    /// The game clock should stop.
    pub fn ended(&self) -> bool {
        !self.previous_phase.is_finished() && self.phase.is_finished()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    pub outcome: MarkOutcome,
    pub coords: Coord2,
    pub state: RevealState,
    pub mines_remaining: isize,
}

/// Owns the grid of one game and enforces its rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardEngineRepr")]
pub struct BoardEngine {
    difficulty: Difficulty,
    seed: Option<u64>,
    placement: Placement,
    board: Array2<RevealState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: Phase,
    triggered_mine: Option<Coord2>,
}

impl BoardEngine {
    /// Fresh game whose mines get placed by `seed` once the first cell is revealed.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        log::debug!("New game {} with seed {}", difficulty, seed);
        Self::with_placement(
            difficulty,
            Some(seed),
            Placement::Deferred(RandomMineGenerator::new(seed)),
        )
    }

    /// Game over a fixed layout; the first reveal is not guaranteed to be safe.
    pub fn with_layout(mine_layout: MineLayout) -> Self {
        let difficulty = mine_layout.difficulty();
        Self::with_placement(difficulty, None, Placement::Placed(mine_layout))
    }

    fn with_placement(difficulty: Difficulty, seed: Option<u64>, placement: Placement) -> Self {
        Self {
            difficulty,
            seed,
            placement,
            board: Array2::default(difficulty.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            phase: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.difficulty.mine_count()
    }

    /// Seed used for mine placement, `None` for games over a fixed layout.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Mines not yet accounted for by flags; negative when over-flagged.
    pub fn mines_remaining(&self) -> isize {
        (self.difficulty.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Mine positions, available once the first reveal has placed them.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        match &self.placement {
            Placement::Deferred(_) => None,
            Placement::Placed(layout) => Some(layout),
        }
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<RevealState> {
        let coords = self.difficulty.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let state = self.cell_state(coords)?;
        let content = self.mine_layout().map(|layout| layout.cell_content(coords));
        Ok(CellView::from_parts(state, content))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        use MarkOutcome::*;
        use RevealState::*;

        let coords = self.difficulty.validate_coords(coords)?;
        let state = self.board[coords.to_nd_index()];

        let (outcome, state) = match state {
            _ if self.phase.is_finished() => (NoChange, state),
            Revealed => (NoChange, Revealed),
            Hidden => {
                self.flagged_count += 1;
                (Changed, Flagged)
            }
            Flagged => {
                self.flagged_count -= 1;
                (Changed, Hidden)
            }
        };
        self.board[coords.to_nd_index()] = state;

        if outcome.has_update() {
            log::debug!("Cell {:?} is now {:?}", coords, state);
        }

        Ok(FlagReport {
            outcome,
            coords,
            state,
            mines_remaining: self.mines_remaining(),
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.difficulty.validate_coords(coords)?;
        let previous_phase = self.phase;

        if self.phase.is_finished() || !self.board[coords.to_nd_index()].is_hidden() {
            return Ok(RevealReport::unchanged(previous_phase));
        }

        if let Placement::Deferred(generator) = self.placement {
            self.placement = Placement::Placed(generator.generate(self.difficulty, coords));
        }
        let Placement::Placed(layout) = &self.placement else {
            return Ok(RevealReport::unchanged(previous_phase));
        };

        if self.phase.is_awaiting_first_move() {
            self.phase = Phase::InProgress;
            log::debug!("Game started at {:?}", coords);
        }

        let (outcome, changed) = if layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            (RevealOutcome::HitMine, expose_mines(layout, &mut self.board))
        } else {
            let changed = flood_reveal(layout, &mut self.board, coords);
            // only safe cells count towards the win, bounded by the cell count
            self.revealed_count += changed.len() as CellCount;
            (RevealOutcome::Revealed, changed)
        };

        let outcome = match outcome {
            RevealOutcome::HitMine => {
                self.end_game(false);
                outcome
            }
            _ if self.check_win() => {
                self.end_game(true);
                RevealOutcome::Won
            }
            _ => outcome,
        };

        Ok(RevealReport {
            outcome,
            changed,
            previous_phase,
            phase: self.phase,
        })
    }

    fn check_win(&self) -> bool {
        self.revealed_count == self.difficulty.safe_cell_count()
    }

    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won { Phase::Won } else { Phase::Lost };
        log::debug!(
            "Game ended {:?} after revealing {} cells",
            self.phase,
            self.revealed_count
        );
    }
}

/// Reveals `start` and, through zero-count cells, every cell connected to it.
fn flood_reveal(
    layout: &MineLayout,
    board: &mut Array2<RevealState>,
    start: Coord2,
) -> Vec<CellChange> {
    let mut changed = Vec::new();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        let cell = &mut board[coords.to_nd_index()];
        // skip flagged, and already revealed through another path
        if !cell.is_hidden() {
            log::trace!("Skipping cell at {:?}", coords);
            continue;
        }

        *cell = RevealState::Revealed;
        let content = layout.cell_content(coords);
        changed.push(CellChange::revealed(coords, content));
        log::trace!("Revealed cell at {:?}: {:?}", coords, content);

        if content == CellContent::Empty(0) {
            to_visit.extend(
                layout
                    .iter_neighbors(coords)
                    .filter(|&pos| board[pos.to_nd_index()].is_hidden()),
            );
        }
    }

    changed
}

/// Reveals every hidden mine. Flagged mines keep their flag.
fn expose_mines(layout: &MineLayout, board: &mut Array2<RevealState>) -> Vec<CellChange> {
    let mut changed = Vec::new();

    for coords in layout.mine_coords() {
        let cell = &mut board[coords.to_nd_index()];
        if cell.is_hidden() {
            *cell = RevealState::Revealed;
            changed.push(CellChange::revealed(coords, CellContent::Mine));
        }
    }

    changed
}

/// Serialized shape of [`BoardEngine`], checked before it becomes a live game.
#[derive(Deserialize)]
struct BoardEngineRepr {
    difficulty: DifficultyRepr,
    seed: Option<u64>,
    placement: Placement,
    board: Array2<RevealState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: Phase,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<BoardEngineRepr> for BoardEngine {
    type Error = GameError;

    fn try_from(repr: BoardEngineRepr) -> Result<Self> {
        use GameError::InconsistentState;

        let DifficultyRepr {
            rows,
            cols,
            mine_count,
        } = repr.difficulty;
        let (difficulty, layout) = match &repr.placement {
            Placement::Deferred(_) => {
                if !repr.phase.is_awaiting_first_move() {
                    return Err(InconsistentState("mines missing after the first move"));
                }
                (Difficulty::new(rows, cols, mine_count)?, None)
            }
            Placement::Placed(layout) => {
                // fixed layouts may be denser than a random game allows
                let difficulty = Difficulty::new_unchecked(rows, cols, mine_count);
                if !layout.is_consistent() || layout.difficulty() != difficulty {
                    return Err(InconsistentState("mine layout does not match difficulty"));
                }
                (difficulty, Some(layout))
            }
        };

        if repr.board.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(InconsistentState("board size does not match difficulty"));
        }

        let is_mine = |coords: Coord2| layout.is_some_and(|layout| layout.contains_mine(coords));
        let mut flagged = 0;
        let mut revealed_safe = 0;
        let mut revealed_mines = 0;
        for ((row, col), state) in repr.board.indexed_iter() {
            match state {
                RevealState::Hidden => {}
                RevealState::Flagged => flagged += 1,
                RevealState::Revealed if is_mine((row as Coord, col as Coord)) => {
                    revealed_mines += 1
                }
                RevealState::Revealed => revealed_safe += 1,
            }
        }
        if flagged != repr.flagged_count || revealed_safe != repr.revealed_count {
            return Err(InconsistentState("cell counters do not match the board"));
        }

        let all_safe_revealed = repr.revealed_count == difficulty.safe_cell_count();
        let untouched = repr.triggered_mine.is_none() && revealed_mines == 0;
        let phase_fits = match repr.phase {
            Phase::AwaitingFirstMove => untouched && repr.revealed_count == 0,
            Phase::InProgress => untouched && !all_safe_revealed,
            Phase::Won => untouched && all_safe_revealed,
            Phase::Lost => repr.triggered_mine.is_some_and(|coords| {
                difficulty.validate_coords(coords).is_ok()
                    && is_mine(coords)
                    && repr.board[coords.to_nd_index()].is_revealed()
            }),
        };
        if !phase_fits {
            return Err(InconsistentState("phase does not match the board"));
        }

        Ok(Self {
            difficulty,
            seed: repr.seed,
            placement: repr.placement,
            board: repr.board,
            revealed_count: repr.revealed_count,
            flagged_count: repr.flagged_count,
            phase: repr.phase,
            triggered_mine: repr.triggered_mine,
        })
    }
}
