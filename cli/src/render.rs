use std::fmt::Write;

use sweeper_core::{self as game, BoardEngine, CellView, Coord2};

fn cell_char(engine: &BoardEngine, coords: Coord2) -> game::Result<char> {
    Ok(match engine.cell_view(coords)? {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Open(0) => '.',
        CellView::Open(count) => char::from(b'0' + count),
        CellView::Mine if engine.triggered_mine() == Some(coords) => 'X',
        CellView::Mine => '*',
    })
}

/// Draws the grid with row and column numbers, three characters per cell.
pub(crate) fn render_board(engine: &BoardEngine) -> game::Result<String> {
    let (rows, cols) = engine.size();
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = write!(out, "   ");
    for col in 0..cols {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..cols {
            let _ = write!(out, "{:>3}", cell_char(engine, (row, col))?);
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::MineLayout;

    #[test]
    fn renders_hidden_board() {
        let engine = BoardEngine::new(game::Difficulty::new(2, 3, 0).unwrap(), 0);

        let board = render_board(&engine).unwrap();

        assert_eq!(board, "     0  1  2\n  0  #  #  #\n  1  #  #  #\n");
    }

    #[test]
    fn renders_numbers_flags_and_mines() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2)]).unwrap();
        let mut engine = BoardEngine::with_layout(layout);
        engine.reveal((0, 1)).unwrap();
        engine.toggle_flag((1, 0)).unwrap();

        let board = render_board(&engine).unwrap();
        assert_eq!(board, "     0  1  2\n  0  #  2  #\n  1  F  #  #\n");

        engine.reveal((1, 2)).unwrap();
        let board = render_board(&engine).unwrap();
        assert_eq!(board, "     0  1  2\n  0  *  2  #\n  1  F  #  X\n");
    }

    #[test]
    fn flagged_mines_stay_flagged_after_loss() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2)]).unwrap();
        let mut engine = BoardEngine::with_layout(layout);
        engine.reveal((0, 1)).unwrap();
        engine.toggle_flag((0, 0)).unwrap();

        engine.reveal((1, 2)).unwrap();

        let board = render_board(&engine).unwrap();
        assert_eq!(board, "     0  1  2\n  0  F  2  #\n  1  #  #  X\n");
        assert_eq!(engine.mines_remaining(), 1);
    }

    #[test]
    fn zero_cells_render_as_dots() {
        let layout = MineLayout::from_mine_coords((1, 4), &[(0, 3)]).unwrap();
        let mut engine = BoardEngine::with_layout(layout);

        engine.reveal((0, 0)).unwrap();

        let board = render_board(&engine).unwrap();
        assert_eq!(board, "     0  1  2  3\n  0  .  .  1  #\n");
    }
}
