use crate::{Grid, TileKind, FILE_LETTERS};

/// Draws the grid as text, highest rank on top.
///
/// Each cell shows its piece glyph, or the first letter or digit of its overlay,
/// or a shade for its tile.
pub fn visualize_board(grid: &Grid) -> String {
    let dimension = grid.dimension();
    let files: String = FILE_LETTERS[..dimension.width()]
        .iter()
        .map(|letter| format!("{letter} "))
        .collect();

    let mut result = format!("    {}\n    ╭", files.trim_end());
    for _ in 0..dimension.width() {
        result += "──";
    }
    result += "╮\n";

    for row in grid.rows_top_down() {
        let rank = row[0].rank() + 1;
        result += &format!("{rank:>3} │");
        for cell in row {
            let symbol = match (cell.icon(), cell.overlay()) {
                (Some(icon), _) => icon.glyph(),
                (None, Some(text)) => text.chars().find(|c| c.is_alphanumeric()).unwrap_or('·'),
                (None, None) => match cell.tile().kind() {
                    TileKind::Light => ' ',
                    TileKind::Dark => '·',
                },
            };
            result.push(symbol);
            result.push(' ');
        }
        result += &format!("│ {rank}\n");
    }

    result += "    ╰";
    for _ in 0..dimension.width() {
        result += "──";
    }
    result += "╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::complete_source;
    use crate::{BoardView, Panel, Piece, PieceCollections, PieceKind, Region, Side};

    #[test]
    fn draws_pieces_and_tiles() {
        let mut pane: Vec<(Region, Panel)> = Vec::new();
        let mut view = BoardView::new(&mut pane, 2, 2, &complete_source()).unwrap();
        let mut model = PieceCollections::new();
        model.insert(0, Piece::new(Side::Second, PieceKind::King, 1, 0));
        view.refresh_board(&model).unwrap();

        let expected = "    A B\n    ╭────╮\n  2 │♚ · │ 2\n  1 │·   │ 1\n    ╰────╯";
        assert_eq!(visualize_board(view.grid()), expected);
        assert_eq!(view.to_string(), expected);
    }

    #[test]
    fn marked_cells_show_their_rank() {
        let mut pane: Vec<(Region, Panel)> = Vec::new();
        let mut view = BoardView::new(&mut pane, 1, 2, &complete_source()).unwrap();
        view.mark_position();
        assert!(visualize_board(view.grid()).contains("│0 0 │"));
    }
}
