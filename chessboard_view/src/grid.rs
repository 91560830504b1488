use crate::{square_name, Dimension, Icon, Tile, TileKind, Tiles};

/// A single square of the board.
///
/// The background tile and the name are fixed when the grid is built. Only
/// the icon and the overlay text change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    rank: usize,
    file: usize,
    name: String,
    tile: Tile,
    icon: Option<Icon>,
    overlay: Option<String>,
}

impl Cell {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn file(&self) -> usize {
        self.file
    }

    /// The square name, e.g. `"E4"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    pub(crate) fn set_icon(&mut self, icon: Option<Icon>) -> Option<Icon> {
        std::mem::replace(&mut self.icon, icon)
    }

    pub(crate) fn set_overlay(&mut self, text: String) {
        self.overlay = Some(text);
    }
}

/// The height x width array of cells, stored row-major with rank 0 first.
#[derive(Clone, Debug)]
pub struct Grid {
    dimension: Dimension,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds every cell, choosing its tile by the parity of `rank + file`.
    pub fn new(dimension: Dimension, tiles: &Tiles) -> Self {
        let cells = dimension
            .coordinates()
            .map(|(rank, file)| Cell {
                rank,
                file,
                name: square_name(rank, file),
                tile: tiles.get(TileKind::for_square(rank, file)).clone(),
                icon: None,
                overlay: None,
            })
            .collect();
        Self { dimension, cells }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns `None` if `(rank, file)` is outside the board.
    pub fn get(&self, rank: usize, file: usize) -> Option<&Cell> {
        self.index(rank, file).map(|idx| &self.cells[idx])
    }

    pub(crate) fn get_mut(&mut self, rank: usize, file: usize) -> Option<&mut Cell> {
        let idx = self.index(rank, file)?;
        Some(&mut self.cells[idx])
    }

    /// Looks a cell up by its square name, e.g. `"A2"`.
    pub fn by_name(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Iterates over the ranks from the top (highest rank) down, as the
    /// board is displayed.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dimension.width()).rev()
    }

    fn index(&self, rank: usize, file: usize) -> Option<usize> {
        self.dimension
            .contains(rank, file)
            .then(|| rank * self.dimension.width() + file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::complete_source;

    fn grid(dimension: Dimension) -> Grid {
        Grid::new(dimension, &Tiles::load(&complete_source()).unwrap())
    }

    #[test]
    fn shape_matches_dimension() {
        let grid = grid(Dimension::new(3, 5).unwrap());
        assert_eq!(grid.iter().count(), 15);
        assert!(grid.get(2, 4).is_some());
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 5).is_none());
    }

    #[test]
    fn cells_know_their_coordinates_and_names() {
        let grid = grid(Dimension::SQUARE);
        let cell = grid.get(1, 0).unwrap();
        assert_eq!((cell.rank(), cell.file()), (1, 0));
        assert_eq!(cell.name(), "A2");
        assert_eq!(grid.get(0, 0).unwrap().name(), "A1");
        assert_eq!(grid.get(7, 7).unwrap().name(), "H8");
        assert_eq!(grid.by_name("e4").map(|c| (c.rank(), c.file())), Some((3, 4)));
    }

    #[test]
    fn tiles_alternate() {
        let grid = grid(Dimension::SQUARE);
        for cell in grid.iter() {
            let expected = if (cell.rank() + cell.file()) % 2 == 1 {
                TileKind::Light
            } else {
                TileKind::Dark
            };
            assert_eq!(cell.tile().kind(), expected, "tile of {}", cell.name());
        }
    }

    #[test]
    fn rows_top_down_starts_with_the_last_rank() {
        let grid = grid(Dimension::SQUARE);
        let first_row = grid.rows_top_down().next().unwrap();
        assert_eq!(first_row[0].name(), "A8");
        assert_eq!(grid.rows_top_down().count(), 8);
    }
}
