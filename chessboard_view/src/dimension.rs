use serde::{Deserialize, Serialize};

/// The letters used to name the files (columns) of the board, left to right.
pub const FILE_LETTERS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// The largest number of ranks or files a board can have.
///
/// This is bounded by the number of file letters.
pub const MAX_BOARD_SIDE: u8 = FILE_LETTERS.len() as u8;

/// The size of the board, as ranks (height) by files (width).
///
/// All coordinate math in this crate is derived from this pair. It never
/// changes after a view has been constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimension")]
pub struct Dimension {
    height: u8,
    width: u8,
}

#[derive(Deserialize)]
struct RawDimension {
    height: u8,
    width: u8,
}

impl TryFrom<RawDimension> for Dimension {
    type Error = DimensionError;

    fn try_from(raw: RawDimension) -> Result<Self, Self::Error> {
        Dimension::new(raw.height, raw.width)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("a {height}x{width} board is not supported, both sides must be between 1 and 8")]
    Unsupported { height: u8, width: u8 },
}

impl Dimension {
    /// The regular 8x8 chess board.
    pub const SQUARE: Dimension = Dimension {
        height: 8,
        width: 8,
    };

    pub fn new(height: u8, width: u8) -> Result<Self, DimensionError> {
        let supported = 1..=MAX_BOARD_SIDE;
        if supported.contains(&height) && supported.contains(&width) {
            Ok(Self { height, width })
        } else {
            Err(DimensionError::Unsupported { height, width })
        }
    }

    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    /// Checks a (possibly negative) piece coordinate against the board and
    /// converts it to grid indices.
    pub fn checked_index(&self, rank: i8, file: i8) -> Option<(usize, usize)> {
        let rank = usize::try_from(rank).ok()?;
        let file = usize::try_from(file).ok()?;
        self.contains(rank, file).then_some((rank, file))
    }

    pub fn contains(&self, rank: usize, file: usize) -> bool {
        rank < self.height() && file < self.width()
    }

    /// All coordinates of the board in row-major order, starting at `(0, 0)`.
    pub fn coordinates(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height()).flat_map(move |rank| (0..self.width()).map(move |file| (rank, file)))
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::SQUARE
    }
}

/// The human-readable name of a square: file letter followed by the
/// 1-based rank, counted from the bottom, e.g. `(1, 0)` is `"A2"`.
///
/// Panics if `file` has no letter.
pub fn square_name(rank: usize, file: usize) -> String {
    format!("{}{}", FILE_LETTERS[file], rank + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_eight_by_eight() {
        assert_eq!(Dimension::SQUARE.height(), 8);
        assert_eq!(Dimension::SQUARE.width(), 8);
        assert_eq!(Dimension::default(), Dimension::SQUARE);
    }

    #[test]
    fn rejects_boards_without_file_letters() {
        assert_eq!(
            Dimension::new(8, 9),
            Err(DimensionError::Unsupported {
                height: 8,
                width: 9
            })
        );
        assert!(Dimension::new(0, 8).is_err());
        assert!(Dimension::new(3, 5).is_ok());
    }

    #[test]
    fn checked_index_rejects_outside_coordinates() {
        let dim = Dimension::SQUARE;
        assert_eq!(dim.checked_index(1, 0), Some((1, 0)));
        assert_eq!(dim.checked_index(7, 7), Some((7, 7)));
        assert_eq!(dim.checked_index(8, 0), None);
        assert_eq!(dim.checked_index(0, -1), None);
    }

    #[test]
    fn square_names() {
        assert_eq!(square_name(0, 0), "A1");
        assert_eq!(square_name(1, 0), "A2");
        assert_eq!(square_name(7, 7), "H8");
    }

    #[test]
    fn deserialize_validates() {
        let dim: Dimension = serde_json::from_str(r#"{"height": 4, "width": 6}"#).unwrap();
        assert_eq!((dim.height(), dim.width()), (4, 6));
        assert!(serde_json::from_str::<Dimension>(r#"{"height": 12, "width": 8}"#).is_err());
    }

    #[test]
    fn coordinates_cover_the_board_once() {
        let dim = Dimension::new(2, 3).unwrap();
        let coords: Vec<_> = dim.coordinates().collect();
        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }
}
