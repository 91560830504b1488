use crate::{AssetError, DimensionError, PieceKind, Side};

/// The error type for building a [`BoardView`](crate::BoardView).
///
/// No view exists after this is returned, and nothing has been inserted
/// into the content pane.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("could not load board assets")]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// The error type for painting a model onto the board.
///
/// The grid is left untouched when this is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("{side} {kind} at rank {rank}, file {file} is outside the board")]
    OutOfBounds {
        side: Side,
        kind: PieceKind,
        rank: i8,
        file: i8,
    },
    #[error("{kind} belongs to no side")]
    Unowned { kind: PieceKind },
}
