use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Piece, Side};

/// Identifies a piece within the collection of its side.
pub type PieceId = u32;

/// Read access to the authoritative game state.
///
/// The view never mutates the model, it only asks for the pieces of each
/// side and paints the ones still on the board.
pub trait GameModel {
    /// The pieces of `side`, in whatever order the model keeps them.
    ///
    /// Must be empty for [`Side::Unoccupied`].
    fn pieces(&self, side: Side) -> Box<dyn Iterator<Item = &Piece> + '_>;
}

/// A plain in-memory model: one map from piece id to piece per side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCollections {
    #[serde(default)]
    first: BTreeMap<PieceId, Piece>,
    #[serde(default)]
    second: BTreeMap<PieceId, Piece>,
}

impl PieceCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a piece under `id` to the collection of its own side, replacing
    /// whatever had that id before.
    ///
    /// Pieces of [`Side::Unoccupied`] are dropped and `None` is returned.
    pub fn insert(&mut self, id: PieceId, piece: Piece) -> Option<Piece> {
        self.collection_mut(piece.side)?.insert(id, piece)
    }

    pub fn get(&self, side: Side, id: PieceId) -> Option<&Piece> {
        self.collection(side)?.get(&id)
    }

    pub fn get_mut(&mut self, side: Side, id: PieceId) -> Option<&mut Piece> {
        self.collection_mut(side)?.get_mut(&id)
    }

    /// Finds the piece standing on `(rank, file)`, ignoring removed ones.
    pub fn piece_at(&self, rank: i8, file: i8) -> Option<(Side, PieceId)> {
        Side::PLAYING.into_iter().find_map(|side| {
            self.collection(side)?
                .iter()
                .find(|(_, p)| p.is_on_board() && p.rank == rank && p.file == file)
                .map(|(&id, _)| (side, id))
        })
    }

    /// Number of pieces of both sides still on the board.
    pub fn on_board_count(&self) -> usize {
        self.first
            .values()
            .chain(self.second.values())
            .filter(|p| p.is_on_board())
            .count()
    }

    fn collection(&self, side: Side) -> Option<&BTreeMap<PieceId, Piece>> {
        match side {
            Side::First => Some(&self.first),
            Side::Second => Some(&self.second),
            Side::Unoccupied => None,
        }
    }

    fn collection_mut(&mut self, side: Side) -> Option<&mut BTreeMap<PieceId, Piece>> {
        match side {
            Side::First => Some(&mut self.first),
            Side::Second => Some(&mut self.second),
            Side::Unoccupied => None,
        }
    }
}

impl GameModel for PieceCollections {
    fn pieces(&self, side: Side) -> Box<dyn Iterator<Item = &Piece> + '_> {
        match self.collection(side) {
            Some(collection) => Box::new(collection.values()),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn pieces_are_sorted_into_their_side() {
        let mut model = PieceCollections::new();
        model.insert(1, Piece::new(Side::First, PieceKind::Pawn, 1, 0));
        model.insert(2, Piece::new(Side::Second, PieceKind::King, 7, 4));
        assert_eq!(model.insert(3, Piece::new(Side::Unoccupied, PieceKind::Rook, 0, 0)), None);

        assert_eq!(model.pieces(Side::First).count(), 1);
        assert_eq!(model.pieces(Side::Second).count(), 1);
        assert_eq!(model.pieces(Side::Unoccupied).count(), 0);
        assert_eq!(model.piece_at(7, 4), Some((Side::Second, 2)));
    }

    #[test]
    fn removed_pieces_are_not_found_on_their_old_square() {
        let mut model = PieceCollections::new();
        model.insert(1, Piece::new(Side::First, PieceKind::Pawn, 1, 0));
        model.get_mut(Side::First, 1).unwrap().removed = true;
        assert_eq!(model.piece_at(1, 0), None);
        assert_eq!(model.on_board_count(), 0);
    }
}
