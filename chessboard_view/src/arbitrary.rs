use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

use crate::{Piece, PieceCollections, PieceKind, Side};

/// A model for an 8x8 board with at most one piece on each square.
///
/// Some pieces are removed from the board; their stale coordinates may
/// collide with other pieces or lie outside the board.
#[derive(Clone, Debug)]
pub struct ArbitraryModel(pub PieceCollections);

impl Arbitrary for Side {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Side::PLAYING).unwrap()
    }
}

impl Arbitrary for PieceKind {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&PieceKind::ALL).unwrap()
    }
}

impl Arbitrary for ArbitraryModel {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut model = PieceCollections::new();
        let mut occupied = BTreeSet::new();
        let num_pieces = usize::arbitrary(g) % 40;
        for id in 0..num_pieces as u32 {
            let side = Side::arbitrary(g);
            let kind = PieceKind::arbitrary(g);
            let removed = u8::arbitrary(g) % 4 == 0;
            let (rank, file) = if removed {
                (i8::arbitrary(g), i8::arbitrary(g))
            } else {
                let rank = (u8::arbitrary(g) % 8) as i8;
                let file = (u8::arbitrary(g) % 8) as i8;
                if !occupied.insert((rank, file)) {
                    continue;
                }
                (rank, file)
            };
            model.insert(
                id,
                Piece {
                    side,
                    kind,
                    rank,
                    file,
                    removed,
                },
            );
        }
        ArbitraryModel(model)
    }
}
