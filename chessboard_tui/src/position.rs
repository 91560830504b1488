use std::path::Path;

use anyhow::Context;
use chessboard_view::{Dimension, Piece, PieceCollections, PieceKind, Side};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The usual starting position, cut to fit the board.
///
/// Boards with fewer than four ranks get back ranks only, a single rank
/// only the first side's.
pub fn standard(dimension: Dimension) -> PieceCollections {
    let top = dimension.height() as i8 - 1;
    let mut model = PieceCollections::new();
    let mut id = 0;
    let mut put = |side: Side, kind: Option<PieceKind>, rank: i8| {
        for file in 0..dimension.width() as i8 {
            let kind = kind.unwrap_or(BACK_RANK[file as usize]);
            model.insert(id, Piece::new(side, kind, rank, file));
            id += 1;
        }
    };
    put(Side::First, None, 0);
    if top > 0 {
        put(Side::Second, None, top);
    }
    if top >= 3 {
        put(Side::First, Some(PieceKind::Pawn), 1);
        put(Side::Second, Some(PieceKind::Pawn), top - 1);
    }
    model
}

/// Reads a [`PieceCollections`] from JSON.
pub fn load(path: &Path) -> anyhow::Result<PieceCollections> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read position file '{}'", path.display()))?;
    let model = serde_json::from_str(&text)
        .with_context(|| format!("Invalid position file '{}'", path.display()))?;
    Ok(model)
}
