use serde::{Deserialize, Serialize};

/// One of the two competing sides, or the placeholder for an empty square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The side that moves first, drawn in white.
    First,
    /// Drawn in black.
    Second,
    /// Never owns a piece.
    Unoccupied,
}

/// The six kinds of chess pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Side {
    /// The sides that own pieces, in painting order.
    pub const PLAYING: [Side; 2] = [Side::First, Side::Second];

    /// The display color of the side. Icon resources are named after it.
    pub fn color(self) -> &'static str {
        match self {
            Side::First => "white",
            Side::Second => "black",
            Side::Unoccupied => "",
        }
    }

    /// The position of this side in [`Side::PLAYING`].
    pub fn index(self) -> Option<usize> {
        match self {
            Side::First => Some(0),
            Side::Second => Some(1),
            Side::Unoccupied => None,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
            Side::Unoccupied => Side::Unoccupied,
        }
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The canonical display name, e.g. `"Knight"`.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Unoccupied => write!(f, "unoccupied"),
            side => write!(f, "{}", side.color()),
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Render a piece as a Unicode chess symbol.
pub fn unicode_char(side: Side, kind: PieceKind) -> char {
    // https://en.wikipedia.org/wiki/Chess_symbols_in_Unicode
    let offset = match kind {
        PieceKind::King => 0,
        PieceKind::Queen => 1,
        PieceKind::Rook => 2,
        PieceKind::Bishop => 3,
        PieceKind::Knight => 4,
        PieceKind::Pawn => 5,
    };
    let base = match side {
        Side::Second => 0x265A,
        _ => 0x2654,
    };
    char::from_u32(base + offset).unwrap_or('?')
}

/// A piece as stored by the game model.
///
/// The view only ever reads these. Once `removed` is set, `rank` and
/// `file` are stale and must not be used for placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
    pub rank: i8,
    pub file: i8,
    #[serde(default)]
    pub removed: bool,
}

impl Piece {
    pub fn new(side: Side, kind: PieceKind, rank: i8, file: i8) -> Self {
        Self {
            side,
            kind,
            rank,
            file,
            removed: false,
        }
    }

    pub fn is_on_board(&self) -> bool {
        !self.removed
    }
}
