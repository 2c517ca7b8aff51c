use std::fmt::{Display, Formatter};
use serde::{Serialize, Serializer};

use super::{PieceType, Square, PieceType::*};
use crate::board::{Board, BitBoard};

type FmtResult = std::fmt::Result;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Move {
    // `piece` and `ep` are recorded at generation time so that search-hot
    // queries (piece_moving, is_capture) don't need a board lookup.
    Normal { from: u8, to: u8, piece: PieceType, ep: bool },
    PawnPromotion { from: u8, to: u8, promote_to: PieceType },
    ShortCastle,
    LongCastle,
}

impl Move {
    pub fn empty() -> Self {
        Self::Normal { from: 0, to: 0, piece: Pawn, ep: false }
    }

    pub fn to(&self) -> u8 {
        match self {
            Self::Normal { to, .. } => *to,
            Self::PawnPromotion { to, .. } => *to,
            _ => unimplemented!("castling moves have no single destination square"),
        }
    }

    pub fn from(&self) -> u8 {
        match self {
            Self::Normal { from, .. } => *from,
            Self::PawnPromotion { from, .. } => *from,
            _ => unimplemented!("castling moves have no single origin square"),
        }
    }

    pub fn is_castling(&self) -> bool {
        matches!(self, Self::ShortCastle | Self::LongCastle)
    }

    pub fn is_capture(&self, board: &Board) -> bool {
        match self {
            Self::Normal { to, ep, .. } => *ep || (BitBoard::from_square(*to) & board.get_all_bitboard()).is_not_empty(),
            Self::PawnPromotion { to, .. } => (BitBoard::from_square(*to) & board.get_all_bitboard()).is_not_empty(),
            _ => false,
        }
    }

    pub fn piece_moving(&self, _board: &Board) -> PieceType {
        match self {
            Self::Normal { piece, .. } => *piece,
            Self::PawnPromotion { .. } => Pawn,
            _ => King, // Castling
        }
    }

    pub fn piece_captured(&self, board: &Board) -> Option<PieceType> {
        match self {
            Self::Normal { to, ep, .. } => if *ep { Some(Pawn) } else { *board.piece_on(*to) },
            Self::PawnPromotion { to, .. } => *board.piece_on(*to),
            _ => None, // Castling
        }
    }

    // Reconstructs a move from UCI-like notation (e.g. "e2e4", "e7e8q").
    // The board is needed to resolve which piece is moving and whether the
    // move is an en-passant capture, since the notation alone doesn't carry that.
    pub fn from_notation(pos: &str, board: &Board) -> Result<Self, String> {
        match pos {
            "O-O" | "0-0" => Ok(Self::ShortCastle),
            "O-O-O" | "0-0-0" => Ok(Self::LongCastle),
            _ if pos.len() >= 4 => {
                let from = Square::from_notation(&pos[0..2])?.square();
                let to = Square::from_notation(&pos[2..4])?.square();

                if pos.len() == 4 {
                    let piece = board.piece_on(from)
                        .ok_or_else(|| format!("No piece on the origin square of '{pos}'"))?;
                    let ep = piece == Pawn && BitBoard::from_square(to) == board.ep_square();
                    Ok(Self::Normal { from, to, piece, ep })
                } else {
                    let promote_to = match pos[4..].to_lowercase().as_str() {
                        "q" | "=q" => Queen,
                        "r" | "=r" => Rook,
                        "b" | "=b" => Bishop,
                        "n" | "=n" => Knight,
                        _ => return Err("Invalid move".to_owned()),
                    };

                    Ok(Self::PawnPromotion { from, to, promote_to })
                }
            }
            _ => Err("Invalid move".to_owned()),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Normal { from, to, .. } => write!(f, "{}{}", Square::new(*from), Square::new(*to)),
            Self::ShortCastle => write!(f, "O-O"),
            Self::LongCastle => write!(f, "O-O-O"),
            Self::PawnPromotion { from, to, promote_to } => write!(f, "{}{}{}",
                Square::new(*from),
                Square::new(*to),
                match promote_to {
                    PieceType::Queen => "q",
                    PieceType::Rook => "r",
                    PieceType::Bishop => "b",
                    PieceType::Knight => "n",
                    _ => unreachable!(),
                }),
        }
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
