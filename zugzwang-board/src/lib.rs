mod board;
mod fen;
mod game_elements;
mod zobrist;

pub use board::{Board, BitBoard, Pieces};
pub use fen::{read_fen, FENInfo, DEFAULT_FEN};
pub use game_elements::{CastlingRights, Color, Move, PieceType, Square};
