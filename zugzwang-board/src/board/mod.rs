mod chess_board;
mod bitboard;
mod movegen;
mod perft;
pub mod attacks;

pub use chess_board::{Board, Pieces};
pub use bitboard::BitBoard;
