use std::sync::OnceLock;
use crate::{PieceType, Color};
use crate::game_elements::CastlingRights;

/*
 The 793 elements in the array are logically distributed as follows:
 - 768 for all possible squares of all types of pieces (0-767)
    - The position of the array for any given piece is: 64 * (zobrist_index(kind) + color.to_index()) + square
    - zobrist_index is spaced by two so each (piece, color) pair gets its own block
 - 16 for all possible castling options (WK, WQ, BK, BQ) (768-783)
 - 8 for the files of the current e.p. square (784-791)
 - 1 to signal that White is to move (792)
*/
const NUM_KEYS: usize = 793;

static ZOBRIST_VALUES: OnceLock<[u64; NUM_KEYS]> = OnceLock::new();

fn values() -> &'static [u64; NUM_KEYS] {
    ZOBRIST_VALUES.get_or_init(generate_keys)
}

// Deterministic PRNG so the table is identical between runs (needed so that
// a saved position's zobrist key is reproducible), without shipping a
// pre-baked data file. splitmix64 is the standard choice for seeding other
// generators and is more than good enough here: we just need 793 values
// with no structural correlation between them.
fn generate_keys() -> [u64; NUM_KEYS] {
    let mut state: u64 = 0x9E3779B97F4A7C15;
    let mut values = [0u64; NUM_KEYS];

    for v in values.iter_mut() {
        state = state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        *v = z ^ (z >> 31);
    }

    values
}

pub fn get_key_for_piece(piece: PieceType, color: Color, square: u8) -> u64 {
    values()[64 * (piece.to_zobrist_index() + color.to_index()) + square as usize]
}

pub fn get_key_castling(cr: &CastlingRights) -> u64 {
    values()[768 + cr.index()]
}

pub fn get_key_ep_square(square: u8) -> u64 {
    values()[784 + (square as usize % 8)]
}

pub fn get_key_white_turn() -> u64 {
    values()[792]
}
