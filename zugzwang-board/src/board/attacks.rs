use std::sync::OnceLock;
use crate::game_elements::Color;
use super::BitBoard;

// Precomputed attack tables for the non-sliding pieces, plus the en-passant
// capture mask. Sliding pieces (bishop/rook/queen) are resolved with an
// occupancy-aware ray walk instead of a magic-bitboard lookup: simpler to get
// right, and fast enough for a single-threaded search of this depth.

struct Tables {
    king: [BitBoard; 64],
    knight: [BitBoard; 64],
    white_pawn_attacks: [BitBoard; 64],
    black_pawn_attacks: [BitBoard; 64],
    white_pawn_pushes: [BitBoard; 64],
    black_pawn_pushes: [BitBoard; 64],
    ep_attacks: [BitBoard; 64],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> Tables {
    let mut king = [BitBoard::new(0); 64];
    let mut knight = [BitBoard::new(0); 64];
    let mut white_pawn_attacks = [BitBoard::new(0); 64];
    let mut black_pawn_attacks = [BitBoard::new(0); 64];
    let mut white_pawn_pushes = [BitBoard::new(0); 64];
    let mut black_pawn_pushes = [BitBoard::new(0); 64];
    let mut ep_attacks = [BitBoard::new(0); 64];

    const KING_DELTAS: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
    const KNIGHT_DELTAS: [(i8, i8); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];

    for sq in 0u8..64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;

        king[sq as usize] = deltas_to_bb(file, rank, &KING_DELTAS);
        knight[sq as usize] = deltas_to_bb(file, rank, &KNIGHT_DELTAS);

        white_pawn_attacks[sq as usize] = deltas_to_bb(file, rank, &[(1, -1), (1, 1)]);
        black_pawn_attacks[sq as usize] = deltas_to_bb(file, rank, &[(-1, -1), (-1, 1)]);

        white_pawn_pushes[sq as usize] = if rank < 7 { square_bb(file, rank + 1) } else { BitBoard::new(0) };
        black_pawn_pushes[sq as usize] = if rank > 0 { square_bb(file, rank - 1) } else { BitBoard::new(0) };

        // Union of both colors' diagonal-adjacent squares: used to test whether
        // any pawn of a given color stands next to the e.p. square, regardless
        // of the direction it would capture in.
        ep_attacks[sq as usize] = deltas_to_bb(file, rank, &[(-1, -1), (-1, 1), (1, -1), (1, 1)]);
    }

    Tables { king, knight, white_pawn_attacks, black_pawn_attacks, white_pawn_pushes, black_pawn_pushes, ep_attacks }
}

fn square_bb(file: i8, rank: i8) -> BitBoard {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        BitBoard::from_square((rank * 8 + file) as u8)
    } else {
        BitBoard::new(0)
    }
}

fn deltas_to_bb(file: i8, rank: i8, deltas: &[(i8, i8)]) -> BitBoard {
    deltas.iter().fold(BitBoard::new(0), |acc, (dr, df)| acc | square_bb(file + df, rank + dr))
}

pub fn king_moves(sq: usize) -> BitBoard {
    tables().king[sq]
}

pub fn knight_moves(sq: usize) -> BitBoard {
    tables().knight[sq]
}

pub fn pawn_attacks(sq: usize, color: Color) -> BitBoard {
    match color {
        Color::White => tables().white_pawn_attacks[sq],
        Color::Black => tables().black_pawn_attacks[sq],
    }
}

pub fn pawn_pushes(sq: usize, color: Color) -> BitBoard {
    match color {
        Color::White => tables().white_pawn_pushes[sq],
        Color::Black => tables().black_pawn_pushes[sq],
    }
}

pub fn ep_attacks(sq: usize) -> BitBoard {
    tables().ep_attacks[sq]
}

// Directions as (delta_file, delta_rank); walked until the edge of the board
// or a blocking piece, including the blocker itself (so captures show up).
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn slide(sq: usize, occupied: BitBoard, dirs: &[(i8, i8); 4]) -> BitBoard {
    let file = (sq % 8) as i8;
    let rank = (sq / 8) as i8;
    let mut result = BitBoard::new(0);

    for &(df, dr) in dirs {
        let mut f = file + df;
        let mut r = rank + dr;

        while (0..8).contains(&f) && (0..8).contains(&r) {
            let bb = square_bb(f, r);
            result |= bb;

            if (bb & occupied).is_not_empty() {
                break;
            }

            f += df;
            r += dr;
        }
    }

    result
}

pub fn rook_moves(sq: usize, occupied: BitBoard) -> BitBoard {
    slide(sq, occupied, &ROOK_DIRS)
}

pub fn bishop_moves(sq: usize, occupied: BitBoard) -> BitBoard {
    slide(sq, occupied, &BISHOP_DIRS)
}

pub fn queen_moves(sq: usize, occupied: BitBoard) -> BitBoard {
    rook_moves(sq, occupied) | bishop_moves(sq, occupied)
}
