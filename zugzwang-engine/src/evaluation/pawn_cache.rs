use dashmap::DashMap;
use zugzwang_board::{Board, Color::*, PieceType::Pawn};

use super::{masks, EvalScore};

// Doubled/isolated/passed pawn penalties and bonuses, White's perspective.
const DOUBLED_PENALTY: EvalScore = -20;
const ISOLATED_PENALTY: EvalScore = -15;
const PASSED_BONUS: EvalScore = 50;

// Memoizes the structural part of the pawn evaluation (doubled/isolated/passed)
// keyed by a hash of the pawns alone, since that part of the board changes far
// less often than the rest of the position during a search. A miss computes
// and inserts the score; a hit returns exactly what was stored. Entries are
// never invalidated -- the score for a given pawn structure never changes --
// so there is nothing to get wrong by skipping eviction.
#[derive(Default)]
pub struct PawnCache {
    entries: DashMap<u64, EvalScore>,
}

impl PawnCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, board: &Board) -> EvalScore {
        let key = pawn_hash(board);

        if let Some(cached) = self.entries.get(&key) {
            return *cached;
        }

        let score = compute_pawn_score(board);
        self.entries.insert(key, score);
        score
    }
}

fn pawn_hash(board: &Board) -> u64 {
    let mut hash = 0u64;

    for square in board.get_pieces(White).get_pieces_of_type(Pawn).piece_indices() {
        hash ^= square as u64 + 1;
    }

    for square in board.get_pieces(Black).get_pieces_of_type(Pawn).piece_indices() {
        hash ^= (square as u64 + 1) * 2;
    }

    hash
}

fn compute_pawn_score(board: &Board) -> EvalScore {
    let white_pawns = board.get_pieces(White).get_pieces_of_type(Pawn);
    let black_pawns = board.get_pieces(Black).get_pieces_of_type(Pawn);

    let mut score = 0;
    score += doubled_and_isolated(white_pawns);
    score -= doubled_and_isolated(black_pawns);

    for square in white_pawns.piece_indices() {
        if (masks::white_passed_pawn(square) & black_pawns).is_empty() {
            score += PASSED_BONUS;
        }
    }

    for square in black_pawns.piece_indices() {
        if (masks::black_passed_pawn(square) & white_pawns).is_empty() {
            score -= PASSED_BONUS;
        }
    }

    score
}

// Doubled penalty, computed per file (a file with n pawns costs
// `-20·(n-1)` regardless of how many pawns sit on it), plus the isolated
// penalty, computed per pawn (each pawn on a file with no friendly pawn on
// either adjacent file is penalized, so a doubled-and-isolated pair is
// penalized once per pawn, same as the passed-pawn loops above).
fn doubled_and_isolated(pawns: zugzwang_board::BitBoard) -> EvalScore {
    let mut score = 0;

    for file in 0..8u8 {
        let on_file = (pawns & masks::file(file * 8)).count();
        if on_file > 1 {
            score += DOUBLED_PENALTY * (on_file as EvalScore - 1);
        }
    }

    for square in pawns.piece_indices() {
        let file = square % 8;
        let left_file = if file > 0 { masks::file((file - 1) * 8) } else { zugzwang_board::BitBoard::new(0) };
        let right_file = if file < 7 { masks::file((file + 1) * 8) } else { zugzwang_board::BitBoard::new(0) };

        if (pawns & (left_file | right_file)).is_empty() {
            score += ISOLATED_PENALTY;
        }
    }

    score
}
