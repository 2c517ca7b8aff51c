use std::fmt::{Display, Formatter};
use std::ops::{Neg, Add, Sub};
use zugzwang_board::{Board, Color::{self, *}, PieceType::{self, *}};

use super::eval_data::EvalData;
use super::pawn_cache::PawnCache;
use super::piece_tables;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
// Wraps the raw centipawn score so we can give it a nicer Display (plies to
// mate instead of a huge number) without scattering that logic everywhere
// a score is printed.
pub struct Evaluation { score: i32 }

// Raw score type, exposed so the search can express margins and windows
// (futility margins, aspiration windows) without going through Evaluation's
// constructor everywhere.
pub type EvalScore = i32;

// A checkmate is scored as MATE minus the ply at which it occurs, so that
// shorter mates always outscore longer ones. Kept well clear of any
// realistic combination of material + positional scores.
pub const MATE: EvalScore = 100_000;

// Threshold past which a score is considered "a forced mate" rather than a
// large positional advantage; leaves headroom for MATE to be folded by up to
// MAX_PLY (64) without crossing this boundary in the other direction.
const MATE_THRESHOLD: EvalScore = MATE - 1_000;

// The score the engine associates with a draw. A negative value means the
// engine assumes itself superior, so drawing is penalized; zero is neutral.
const CONTEMPT: EvalScore = 0;

const BISHOP_PAIR_BONUS: EvalScore = 40;

// Clamp bounds (in non-pawn-and-king centipawns, both sides combined) for the
// king PST endgame-factor blend.
const PHASE_MIDGAME_MATERIAL: EvalScore = 4000;
const PHASE_SPAN: EvalScore = 2000;

// Evaluates how favorable a quiescent position is for the side to move.
// A positive score favors the mover, a negative one favors the opponent.
pub fn evaluate_position(board: &Board, pawn_cache: &PawnCache) -> Evaluation {
    let data = EvalData::new(board);

    let mut white_score = material_and_pst(&data, White)
        - material_and_pst(&data, Black);

    if data.has_bishop_pair(White) {
        white_score += BISHOP_PAIR_BONUS;
    }
    if data.has_bishop_pair(Black) {
        white_score -= BISHOP_PAIR_BONUS;
    }

    white_score += pawn_cache.score(board);

    // The mobility probe plays a null move to count the opponent's replies;
    // that's only a legal question to ask when the side to move isn't in
    // check (see `Board::make_null_move`'s own precondition). Callers that
    // reach this position from an in-check side to move (quiescence's
    // stand-pat, the one-ply time-out fallback) simply skip the term rather
    // than feed a king-in-check position to the null-move probe.
    if !board.is_check(board.turn_color()) {
        white_score += mobility_score(board);
    }

    let score = white_score * board.turn_color().sign() as EvalScore;
    Evaluation::new(score)
}

// Non-pawn, non-king material for one side, in centipawns. Exposed for the
// search's null-move zugzwang guard (don't try a null move in bare-king
// endings where passing is sometimes actually the best move).
pub fn non_pawn_material(board: &Board, color: Color) -> EvalScore {
    EvalData::new(board).non_pawn_material(color)
}

// Material plus piece-square bonuses for one side, from White's perspective
// (i.e. a White rook on a good square adds a positive amount, a Black rook on
// the mirrored good square also adds a positive amount here -- the caller
// subtracts Black's total rather than this function negating it).
fn material_and_pst(data: &EvalData, color: Color) -> EvalScore {
    let pieces = data.get_pieces(color);
    let mirror = color == Black;

    let mut score = 0;
    score += piece_value_and_table(pieces.pawns, Pawn, &piece_tables::PAWN, mirror);
    score += piece_value_and_table(pieces.knights, Knight, &piece_tables::KNIGHT, mirror);
    score += piece_value_and_table(pieces.bishops, Bishop, &piece_tables::BISHOP, mirror);
    score += piece_value_and_table(pieces.rooks, Rook, &piece_tables::ROOK, mirror);
    score += piece_value_and_table(pieces.queens, Queen, &piece_tables::QUEEN, mirror);
    score += king_score(data, color);
    score
}

fn piece_value_and_table(bb: zugzwang_board::BitBoard, piece: PieceType, table: &[EvalScore; 64], mirror: bool) -> EvalScore {
    let value = piece_tables::value_of(piece);
    bb.piece_indices()
        .map(|sq| {
            let idx = if mirror { piece_tables::mirror(sq) } else { sq };
            value + table[idx as usize]
        })
        .sum()
}

// Blends the king's middlegame and endgame piece-square values based on how
// much non-pawn material remains on the board -- the less material, the
// further the king should be encouraged to walk towards the centre.
fn king_score(data: &EvalData, color: Color) -> EvalScore {
    let king_bb = data.get_pieces(color).king;
    if king_bb.is_empty() {
        // Only possible in synthetic test positions without a king; treat
        // as contributing nothing rather than panicking.
        return piece_tables::value_of(King);
    }

    let sq = king_bb.first_piece_index();
    let idx = if color == Black { piece_tables::mirror(sq) } else { sq } as usize;

    let total_material = data.non_pawn_material(White) + data.non_pawn_material(Black);
    let endgame_factor = clamp_unit(
        (PHASE_MIDGAME_MATERIAL - total_material) as f32 / PHASE_SPAN as f32
    );

    let mg = piece_tables::KING_MIDGAME[idx] as f32;
    let eg = piece_tables::KING_ENDGAME[idx] as f32;
    let blended = mg * (1.0 - endgame_factor) + eg * endgame_factor;

    piece_tables::value_of(King) + blended.round() as EvalScore
}

fn clamp_unit(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}

// Mobility bonus: the difference in legal move counts between the side to
// move and the opponent, favoring active positions. The opponent's count is
// obtained by playing a null move and counting from there, which is only a
// legal probe when the side to move isn't in check; `evaluate_position`
// guards the call site rather than this function, since skipping the term
// entirely is the correct behavior when the guard fails (not a panic).
fn mobility_score(board: &Board) -> EvalScore {
    let own_moves = board.legal_moves().len() as EvalScore;
    let opponent_board = board.make_null_move();
    let opponent_moves = opponent_board.legal_moves().len() as EvalScore;

    let diff = own_moves - opponent_moves;
    diff * 5 * board.turn_color().sign() as EvalScore
}

impl Evaluation {
    pub const fn new(score: EvalScore) -> Self {
        Self { score }
    }

    pub const fn contempt() -> Self {
        Self::new(CONTEMPT)
    }

    // min_val/max_val are kept one away from the true i32 extremes so that
    // negating either never overflows (`-min_val() == max_val()` and
    // vice versa).
    pub fn min_val() -> Self {
        Self::new(i32::MIN + 1)
    }

    pub fn max_val() -> Self {
        Self::new(i32::MAX - 1)
    }

    pub fn score(&self) -> EvalScore {
        self.score
    }

    pub fn is_positive_mate(&self) -> bool {
        self.score >= MATE_THRESHOLD
    }

    pub fn is_negative_mate(&self) -> bool {
        self.score <= -MATE_THRESHOLD
    }

    pub fn is_mate(&self) -> bool {
        self.is_positive_mate() || self.is_negative_mate()
    }
}

impl Neg for Evaluation {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.score)
    }
}

impl Sub<EvalScore> for Evaluation {
    type Output = Self;

    fn sub(self, rhs: EvalScore) -> Self::Output {
        Self::new(self.score - rhs)
    }
}

impl Add<EvalScore> for Evaluation {
    type Output = Self;

    fn add(self, rhs: EvalScore) -> Self::Output {
        Self::new(self.score + rhs)
    }
}

impl Sub<Self> for Evaluation {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.score - rhs.score)
    }
}

impl Add<Self> for Evaluation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.score + rhs.score)
    }
}

impl PartialOrd<EvalScore> for Evaluation {
    fn partial_cmp(&self, other: &EvalScore) -> Option<std::cmp::Ordering> {
        self.score.partial_cmp(other)
    }
}

impl PartialEq<EvalScore> for Evaluation {
    fn eq(&self, other: &EvalScore) -> bool {
        self.score == *other
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_positive_mate() {
            write!(f, "M{}", MATE - self.score())
        } else if self.is_negative_mate() {
            write!(f, "-M{}", MATE + self.score())
        } else {
            write!(f, "{:+.2}", self.score() as f32 / 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::PawnCache;

    // Hand-mirrored position pairs: same structure, colors swapped and the
    // board flipped vertically, with side to move swapped and castling/ep
    // rights left out so mirroring the FEN by hand stays unambiguous.
    fn assert_mirror_symmetric(fen: &str, mirrored_fen: &str) {
        let board = Board::from_fen(fen).unwrap();
        let mirrored = Board::from_fen(mirrored_fen).unwrap();
        let cache = PawnCache::new();

        let score = evaluate_position(&board, &cache);
        let mirrored_score = evaluate_position(&mirrored, &cache);

        assert_eq!(score, -mirrored_score, "{fen} vs {mirrored_fen}");
    }

    #[test]
    fn evaluation_is_symmetric_under_color_and_board_mirroring() {
        assert_mirror_symmetric(
            "8/8/8/4k3/4K3/8/4P3/8 w - - 0 1",
            "8/4p3/8/4k3/4K3/8/8/8 b - - 0 1",
        );
    }

    #[test]
    fn evaluation_is_symmetric_for_a_developed_middlegame_position() {
        assert_mirror_symmetric(
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w - - 0 1",
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R b - - 0 1",
        );
    }

    #[test]
    fn checkmate_and_stalemate_are_the_negamax_core_responsibility_not_the_evaluators() {
        // The evaluator assumes a non-terminal position and is never asked
        // to score a checkmate or stalemate directly; it still must not
        // panic if handed one (e.g. from a misbehaving caller), returning
        // whatever material/positional score the pieces imply.
        let board = Board::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 3").unwrap();
        assert!(board.is_checkmate());
        let cache = PawnCache::new();
        let _ = evaluate_position(&board, &cache);
    }
}
