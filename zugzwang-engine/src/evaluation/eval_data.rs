use zugzwang_board::{Board, Pieces, Color::{self, *}};
use super::EvalScore;

// Holds the piece counts needed for the game-phase computation and the
// bishop-pair bonus, so they're only counted once per evaluation rather
// than recounted by every term that needs them.
pub struct EvalData<'a> {
    pub board: &'a Board,
    pub white_pieces: &'a Pieces,
    pub black_pieces: &'a Pieces,
    // Non-pawn, non-king material for each side, in centipawns. Used both
    // for the king PST endgame factor and for the null-move zugzwang guard.
    pub non_pawn_material: [EvalScore; 2],
    pub bishop_count: [EvalScore; 2],
}

impl<'a> EvalData<'a> {
    pub fn new(board: &'a Board) -> Self {
        let white_pieces = board.get_pieces(White);
        let black_pieces = board.get_pieces(Black);

        let non_pawn_material = [
            material_of(black_pieces),
            material_of(white_pieces),
        ];

        let bishop_count = [
            black_pieces.bishops.count() as EvalScore,
            white_pieces.bishops.count() as EvalScore,
        ];

        Self { board, white_pieces, black_pieces, non_pawn_material, bishop_count }
    }

    pub fn get_pieces(&self, color: Color) -> &Pieces {
        match color {
            Black => self.black_pieces,
            White => self.white_pieces,
        }
    }

    pub fn non_pawn_material(&self, color: Color) -> EvalScore {
        self.non_pawn_material[color.to_index()]
    }

    pub fn has_bishop_pair(&self, color: Color) -> bool {
        self.bishop_count[color.to_index()] >= 2
    }
}

fn material_of(pieces: &Pieces) -> EvalScore {
    use super::piece_tables::value_of;
    use zugzwang_board::PieceType::*;

    pieces.knights.count() as EvalScore * value_of(Knight)
        + pieces.bishops.count() as EvalScore * value_of(Bishop)
        + pieces.rooks.count() as EvalScore * value_of(Rook)
        + pieces.queens.count() as EvalScore * value_of(Queen)
}
