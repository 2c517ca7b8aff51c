use std::sync::OnceLock;
use zugzwang_board::BitBoard;

// Bitboard masks used by the evaluator's pawn-structure scoring: the file a
// square sits on, and the squares strictly ahead of a square (towards
// promotion) on the same or an adjacent file, which is exactly what "no
// opposing pawn can still stop this one" needs to check for passed pawns.
// Built once on first use and cached, since they only depend on the square
// index, never on a particular position.
struct Masks {
    files: [BitBoard; 64],
    white_passed: [BitBoard; 64],
    black_passed: [BitBoard; 64],
}

static MASKS: OnceLock<Masks> = OnceLock::new();

fn masks() -> &'static Masks {
    MASKS.get_or_init(build_masks)
}

pub fn file(square: u8) -> BitBoard {
    masks().files[square as usize]
}

pub fn white_passed_pawn(square: u8) -> BitBoard {
    masks().white_passed[square as usize]
}

pub fn black_passed_pawn(square: u8) -> BitBoard {
    masks().black_passed[square as usize]
}

fn build_masks() -> Masks {
    let mut files = [BitBoard::new(0); 64];
    let mut white_passed = [BitBoard::new(0); 64];
    let mut black_passed = [BitBoard::new(0); 64];

    for pos in 0..64u8 {
        let file_idx = pos % 8;
        let rank_idx = pos / 8;

        for other in 0..64u8 {
            let other_file = other % 8;
            let other_rank = other / 8;
            let bb = BitBoard::from_square(other);

            if other_file == file_idx {
                files[pos as usize] |= bb;
            }

            let adjacent_or_same_file = (file_idx as i8 - other_file as i8).abs() <= 1;

            if adjacent_or_same_file && other_rank > rank_idx {
                white_passed[pos as usize] |= bb;
            }

            if adjacent_or_same_file && other_rank < rank_idx {
                black_passed[pos as usize] |= bb;
            }
        }
    }

    Masks { files, white_passed, black_passed }
}
