use zugzwang_board::{Board, Move, DEFAULT_FEN};
use zugzwang_engine::is_draw_by_repetition;

// Plays a knight shuffle that returns to the starting position twice,
// mirroring how `ServerState` accumulates `previous_positions`: the initial
// zobrist is pushed once, then every move's resulting zobrist is appended.
fn play_uci(board: &Board, history: &mut Vec<u64>, uci: &str) -> Board {
    let mv = Move::from_notation(uci, board).unwrap();
    let next = board.make_move(&mv);
    history.push(next.zobrist_key());
    next
}

#[test]
fn threefold_repetition_is_detected_but_not_before_the_third_time() {
    let start = Board::from_fen(DEFAULT_FEN).unwrap();
    let mut history = vec![start.zobrist_key()];

    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    let mut board = start;
    for uci in shuffle {
        board = play_uci(&board, &mut history, uci);
    }
    // Back to the starting position for the second time (occurrences: 0, 4).
    assert_eq!(board.zobrist_key(), start.zobrist_key());
    assert!(!is_draw_by_repetition(&board, 0, &history));

    for uci in shuffle {
        board = play_uci(&board, &mut history, uci);
    }
    // Third occurrence of the starting position (0, 4, 8): a legal draw claim.
    assert_eq!(board.zobrist_key(), start.zobrist_key());
    assert!(is_draw_by_repetition(&board, 0, &history));
}

#[test]
fn repetition_count_still_works_after_an_earlier_irreversible_move() {
    let start = Board::from_fen(DEFAULT_FEN).unwrap();
    let mut history = vec![start.zobrist_key()];

    // An irreversible pawn push happens first; the position it reaches then
    // repeats three times via the same knight shuffle as above.
    let mut board = play_uci(&start, &mut history, "e2e4");
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..2 {
        for uci in shuffle {
            board = play_uci(&board, &mut history, uci);
        }
    }

    assert!(is_draw_by_repetition(&board, 0, &history));
}
