use zugzwang_board::{Board, Move, DEFAULT_FEN};

// Checks that the zobrist key computed incrementally while making moves
// matches the key computed from scratch when loading the resulting FEN.
// The two code paths (create_zobrist_key vs. the incremental XOR updates
// in make_move) must never drift apart.
fn run_test(moves: &[&str], fen: &str) {
    let mut board = Board::default();

    for mv in moves {
        let parsed = Move::from_notation(mv, &board).unwrap();
        board = board.make_move(&parsed);
    }

    let board_from_fen = Board::from_fen(fen).unwrap();
    assert_eq!(board_from_fen.zobrist_key(), board.zobrist_key());
}

#[test]
fn initial_pos() {
    run_test(&[], DEFAULT_FEN);
}

#[test]
fn pos1() {
    run_test(&["e2e4"], "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
}

#[test]
fn pos2() {
    run_test(&["e2e4", "d7d5"], "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
}

#[test]
fn pos3() {
    run_test(&["e2e4", "d7d5", "e4e5"], "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2");
}

#[test]
fn pos4() {
    run_test(&["e2e4", "d7d5", "e4e5", "f7f5"], "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
}

#[test]
fn pos5() {
    run_test(&["e2e4", "d7d5", "e4e5", "f7f5", "e1e2"], "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPPKPPP/RNBQ1BNR b kq - 0 3");
}

#[test]
fn pos6() {
    run_test(&["e2e4", "d7d5", "e4e5", "f7f5", "e1e2", "e8f7"], "rnbq1bnr/ppp1pkpp/8/3pPp2/8/8/PPPPKPPP/RNBQ1BNR w - - 0 4");
}

#[test]
fn castling_updates_key_consistently() {
    run_test(
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"],
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4",
    );
}

#[test]
fn two_positions_reached_differently_share_a_key() {
    // e4 e5, Nf3 vs Nf3, e4 e5 reach the same position through different
    // move orders (with one extra pair of plies); same final FEN => same key.
    let mut via_a = Board::default();
    for mv in ["e2e4", "e7e5", "g1f3"] {
        let parsed = Move::from_notation(mv, &via_a).unwrap();
        via_a = via_a.make_move(&parsed);
    }

    let mut via_b = Board::default();
    for mv in ["g1f3", "e7e5", "e2e4"] {
        let parsed = Move::from_notation(mv, &via_b).unwrap();
        via_b = via_b.make_move(&parsed);
    }

    assert_eq!(via_a.zobrist_key(), via_b.zobrist_key());
}
