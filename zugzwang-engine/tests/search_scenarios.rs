use std::time::Duration;

use zugzwang_board::Board;
use zugzwang_engine::{Difficulty, Engine};

// Concrete scenarios mirroring a small tactics/strategy suite: each checks
// that the engine finds a known-correct move (or at least a legal one) from
// a hand-picked position, the same way a perft suite pins down move
// generation. Positions and rationale below.

#[test]
fn s1_opening_diversity() {
    let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let mut engine = Engine::new(Difficulty::Easy);
    let result = engine.best_move(&board, &[]);

    let mv = result.best_move.expect("starting position has legal moves");
    assert!(board.legal_moves().contains(&mv));
}

#[test]
fn s2_scholars_mate_in_one() {
    // White to move, mate in one: Qxf7#
    let board = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 4 4").unwrap();
    let mut engine = Engine::new(Difficulty::Medium);
    let result = engine.best_move(&board, &[]);

    let mv = result.best_move.expect("a mating move exists");
    assert_eq!(mv.to_string(), "f3f7");

    let after = board.make_move(&mv);
    assert!(after.is_checkmate());
    // Mate-in-one (N=1): score must satisfy |score| >= MATE - 2N.
    assert!(result.score.score() >= zugzwang_engine::MATE - 2);
}

#[test]
fn s3_black_mates_in_one() {
    let board = Board::from_fen("8/8/8/8/8/6k1/5q2/6K1 b - - 0 1").unwrap();
    let mut engine = Engine::new(Difficulty::Medium);
    let result = engine.best_move(&board, &[]);

    let mv = result.best_move.expect("black has a mating move");
    let after = board.make_move(&mv);
    assert!(after.is_checkmate());
}

#[test]
fn s4_insufficient_material_is_drawn() {
    let board = Board::from_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();
    assert!(board.is_insufficient_material());

    let mut engine = Engine::new(Difficulty::Easy);
    let result = engine.best_move(&board, &[]);

    let mv = result.best_move.expect("a lone king still has legal moves");
    assert!(board.legal_moves().contains(&mv));
    assert_eq!(result.score.score(), 0);
}

#[test]
fn s5_castling_is_preferred() {
    let board = Board::from_fen("r3k2r/pppq1ppp/2n2n2/3pp3/3PP3/2N2N2/PPPQ1PPP/R3K2R w KQkq - 0 8").unwrap();
    let mut engine = Engine::new(Difficulty::Hard);
    let result = engine.best_move(&board, &[]);

    let mv = result.best_move.expect("white has legal moves");
    assert!(mv.is_castling(), "expected a castling move at depth >= 4, got {mv}");
}

#[test]
fn s6_passed_pawn_push() {
    let board = Board::from_fen("8/5k2/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let mut engine = Engine::new(Difficulty::Medium);
    let result = engine.best_move(&board, &[]);

    let mv = result.best_move.expect("white has legal moves");
    let uci = mv.to_string();
    assert!(uci == "e2e4" || uci == "e2e3", "expected a pawn push, got {uci}");
}

// Invariants from the spec: every returned move is legal, terminal positions
// return no move, and the board is left untouched by the search.

#[test]
fn returns_legal_move_for_a_handful_of_positions() {
    let fens = [
        "r1bq1rk1/pp2bppp/2n2n2/2pp4/3P4/2N1PN2/PP1B1PPP/R2QKB1R w KQ - 0 8",
        "2kr3r/ppp2ppp/2n1b3/2b1p3/4P3/2N2N2/PPP2PPP/R1BQR1K1 b - - 0 11",
        "rnbqkb1r/pp3ppp/4pn2/2pp4/3P4/2N1PN2/PPP2PPP/R1BQKB1R w KQkq - 0 6",
    ];

    for fen in fens {
        let board = Board::from_fen(fen).unwrap();
        let mut engine = Engine::new(Difficulty::Easy);
        let result = engine.best_move(&board, &[]);
        let mv = result.best_move.expect("position has legal moves");
        assert!(board.legal_moves().contains(&mv), "{fen}: {mv} is not legal");
    }
}

#[test]
fn terminal_position_returns_no_move() {
    // Fool's mate, mate delivered
    let board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert!(board.is_checkmate());

    let mut engine = Engine::new(Difficulty::Easy);
    let result = engine.best_move(&board, &[]);

    assert!(result.best_move.is_none());
    assert_eq!(result.nodes, 0);
}

#[test]
fn wall_time_respects_budget() {
    let board = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 4 4").unwrap();
    let mut engine = Engine::new(Difficulty::Easy);
    let result = engine.best_move(&board, &[]);

    let budget = Duration::from_secs(5);
    assert!(result.elapsed <= budget.mul_f32(1.1), "search overran its time budget: {:?}", result.elapsed);
}

#[test]
fn single_legal_move_is_returned_immediately_without_searching() {
    // Lone black king with exactly one legal move (Ka7); every other
    // adjacent square is covered by the white king on c7.
    let board = Board::from_fen("k7/2K5/8/8/8/8/8/8 b - - 0 1").unwrap();
    let legal = board.legal_moves();
    assert_eq!(legal.len(), 1);

    let mut engine = Engine::new(Difficulty::Expert);
    let result = engine.best_move(&board, &[]);
    assert_eq!(result.best_move, Some(legal[0]));
    assert_eq!(result.nodes, 0);
}
