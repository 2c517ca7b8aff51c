use std::time::Duration;
use zugzwang_board::{Board, Move};

use crate::evaluation::{Evaluation, PawnCache};
use crate::search::{Search, SearchOptions};
use crate::trasposition::TTable;

// Number of entries in the transposition table. A power of two so that
// `zobrist_key % size` stays cheap.
const TRASPOSITION_TABLE_SIZE: usize = 1 << 22;

// Difficulty level exposed to callers, mapped to a fixed (depth, time budget)
// pair. Levels are the only externally visible knob; `SearchOptions` itself
// allows finer control for tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    fn settings(&self) -> (u8, Duration) {
        match self {
            Self::Easy => (3, Duration::from_secs(5)),
            Self::Medium => (4, Duration::from_secs(10)),
            Self::Hard => (5, Duration::from_secs(15)),
            Self::Expert => (6, Duration::from_secs(20)),
        }
    }
}

// Result of a `best_move` call. `best_move` is `None` only when the position
// has no legal moves (checkmate or stalemate); the caller decides how to
// surface that to the user.
pub struct BestMoveResult {
    pub best_move: Option<Move>,
    pub score: Evaluation,
    pub nodes: u32,
    pub elapsed: Duration,
    pub timed_out: bool,
}

// The engine facade: owns the state that must persist across repeated
// `best_move` calls on the same game (the transposition table and the pawn
// cache), and the difficulty setting that derives each call's search budget.
pub struct Engine {
    tt: TTable,
    pawn_cache: PawnCache,
    difficulty: Difficulty,
}

impl Engine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            tt: TTable::new(TRASPOSITION_TABLE_SIZE),
            pawn_cache: PawnCache::new(),
            difficulty,
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn best_move(&mut self, board: &Board, past_positions: &[u64]) -> BestMoveResult {
        if board.is_checkmate() || board.is_stalemate() {
            return BestMoveResult {
                best_move: None,
                score: Evaluation::contempt(),
                nodes: 0,
                elapsed: Duration::ZERO,
                timed_out: false,
            };
        }

        let (target_depth, time_budget) = self.difficulty.settings();
        let options = SearchOptions { target_depth, time_budget };

        let mut search = Search::new(&mut self.tt, &self.pawn_cache, &options, past_positions);
        let result = search.find_best(board);

        println!("nodes: {}, depth: {}, score: {}", search.nodes(), target_depth, result.score);

        BestMoveResult {
            best_move: result.best_move,
            score: result.score,
            nodes: search.nodes(),
            elapsed: search.elapsed(),
            timed_out: search.timed_out(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Difficulty::Hard)
    }
}
