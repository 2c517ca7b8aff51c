use zugzwang_board::Move;
use crate::evaluation::Evaluation;

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    Lowerbound,
    Upperbound,
}

// A single transposition table slot. `zobrist` is kept alongside the data
// so that a probe can detect a different position hashing to the same
// index (an index collision, as opposed to a genuine hit).
#[derive(Copy, Clone)]
pub struct TTEntry {
    zobrist: u64,
    depth: u8,
    score: Evaluation,
    node_type: NodeType,
    best_move: Option<Move>,
}

impl TTEntry {
    pub fn new(zobrist: u64, depth: u8, score: Evaluation, node_type: NodeType, best_move: Option<Move>) -> Self {
        Self { zobrist, depth, score, node_type, best_move }
    }

    pub fn zobrist(&self) -> u64 {
        self.zobrist
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn eval_score(&self) -> Evaluation {
        self.score
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}
